//! Grammar IR: rules, alternations, concatenations, repetitions, elements.
//!
//! Sibling chains are plain ordered deques; a node's predecessor is the
//! entry before it. The construction API grows chains at the front. Nothing is validated at construction time, so malformed
//! trees (zero repetitions, inverted ranges, dangling references) are legal
//! values that the compiler's validator reports later.

use std::collections::{VecDeque, vec_deque};
use std::fmt;
use std::ops::Range;

use crate::text::Text;

/// Unbounded repetition maximum.
pub const INFINITY: u32 = u32::MAX;

/// Non-owning handle to a rule inside its [`RuleSet`].
///
/// Handles are positions, so they are only meaningful for the set that
/// produced them. [`RuleSet::reorder`] rewrites the handles it invalidates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub type ActionFn = fn(usize);

/// Opaque side-effect hook carried through the IR. No emitter renders it.
#[derive(Clone, Copy, Debug)]
pub struct Action {
    pub callback: ActionFn,
    pub user_data: usize,
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.callback, other.callback) && self.user_data == other.user_data
    }
}

impl Eq for Action {}

/// Reference to another rule by name.
#[derive(Clone, Debug, Default)]
pub struct RuleRef<'a> {
    pub name: Text<'a>,
    /// Set by validation once the name resolves.
    pub resolved: Option<RuleId>,
}

// Structural equality: the back-reference is bookkeeping, not shape.
impl PartialEq for RuleRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RuleRef<'_> {}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Element<'a> {
    /// Placeholder, never valid in a checked tree.
    #[default]
    Empty,
    RuleRef(RuleRef<'a>),
    /// Inclusive byte range; `lo == hi` is a single byte.
    Range { lo: u8, hi: u8 },
    /// Case-sensitive literal.
    String(Text<'a>),
    /// Case-insensitive literal.
    Token(Text<'a>),
    Group(Alternation<'a>),
    Action(Action),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Repetition<'a> {
    pub min: u32,
    pub max: u32,
    pub element: Element<'a>,
}

impl Repetition<'_> {
    pub fn is_optional(&self) -> bool {
        self.min == 0 && self.max == 1
    }

    pub fn is_once(&self) -> bool {
        self.min == 1 && self.max == 1
    }

    pub fn is_any(&self) -> bool {
        self.min == 0 && self.max == INFINITY
    }

    pub fn is_more(&self) -> bool {
        self.min == 1 && self.max == INFINITY
    }
}

/// Ordered AND-sequence of repetitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Concatenation<'a>(VecDeque<Repetition<'a>>);

impl<'a> Concatenation<'a> {
    pub fn new() -> Self {
        Self(VecDeque::new())
    }

    pub fn push(&mut self, repetition: Repetition<'a>) {
        self.0.push_back(repetition);
    }

    pub(crate) fn prepend(&mut self, repetition: Repetition<'a>) {
        self.0.push_front(repetition);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Repetition<'a>> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> vec_deque::IterMut<'_, Repetition<'a>> {
        self.0.iter_mut()
    }

    pub fn first(&self) -> Option<&Repetition<'a>> {
        self.0.front()
    }
}

impl<'a> FromIterator<Repetition<'a>> for Concatenation<'a> {
    fn from_iter<T: IntoIterator<Item = Repetition<'a>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'s, 'a> IntoIterator for &'s Concatenation<'a> {
    type Item = &'s Repetition<'a>;
    type IntoIter = vec_deque::Iter<'s, Repetition<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Ordered OR-set of concatenations. Order only matters for output determinism.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alternation<'a>(VecDeque<Concatenation<'a>>);

impl<'a> Alternation<'a> {
    pub fn new() -> Self {
        Self(VecDeque::new())
    }

    pub fn push(&mut self, concatenation: Concatenation<'a>) {
        self.0.push_back(concatenation);
    }

    pub(crate) fn prepend(&mut self, concatenation: Concatenation<'a>) {
        self.0.push_front(concatenation);
    }

    /// Append every alternative of `other` (incremental `=/` definitions).
    pub fn extend(&mut self, other: Alternation<'a>) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Concatenation<'a>> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> vec_deque::IterMut<'_, Concatenation<'a>> {
        self.0.iter_mut()
    }

    /// Number of concatenations of the first alternative, 0 when empty.
    pub fn first_len(&self) -> usize {
        self.0.front().map_or(0, Concatenation::len)
    }

    /// The only repetition of a one-alternative, one-repetition body.
    pub fn single(&self) -> Option<&Repetition<'a>> {
        match (self.0.len(), self.0.front()) {
            (1, Some(concatenation)) if concatenation.len() == 1 => concatenation.first(),
            _ => None,
        }
    }
}

impl<'a> FromIterator<Concatenation<'a>> for Alternation<'a> {
    fn from_iter<T: IntoIterator<Item = Concatenation<'a>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'s, 'a> IntoIterator for &'s Alternation<'a> {
    type Item = &'s Concatenation<'a>;
    type IntoIter = vec_deque::Iter<'s, Concatenation<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rule<'a> {
    pub name: Text<'a>,
    pub body: Alternation<'a>,
    /// Provenance label, e.g. the source file the rule came from.
    pub origin: Text<'a>,
}

impl<'a> Rule<'a> {
    pub fn new(name: impl Into<Text<'a>>, body: Alternation<'a>) -> Self {
        Self {
            name: name.into(),
            body,
            origin: Text::NULL,
        }
    }
}

/// Ordered rule table. Insertion order is declaration order until the
/// dependency resolver reorders it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet<'a> {
    rules: VecDeque<Rule<'a>>,
}

impl<'a> RuleSet<'a> {
    pub fn new() -> Self {
        Self {
            rules: VecDeque::new(),
        }
    }

    pub fn push(&mut self, rule: Rule<'a>) -> RuleId {
        let id = RuleId::from_index(self.rules.len());
        self.rules.push_back(rule);
        id
    }

    pub(crate) fn prepend(&mut self, rule: Rule<'a>) {
        self.rules.push_front(rule);
    }

    /// Move every rule of `other` to the end of this set.
    ///
    /// Handles resolved inside `other` are shifted so they keep pointing at
    /// the same rules.
    pub fn append(&mut self, mut other: RuleSet<'a>) {
        let offset = self.rules.len();
        if offset > 0 {
            other.remap(|id| Some(RuleId::from_index(id.index() + offset)));
        }
        self.rules.append(&mut other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule<'a>> {
        self.rules.get(id.index())
    }

    pub fn get_mut(&mut self, id: RuleId) -> Option<&mut Rule<'a>> {
        self.rules.get_mut(id.index())
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Rule<'a>> {
        self.rules.iter()
    }

    pub fn iter_mut(&mut self) -> vec_deque::IterMut<'_, Rule<'a>> {
        self.rules.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = RuleId> + use<'a> {
        (0..self.rules.len()).map(RuleId::from_index)
    }

    pub fn first(&self) -> Option<&Rule<'a>> {
        self.rules.front()
    }

    pub fn last(&self) -> Option<&Rule<'a>> {
        self.rules.back()
    }

    /// First rule whose name matches case-insensitively.
    pub fn find(&self, name: &[u8]) -> Option<RuleId> {
        self.rules
            .iter()
            .position(|rule| rule.name.eq_ignore_ascii_case(name))
            .map(RuleId::from_index)
    }

    pub fn find_rule(&self, name: &[u8]) -> Option<&Rule<'a>> {
        self.find(name).and_then(|id| self.get(id))
    }

    /// Set the provenance label of the rules in `range`.
    pub fn assign_origin(&mut self, range: Range<usize>, origin: impl Into<Text<'a>>) {
        let origin = origin.into();
        let end = range.end.min(self.rules.len());
        for rule in self.rules.range_mut(range.start.min(end)..end) {
            rule.origin = origin.clone();
        }
    }

    /// Replace declaration order with `order`.
    ///
    /// `order` must be a permutation of this set's ids. Every `resolved`
    /// handle is rewritten to the rule's new position.
    pub fn reorder(&mut self, order: &[RuleId]) {
        assert_eq!(
            order.len(),
            self.rules.len(),
            "RuleSet::reorder: order is not a permutation"
        );

        let mut new_index = vec![usize::MAX; self.rules.len()];
        for (position, id) in order.iter().enumerate() {
            new_index[id.index()] = position;
        }
        assert!(
            new_index.iter().all(|&i| i != usize::MAX),
            "RuleSet::reorder: order is not a permutation"
        );

        let mut slots: Vec<Option<Rule<'a>>> = self.rules.drain(..).map(Some).collect();
        self.rules = order
            .iter()
            .map(|id| slots[id.index()].take().expect("permutation visits each rule once"))
            .collect();

        self.remap(|id| new_index.get(id.index()).map(|&i| RuleId::from_index(i)));
    }

    fn remap(&mut self, map: impl Fn(RuleId) -> Option<RuleId>) {
        for rule in &mut self.rules {
            remap_alternation(&mut rule.body, &map);
        }
    }
}

fn remap_alternation(alternation: &mut Alternation<'_>, map: &impl Fn(RuleId) -> Option<RuleId>) {
    for concatenation in alternation.iter_mut() {
        for repetition in concatenation.iter_mut() {
            match &mut repetition.element {
                Element::RuleRef(r) => r.resolved = r.resolved.and_then(map),
                Element::Group(group) => remap_alternation(group, map),
                _ => {}
            }
        }
    }
}

impl<'a> FromIterator<Rule<'a>> for RuleSet<'a> {
    fn from_iter<T: IntoIterator<Item = Rule<'a>>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for RuleSet<'a> {
    type Item = Rule<'a>;
    type IntoIter = vec_deque::IntoIter<Rule<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s RuleSet<'a> {
    type Item = &'s Rule<'a>;
    type IntoIter = vec_deque::Iter<'s, Rule<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
