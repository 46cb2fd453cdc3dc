//! Construction API.
//!
//! `rule`, `alternation` and `concatenation` prepend a node onto an existing
//! chain and return the new head, so nested calls read in declaration order
//! and every chain ends in an explicit [`end()`]:
//!
//! ```
//! use abnfc_core::build::*;
//!
//! let rules = rule(
//!     "greeting",
//!     alternation(
//!         concatenation(once(token(b"hi")), end()),
//!         alternation(concatenation(once(token(b"bye")), end()), end()),
//!     ),
//!     end(),
//! );
//! assert_eq!(rules.len(), 1);
//! assert_eq!(rules.iter().next().unwrap().body.len(), 2);
//! ```
//!
//! Nothing here validates; `repetition(e, 0, 0)` builds fine and is
//! reported by the compiler's checker.

pub use crate::ir::INFINITY;
pub use crate::text::Text;

use crate::ir::{Action, ActionFn, Alternation, Concatenation, Element, Repetition, Rule, RuleRef, RuleSet};

/// Empty span marker for generated code.
pub const NULL: Text<'static> = Text::NULL;

/// Terminates a rule, alternation or concatenation chain.
pub fn end<T: Default>() -> T {
    T::default()
}

pub fn rule<'a>(
    name: impl Into<Text<'a>>,
    body: Alternation<'a>,
    mut next: RuleSet<'a>,
) -> RuleSet<'a> {
    next.prepend(Rule::new(name, body));
    next
}

pub fn alternation<'a>(
    concatenation: Concatenation<'a>,
    mut next: Alternation<'a>,
) -> Alternation<'a> {
    next.prepend(concatenation);
    next
}

pub fn concatenation<'a>(
    repetition: Repetition<'a>,
    mut next: Concatenation<'a>,
) -> Concatenation<'a> {
    next.prepend(repetition);
    next
}

pub fn repetition(element: Element<'_>, min: u32, max: u32) -> Repetition<'_> {
    Repetition { min, max, element }
}

pub fn optional(element: Element<'_>) -> Repetition<'_> {
    repetition(element, 0, 1)
}

pub fn once(element: Element<'_>) -> Repetition<'_> {
    repetition(element, 1, 1)
}

pub fn any(element: Element<'_>) -> Repetition<'_> {
    repetition(element, 0, INFINITY)
}

pub fn more(element: Element<'_>) -> Repetition<'_> {
    repetition(element, 1, INFINITY)
}

pub fn empty<'a>() -> Element<'a> {
    Element::Empty
}

pub fn rule_ref<'a>(name: impl Into<Text<'a>>) -> Element<'a> {
    Element::RuleRef(RuleRef {
        name: name.into(),
        resolved: None,
    })
}

pub fn range<'a>(lo: u8, hi: u8) -> Element<'a> {
    Element::Range { lo, hi }
}

pub fn byte<'a>(b: u8) -> Element<'a> {
    range(b, b)
}

pub fn string<'a>(bytes: impl Into<Text<'a>>) -> Element<'a> {
    Element::String(bytes.into())
}

pub fn token<'a>(bytes: impl Into<Text<'a>>) -> Element<'a> {
    Element::Token(bytes.into())
}

pub fn group(body: Alternation<'_>) -> Element<'_> {
    Element::Group(body)
}

pub fn action<'a>(callback: ActionFn, user_data: usize) -> Element<'a> {
    Element::Action(Action {
        callback,
        user_data,
    })
}
