//! Reader for self-reconstruction text.
//!
//! Accepts the construction-call expression written by
//! [`crate::emit::SelfRulesEmitter`], either bare or inside the generated
//! function (everything before `rule_list =` is skipped), followed by any
//! number of `rule_list.assign_origin(a..b, "label");` statements. Nodes
//! are rebuilt through `abnfc_core::build`, so the result is structurally
//! identical to the tree that was emitted.
//!
//! The text is machine-written: the first problem stops the reader.

use std::borrow::Cow;
use std::ops::Range;

use abnfc_core::build::{
    INFINITY, NULL, alternation, any, byte, concatenation, empty, end, group, more, once,
    optional, range, repetition, rule, rule_ref, string, token,
};
use abnfc_core::{Alternation, Concatenation, Element, Repetition, RuleSet, Text};
use logos::Logos;

use super::DEFAULT_RECURSION_FUEL;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{Error, PassResult};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
enum Kind {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"0[xX][0-9A-Fa-f]+")]
    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    Str,

    #[regex(r#"b"(?:[^"\\]|\\.)*""#)]
    ByteStr,

    #[regex(r"b'(?:[^'\\]|\\x[0-9A-Fa-f]{2}|\\.)'")]
    ByteChar,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("..")]
    DotDot,

    #[token(".")]
    Dot,

    #[token("=")]
    Equals,

    /// Everything else in the generated preamble (`->`, `'static`, braces).
    Other,
}

#[derive(Debug, Clone)]
struct Token {
    kind: Kind,
    span: Range<usize>,
}

struct Reader<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    diagnostics: Diagnostics,
    fatal_error: Option<Error>,
}

/// Read self-reconstruction text back into a [`RuleSet`].
///
/// Returns Err on fuel exhaustion; malformed text is a diagnostic.
pub fn parse_self_rules(source: &str) -> PassResult<RuleSet<'_>> {
    let mut reader = Reader::new(source);
    let rules = reader.read().unwrap_or_default();
    if let Some(err) = reader.fatal_error {
        return Err(err);
    }
    log::debug!("read {} rules from self-reconstruction text", rules.len());
    Ok((rules, reader.diagnostics))
}

impl<'src> Reader<'src> {
    fn new(source: &'src str) -> Self {
        let mut lexer = Kind::lexer(source);
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            let kind = result.unwrap_or(Kind::Other);
            tokens.push(Token {
                kind,
                span: lexer.span(),
            });
        }
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            diagnostics: Diagnostics::new(),
            fatal_error: None,
        }
    }

    fn read(&mut self) -> Option<RuleSet<'src>> {
        self.skip_preamble();
        let mut rules = self.rule_chain()?;
        self.eat(Kind::Semicolon);

        while self.at_ident("rule_list") && self.nth_kind(1) == Some(Kind::Dot) {
            self.pos += 2;
            self.keyword("assign_origin")?;
            self.expect(Kind::ParenOpen, "`(`")?;
            let first = self.index()?;
            self.expect(Kind::DotDot, "`..`")?;
            let last = self.index()?;
            self.expect(Kind::Comma, "`,`")?;
            let origin = self.text()?;
            self.expect(Kind::ParenClose, "`)`")?;
            self.expect(Kind::Semicolon, "`;`")?;
            rules.assign_origin(first..last, origin);
        }

        Some(rules)
    }

    /// Position after `rule_list =` if present, otherwise the start.
    fn skip_preamble(&mut self) {
        let found = self.tokens.windows(2).position(|pair| {
            pair[0].kind == Kind::Ident
                && &self.source[pair[0].span.clone()] == "rule_list"
                && pair[1].kind == Kind::Equals
        });
        if let Some(i) = found {
            self.pos = i + 2;
        }
    }

    fn rule_chain(&mut self) -> Option<RuleSet<'src>> {
        if self.at_ident("next") {
            self.pos += 1;
            return Some(RuleSet::new());
        }
        if self.at_end_marker() {
            return Some(end());
        }
        self.keyword("rule")?;
        self.nested(|r| {
            r.expect(Kind::ParenOpen, "`(`")?;
            let name = r.text()?;
            r.expect(Kind::Comma, "`,`")?;
            let body = r.alternation()?;
            r.expect(Kind::Comma, "`,`")?;
            let next = r.rule_chain()?;
            r.expect(Kind::ParenClose, "`)`")?;
            Some(rule(name, body, next))
        })
    }

    fn alternation(&mut self) -> Option<Alternation<'src>> {
        if self.at_end_marker() {
            return Some(end());
        }
        self.keyword("alternation")?;
        self.nested(|r| {
            r.expect(Kind::ParenOpen, "`(`")?;
            let head = r.concatenation()?;
            r.expect(Kind::Comma, "`,`")?;
            let next = r.alternation()?;
            r.expect(Kind::ParenClose, "`)`")?;
            Some(alternation(head, next))
        })
    }

    fn concatenation(&mut self) -> Option<Concatenation<'src>> {
        if self.at_end_marker() {
            return Some(end());
        }
        self.keyword("concatenation")?;
        self.nested(|r| {
            r.expect(Kind::ParenOpen, "`(`")?;
            let head = r.repetition()?;
            r.expect(Kind::Comma, "`,`")?;
            let next = r.concatenation()?;
            r.expect(Kind::ParenClose, "`)`")?;
            Some(concatenation(head, next))
        })
    }

    fn repetition(&mut self) -> Option<Repetition<'src>> {
        let name = self.ident("a repetition")?;
        if !matches!(name, "optional" | "once" | "any" | "more" | "repetition") {
            self.pos -= 1;
            return self.fail_expected("a repetition");
        }
        self.expect(Kind::ParenOpen, "`(`")?;
        let element = self.element()?;
        let rep = match name {
            "optional" => optional(element),
            "once" => once(element),
            "any" => any(element),
            "more" => more(element),
            _ => {
                self.expect(Kind::Comma, "`,`")?;
                let min = self.count()?;
                self.expect(Kind::Comma, "`,`")?;
                let max = self.count()?;
                repetition(element, min, max)
            }
        };
        self.expect(Kind::ParenClose, "`)`")?;
        Some(rep)
    }

    fn element(&mut self) -> Option<Element<'src>> {
        let name = self.ident("an element")?;
        if !matches!(
            name,
            "empty" | "rule_ref" | "byte" | "range" | "string" | "token" | "group"
        ) {
            self.pos -= 1;
            return self.fail_expected("an element");
        }
        self.expect(Kind::ParenOpen, "`(`")?;
        let element = match name {
            "empty" => empty(),
            "rule_ref" => rule_ref(self.text()?),
            "byte" => byte(self.byte()?),
            "range" => {
                let lo = self.byte()?;
                self.expect(Kind::Comma, "`,`")?;
                let hi = self.byte()?;
                range(lo, hi)
            }
            "string" => string(self.text()?),
            "token" => token(self.text()?),
            _ => group(self.nested(|r| r.alternation())?),
        };
        self.expect(Kind::ParenClose, "`)`")?;
        Some(element)
    }

    /// `"..."`, `b"..."` or `NULL`.
    fn text(&mut self) -> Option<Text<'src>> {
        if self.at_ident("NULL") {
            self.pos += 1;
            return Some(NULL);
        }
        let token = self.current_token()?;
        let quoted = match token.kind {
            Kind::Str => &self.source[token.span.start + 1..token.span.end - 1],
            Kind::ByteStr => &self.source[token.span.start + 2..token.span.end - 1],
            _ => return self.fail_expected("a string literal"),
        };
        let bytes = match unescape(quoted) {
            Some(bytes) => bytes,
            None => return self.fail(DiagnosticKind::InvalidEscape),
        };
        self.pos += 1;
        Some(match bytes {
            Cow::Borrowed(bytes) => Text::borrowed(bytes),
            Cow::Owned(bytes) => Text::owned(bytes),
        })
    }

    /// `b'c'` or an integer that fits in a byte.
    fn byte(&mut self) -> Option<u8> {
        let token = self.current_token()?;
        let text = &self.source[token.span.clone()];
        let value = match token.kind {
            Kind::ByteChar => match unescape(&text[2..text.len() - 1]).as_deref() {
                Some([b]) => *b,
                _ => return self.fail(DiagnosticKind::InvalidEscape),
            },
            Kind::Int => match parse_int(text).map(u8::try_from) {
                Some(Ok(b)) => b,
                Some(Err(_)) => return self.fail_msg(DiagnosticKind::NumberTooLarge, text),
                None => return self.fail_msg(DiagnosticKind::InvalidNumber, text),
            },
            _ => return self.fail_expected("a byte"),
        };
        self.pos += 1;
        Some(value)
    }

    /// Repetition bound: integer or `INFINITY`.
    fn count(&mut self) -> Option<u32> {
        if self.at_ident("INFINITY") {
            self.pos += 1;
            return Some(INFINITY);
        }
        let token = self.current_token()?;
        if token.kind != Kind::Int {
            return self.fail_expected("a repetition bound");
        }
        let text = &self.source[token.span.clone()];
        let Some(value) = parse_int(text).and_then(|v| u32::try_from(v).ok()) else {
            return self.fail_msg(DiagnosticKind::InvalidNumber, text);
        };
        self.pos += 1;
        Some(value)
    }

    fn index(&mut self) -> Option<usize> {
        let token = self.current_token()?;
        if token.kind != Kind::Int {
            return self.fail_expected("an index");
        }
        let text = &self.source[token.span.clone()];
        let Some(value) = parse_int(text).and_then(|v| usize::try_from(v).ok()) else {
            return self.fail_msg(DiagnosticKind::InvalidNumber, text);
        };
        self.pos += 1;
        Some(value)
    }

    /// `end()`, consumed if present.
    fn at_end_marker(&mut self) -> bool {
        if self.at_ident("end")
            && self.nth_kind(1) == Some(Kind::ParenOpen)
            && self.nth_kind(2) == Some(Kind::ParenClose)
        {
            self.pos += 3;
            return true;
        }
        false
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth >= DEFAULT_RECURSION_FUEL {
            self.fatal_error.get_or_insert(Error::RecursionLimitExceeded);
            return None;
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn nth_kind(&self, n: usize) -> Option<Kind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at_ident(&self, name: &str) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|t| t.kind == Kind::Ident && &self.source[t.span.clone()] == name)
    }

    fn current_token(&mut self) -> Option<Token> {
        match self.tokens.get(self.pos) {
            Some(token) => Some(token.clone()),
            None => self.fail_expected("more input"),
        }
    }

    fn ident(&mut self, what: &str) -> Option<&'src str> {
        let token = self.current_token()?;
        if token.kind != Kind::Ident {
            return self.fail_expected(what);
        }
        self.pos += 1;
        Some(&self.source[token.span])
    }

    fn keyword(&mut self, name: &str) -> Option<()> {
        if !self.at_ident(name) {
            return self.fail_expected(&format!("`{name}`"));
        }
        self.pos += 1;
        Some(())
    }

    fn expect(&mut self, kind: Kind, what: &str) -> Option<()> {
        if self.nth_kind(0) != Some(kind) {
            return self.fail_expected(what);
        }
        self.pos += 1;
        Some(())
    }

    fn eat(&mut self, kind: Kind) -> bool {
        if self.nth_kind(0) == Some(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len()..self.source.len(), |t| t.span.clone())
    }

    fn fail<T>(&mut self, kind: DiagnosticKind) -> Option<T> {
        let span = self.span();
        self.diagnostics.report(kind).span(span).emit();
        None
    }

    fn fail_msg<T>(&mut self, kind: DiagnosticKind, message: &str) -> Option<T> {
        let span = self.span();
        self.diagnostics.report(kind).span(span).message(message).emit();
        None
    }

    fn fail_expected<T>(&mut self, what: &str) -> Option<T> {
        self.fail_msg(DiagnosticKind::ExpectedToken, what)
    }
}

fn parse_int(text: &str) -> Option<u64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Decode the escapes the emitter writes. Borrows when there are none.
fn unescape(text: &str) -> Option<Cow<'_, [u8]>> {
    let bytes = text.as_bytes();
    if !bytes.contains(&b'\\') {
        return Some(Cow::Borrowed(bytes));
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied();
    while let Some(b) = iter.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        let decoded = match iter.next()? {
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'0' => 0,
            b'\\' => b'\\',
            b'"' => b'"',
            b'\'' => b'\'',
            b'x' => {
                let hi = (iter.next()? as char).to_digit(16)?;
                let lo = (iter.next()? as char).to_digit(16)?;
                (hi * 16 + lo) as u8
            }
            _ => return None,
        };
        out.push(decoded);
    }
    Some(Cow::Owned(out))
}
