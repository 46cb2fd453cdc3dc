//! Grammar productions for RFC 2234 ABNF (with RFC 7405 `%s`/`%i`).
//!
//! ```text
//! rulelist    = 1*rule
//! rule        = rulename ("=" / "=/") alternation
//! alternation = concatenation *("/" concatenation)
//! repetition  = [repeat] element
//! repeat      = 1*DIGIT / (*DIGIT "*" *DIGIT)
//! element     = rulename / group / option / char-val / num-val / prose-val
//! ```
//!
//! A rule continues until the next token in column 0.

use abnfc_core::build::{alternation, byte, concatenation, end, group, optional, range, rule_ref, string, token};
use abnfc_core::{Alternation, Concatenation, Element, INFINITY, Repetition, Rule, RuleSet, Text};

use super::core::Parser;
use super::lexer::{SyntaxKind, Token, token_text};
use crate::diagnostics::DiagnosticKind;

impl<'src> Parser<'src> {
    pub fn parse_rulelist(&mut self) -> RuleSet<'src> {
        let mut rules = RuleSet::new();

        while !self.should_stop() {
            if !self.at_rule_end() {
                // Only the very first token can be indented and still get here.
                let span = self.current_span();
                self.error_at(DiagnosticKind::IndentedRule, span);
                self.bump();
                self.synchronize_to_rule_start();
                continue;
            }
            self.parse_rule(&mut rules);
        }

        rules
    }

    /// Kind of the current token if it still belongs to the current rule.
    fn peek(&self) -> Option<SyntaxKind> {
        if self.at_rule_end() {
            return None;
        }
        self.current()
    }

    fn eat(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.peek() == Some(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn parse_rule(&mut self, rules: &mut RuleSet<'src>) {
        let Some(name) = self.eat_token(SyntaxKind::RuleName) else {
            let span = self.current_span();
            self.error_at(DiagnosticKind::ExpectedRuleName, span);
            self.bump();
            self.synchronize_to_rule_start();
            return;
        };
        let name_text = token_text(self.source, &name);

        let incremental = match self.peek() {
            Some(SyntaxKind::DefinedAs) => false,
            Some(SyntaxKind::DefinedAsIncremental) => true,
            _ => {
                self.error(DiagnosticKind::ExpectedDefinedAs);
                self.synchronize_to_rule_start();
                return;
            }
        };
        self.bump();

        let Some(body) = self.parse_alternation() else {
            self.synchronize_to_rule_start();
            return;
        };
        if !self.at_rule_end() {
            self.error(DiagnosticKind::UnexpectedToken);
            self.synchronize_to_rule_start();
            return;
        }

        log::trace!("parsed rule {name_text}");
        if !incremental {
            rules.push(Rule::new(name_text, body));
            return;
        }
        match rules
            .find(name_text.as_bytes())
            .and_then(|id| rules.get_mut(id))
        {
            Some(rule) => rule.body.extend(body),
            None => self.error_at_msg(DiagnosticKind::IncrementalWithoutBase, name.span, name_text),
        }
    }

    fn parse_alternation(&mut self) -> Option<Alternation<'src>> {
        let mut alternation = Alternation::new();
        alternation.push(self.parse_concatenation()?);
        while self.eat(SyntaxKind::Slash).is_some() {
            alternation.push(self.parse_concatenation()?);
        }
        Some(alternation)
    }

    fn parse_concatenation(&mut self) -> Option<Concatenation<'src>> {
        let mut concatenation = Concatenation::new();
        while self.peek().is_some_and(starts_repetition) {
            concatenation.push(self.parse_repetition()?);
        }
        if concatenation.is_empty() {
            self.error(DiagnosticKind::ExpectedElement);
            return None;
        }
        Some(concatenation)
    }

    fn parse_repetition(&mut self) -> Option<Repetition<'src>> {
        let (min, max) = self.parse_repeat()?;

        let Some(kind) = self.peek().filter(|&k| starts_element(k)) else {
            self.error(DiagnosticKind::ExpectedElement);
            return None;
        };

        if kind == SyntaxKind::BracketOpen {
            let body = self.parse_group(SyntaxKind::BracketClose, DiagnosticKind::UnclosedOption)?;
            let option = optional(group(body));
            if (min, max) == (1, 1) {
                return Some(option);
            }
            // n[x] repeats the option itself.
            let element = group(alternation(concatenation(option, end()), end()));
            return Some(Repetition { min, max, element });
        }

        let element = self.parse_element(kind)?;
        Some(Repetition { min, max, element })
    }

    /// `n`, `n*`, `*m`, `n*m`, `*`, or nothing for exactly once.
    fn parse_repeat(&mut self) -> Option<(u32, u32)> {
        let min = match self.eat(SyntaxKind::Number) {
            Some(number) => Some(self.parse_count(&number)?),
            None => None,
        };
        if self.eat(SyntaxKind::Star).is_none() {
            return Some(min.map_or((1, 1), |n| (n, n)));
        }
        let max = match self.eat(SyntaxKind::Number) {
            Some(number) => Some(self.parse_count(&number)?),
            None => None,
        };
        Some((min.unwrap_or(0), max.unwrap_or(INFINITY)))
    }

    fn parse_count(&mut self, number: &Token) -> Option<u32> {
        let text = token_text(self.source, number);
        match text.parse::<u32>() {
            Ok(n) if n != INFINITY => Some(n),
            _ => {
                self.error_at_msg(DiagnosticKind::InvalidNumber, number.span.clone(), text);
                None
            }
        }
    }

    fn parse_element(&mut self, kind: SyntaxKind) -> Option<Element<'src>> {
        match kind {
            SyntaxKind::RuleName => {
                let name = self.bump();
                Some(rule_ref(token_text(self.source, &name)))
            }
            SyntaxKind::ParenOpen => {
                let body = self.parse_group(SyntaxKind::ParenClose, DiagnosticKind::UnclosedGroup)?;
                Some(group(body))
            }
            SyntaxKind::CharVal | SyntaxKind::CaseInsensitiveVal => {
                let literal = self.bump();
                Some(token(quoted(self.source, &literal)))
            }
            SyntaxKind::CaseSensitiveVal => {
                let literal = self.bump();
                Some(string(quoted(self.source, &literal)))
            }
            SyntaxKind::NumVal => {
                let literal = self.bump();
                self.parse_num_val(&literal)
            }
            SyntaxKind::UnclosedCharVal => {
                let span = self.current_span();
                self.error_at(DiagnosticKind::UnclosedLiteral, span);
                None
            }
            SyntaxKind::ProseVal => {
                self.error(DiagnosticKind::ProseUnsupported);
                None
            }
            _ => {
                self.error(DiagnosticKind::ExpectedElement);
                None
            }
        }
    }

    fn parse_group(
        &mut self,
        close: SyntaxKind,
        unclosed: DiagnosticKind,
    ) -> Option<Alternation<'src>> {
        let open = self.bump();
        if !self.enter_recursion() {
            return None;
        }
        let body = self.parse_alternation();
        self.exit_recursion();
        let body = body?;

        if self.eat(close).is_none() {
            let span = open.span.start..self.previous_end();
            self.error_at(unclosed, span);
            return None;
        }
        Some(body)
    }

    /// `%x41`, `%x41-5A` or `%x41.42.43` (also `%b`, `%d`).
    fn parse_num_val(&mut self, literal: &Token) -> Option<Element<'src>> {
        let text = token_text(self.source, literal);
        let radix = match text.as_bytes()[1].to_ascii_lowercase() {
            b'b' => 2,
            b'd' => 10,
            _ => 16,
        };
        let body = &text[2..];

        if let Some((lo, hi)) = body.split_once('-') {
            let lo = self.parse_byte(lo, radix, literal)?;
            let hi = self.parse_byte(hi, radix, literal)?;
            return Some(range(lo, hi));
        }

        let mut bytes = Vec::new();
        for part in body.split('.') {
            bytes.push(self.parse_byte(part, radix, literal)?);
        }
        match bytes.as_slice() {
            [b] => Some(byte(*b)),
            _ => Some(string(Text::owned(bytes))),
        }
    }

    fn parse_byte(&mut self, digits: &str, radix: u32, literal: &Token) -> Option<u8> {
        let text = token_text(self.source, literal);
        let kind = match u32::from_str_radix(digits, radix) {
            Ok(value) => match u8::try_from(value) {
                Ok(b) => return Some(b),
                Err(_) => DiagnosticKind::NumberTooLarge,
            },
            Err(_) => DiagnosticKind::InvalidNumber,
        };
        self.error_at_msg(kind, literal.span.clone(), text);
        None
    }
}

fn starts_repetition(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Number | SyntaxKind::Star) || starts_element(kind)
}

fn starts_element(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::RuleName
            | SyntaxKind::ParenOpen
            | SyntaxKind::BracketOpen
            | SyntaxKind::CharVal
            | SyntaxKind::UnclosedCharVal
            | SyntaxKind::CaseSensitiveVal
            | SyntaxKind::CaseInsensitiveVal
            | SyntaxKind::NumVal
            | SyntaxKind::ProseVal
    )
}

/// Interior of `"..."`, `%s"..."` or `%i"..."`.
fn quoted<'src>(source: &'src str, token: &Token) -> &'src str {
    let text = token_text(source, token);
    let open = text.find('"').map_or(0, |i| i + 1);
    &text[open..text.len() - 1]
}
