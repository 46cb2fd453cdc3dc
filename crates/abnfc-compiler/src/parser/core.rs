//! Parser state and low-level token operations.

use std::ops::Range;

use super::lexer::{SyntaxKind, Token};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Recursive-descent parser over a trivia-free token stream.
///
/// Productions return `None` after reporting a diagnostic; the rule loop
/// then skips to the next column-0 token.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    tokens: Vec<Token>,
    /// Parallel to `tokens`: the token begins a new rule.
    line_starts: Vec<bool>,
    pos: usize,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    recursion_fuel_limit: u32,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        let tokens: Vec<Token> = tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect();
        let line_starts = tokens.iter().map(|t| t.at_line_start(source)).collect();
        Self {
            source,
            tokens,
            line_starts,
            pos: 0,
            diagnostics: Diagnostics::new(),
            depth: 0,
            recursion_fuel_limit: super::DEFAULT_RECURSION_FUEL,
            fatal_error: None,
        }
    }

    pub fn with_recursion_fuel(mut self, limit: u32) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub(super) fn finish(self) -> Result<Diagnostics, Error> {
        match self.fatal_error {
            Some(err) => Err(err),
            None => Ok(self.diagnostics),
        }
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.has_fatal_error()
    }

    /// `None` at EOF.
    pub(super) fn current(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    pub(super) fn currently_is(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    pub(super) fn current_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len()..self.source.len(), |t| t.span.clone())
    }

    /// End offset of the last consumed token.
    pub(super) fn previous_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |t| t.span.end)
    }

    /// The current rule ends here: EOF or a token in column 0.
    pub(super) fn at_rule_end(&self) -> bool {
        self.line_starts.get(self.pos).copied().unwrap_or(true)
    }

    pub(super) fn bump(&mut self) -> Token {
        assert!(!self.eof(), "bump called at EOF");
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.currently_is(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Skip to the next token that starts a rule. Stays put if already there.
    pub(super) fn synchronize_to_rule_start(&mut self) {
        while !self.at_rule_end() {
            self.pos += 1;
        }
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.depth >= self.recursion_fuel_limit {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Report at the current token (or at EOF).
    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let span = self.error_span();
        self.diagnostics.report(kind).span(span).emit();
    }

    pub(super) fn error_at(&mut self, kind: DiagnosticKind, span: Range<usize>) {
        self.diagnostics.report(kind).span(span).emit();
    }

    pub(super) fn error_at_msg(
        &mut self,
        kind: DiagnosticKind,
        span: Range<usize>,
        message: impl Into<String>,
    ) {
        self.diagnostics.report(kind).span(span).message(message).emit();
    }

    /// A token of the next rule is not part of this one; point just past the
    /// last consumed token instead.
    fn error_span(&self) -> Range<usize> {
        if self.at_rule_end() {
            let end = self.previous_end();
            return end..end;
        }
        self.current_span()
    }
}
