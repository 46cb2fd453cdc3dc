//! Findings of the parser, validator and dependency resolver.

mod message;
mod printer;

#[cfg(test)]
mod diagnostics_tests;

use std::ops::Range;

pub use message::{DiagnosticKind, DiagnosticMessage};
pub use printer::DiagnosticsPrinter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Start a diagnostic of the given kind.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Every finding fails the grammar.
    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.messages.len()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.messages.iter().filter(|m| m.kind == kind).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    /// Plain rendering, one line per finding.
    pub fn render(&self) -> String {
        self.printer().render()
    }

    /// Rendering with source excerpts for findings that carry a range.
    pub fn render_source(&self, source: &str, path: Option<&str>, colored: bool) -> String {
        let mut printer = self.printer().source(source).colored(colored);
        if let Some(path) = path {
            printer = printer.path(path);
        }
        printer.render()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    /// Attribute the finding to a rule.
    pub fn rule(mut self, name: impl Into<String>) -> Self {
        self.message.rule = Some(name.into());
        self
    }

    pub fn span(mut self, range: Range<usize>) -> Self {
        self.message.range = Some(range);
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
