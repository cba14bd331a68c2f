//! The diagnostic sink: the single place lexical, syntactic, and dispatch
//! errors are recorded on their way to standard error.
//!
//! No part of the core ever panics or returns an exception on malformed
//! input; failures become [`Diagnostic`] values pushed onto a [`DiagnosticSink`]
//! plus an empty/`None` result at the call site.

use std::fmt;

/// Where, within the source, a diagnostic applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Where {
    /// No location is attached.
    None,
    /// The error was detected at the end of input.
    EndOfFile,
    /// The error was detected at a specific offending token's lexeme.
    Token(String),
}

/// A single reported error, formatted per the CLI diagnostics contract:
/// `[line L] Error <where>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub where_: Where,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: u32, where_: Where, message: impl Into<String>) -> Self {
        Self {
            line,
            where_,
            message: message.into(),
        }
    }

    pub fn at_token(line: u32, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(line, Where::Token(token.into()), message)
    }

    pub fn at_eof(line: u32, message: impl Into<String>) -> Self {
        Self::new(line, Where::EndOfFile, message)
    }

    pub fn plain(line: u32, message: impl Into<String>) -> Self {
        Self::new(line, Where::None, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let where_str = match &self.where_ {
            Where::None => String::new(),
            Where::EndOfFile => " at end of file".to_string(),
            Where::Token(tok) => format!(" at '{tok}'"),
        };
        write!(f, "[line {}] Error{}: {}", self.line, where_str, self.message)
    }
}

/// Accumulates diagnostics over the course of one lex/parse/analyze run.
/// Write-once per run, read-many afterward — matching the rest of the
/// core's "no concurrent mutation" resource model.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::error!(target: "diagnostics", line = diagnostic.line, "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Writes every accumulated diagnostic, one per line, to `w` — the CLI
    /// uses this to drain the sink to standard error.
    pub fn write_all(&self, mut w: impl std::io::Write) -> std::io::Result<()> {
        for diagnostic in &self.diagnostics {
            writeln!(w, "{diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_token_location() {
        let d = Diagnostic::at_token(3, "}", "unexpected token");
        assert_eq!(d.to_string(), "[line 3] Error at '}': unexpected token");
    }

    #[test]
    fn formats_eof_location() {
        let d = Diagnostic::at_eof(7, "unexpected end of input");
        assert_eq!(d.to_string(), "[line 7] Error at end of file: unexpected end of input");
    }

    #[test]
    fn formats_no_location() {
        let d = Diagnostic::plain(1, "unknown analysis 'bogus'");
        assert_eq!(d.to_string(), "[line 1] Error: unknown analysis 'bogus'");
    }

    #[test]
    fn sink_accumulates_in_order() {
        let mut sink = DiagnosticSink::new();
        sink.push(Diagnostic::plain(1, "first"));
        sink.push(Diagnostic::plain(2, "second"));
        let rendered: Vec<String> = sink.iter().map(|d| d.message.clone()).collect();
        assert_eq!(rendered, vec!["first".to_string(), "second".to_string()]);
    }
}
