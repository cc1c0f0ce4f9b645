//! Diagnostic reporting — the four error kinds of spec.md §7, plus lexer
//! warnings, collected by a [`Handler`] shared across one compilation.

use std::fmt;

use crate::source::{SourceFile, Span};

/// Severity of a diagnostic. Only `Error` sets the compilation's error
/// flag; `Warning` never blocks output (spec.md §7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// The four recoverable error kinds from spec.md §7, plus `Lex` for
/// tokenizer-level warnings that never set the error flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Name,
    Type,
    Runtime,
    Lex,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax"),
            ErrorKind::Name => write!(f, "name"),
            ErrorKind::Type => write!(f, "type"),
            ErrorKind::Runtime => write!(f, "runtime"),
            ErrorKind::Lex => write!(f, "lex"),
        }
    }
}

/// A single diagnostic: file path, 1-based line, offending snippet, and
/// explanation, matching the fields spec.md §7 requires in output.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    pub snippet: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {} — {}", self.level, self.kind, self.span, self.message)?;
        if let Some(snippet) = &self.snippet {
            write!(f, "\n    {}", snippet)?;
        }
        Ok(())
    }
}

/// Fluent constructor for a [`Diagnostic`], mirroring the teacher's
/// `DiagnosticBuilder` but scoped to the fields corec actually uses.
pub struct DiagnosticBuilder {
    level: Level,
    kind: ErrorKind,
    message: String,
    span: Span,
    snippet: Option<String>,
}

impl DiagnosticBuilder {
    pub fn error(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Error,
            kind,
            message: message.into(),
            span,
            snippet: None,
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Warning,
            kind: ErrorKind::Lex,
            message: message.into(),
            span,
            snippet: None,
        }
    }

    /// Attaches the stripped source line for this diagnostic's span.
    pub fn with_source(mut self, source: &SourceFile) -> Self {
        self.snippet = Some(source.snippet(self.span.line).to_string());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            kind: self.kind,
            message: self.message,
            span: self.span,
            snippet: self.snippet,
        }
    }

    pub fn emit(self, handler: &mut Handler) {
        handler.emit(self.build());
    }
}

/// Accumulates diagnostics for one compilation. Owned by the `Parser` and
/// threaded through the lexer/symbol table/emitter (all of which report
/// through it rather than returning errors directly up the call stack),
/// per the Design Notes in spec.md §9 ("exceptions-for-control-flow ...
/// expressed as a result type whose error variant is pattern-matched").
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.level == Level::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.level == Level::Warning).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_sets_flag_warning_does_not() {
        let mut h = Handler::new();
        assert!(!h.has_errors());
        DiagnosticBuilder::warning("unclosed string", Span::new(1)).emit(&mut h);
        assert!(!h.has_errors());
        DiagnosticBuilder::error(ErrorKind::Syntax, "expected ';'", Span::new(2)).emit(&mut h);
        assert!(h.has_errors());
        assert_eq!(h.error_count(), 1);
        assert_eq!(h.warning_count(), 1);
    }

    #[test]
    fn snippet_attaches_trimmed_line() {
        let source = SourceFile::from_string("t.src".into(), "  x := 1  \n".to_string());
        let diag = DiagnosticBuilder::error(ErrorKind::Type, "mismatch", Span::new(1))
            .with_source(&source)
            .build();
        assert_eq!(diag.snippet.as_deref(), Some("x := 1"));
    }
}
