//! corec-util — source loading, spans, and diagnostics.
//!
//! Shared foundation used by every other crate in the workspace: the
//! [`SourceFile`] buffer the lexer reads from, the [`Span`] that tags a
//! lexeme's position, and the [`Diagnostic`]/[`Handler`] pair that
//! accumulates errors and warnings across one compilation.

mod diagnostic;
mod source;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, ErrorKind, Handler, Level};
pub use source::{SourceFile, Span};
