//! Lexical analysis: turns a [`corec_util::SourceFile`] into a stream of
//! [`Token`]s, reporting malformed lexemes as recoverable warnings rather
//! than aborting (spec.md §4.1, §7).

mod cursor;
mod keywords;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
