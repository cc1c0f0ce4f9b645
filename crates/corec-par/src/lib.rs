//! corec-par — Parser + Type Checker
//!
//! ============================================================================
//! ONE PASS, FOUR JOBS
//! ============================================================================
//!
//! This is a recursive-descent parser over an LL(2) grammar (one current
//! token, one token of lookahead) that does not build an AST. Each grammar
//! production is a function that, as it recognizes its piece of the input,
//! also resolves names against the symbol table, checks the types flowing
//! through it, and asks the code emitter to append the corresponding target
//! text — all in the same call. There is no separate "compile the tree"
//! phase; by the time `parse_program` returns, the emitter's buffer either
//! holds the whole translation or the compilation's error flag is set.
//!
//! The class-inheritance framing in some descriptions of this kind of
//! compiler ("the parser is-a lexer is-a source buffer") is composition
//! here instead: `Parser` owns a `Lexer`, a `SymbolTable`, and an `Emitter`
//! by value. None of the three is shared or reference-counted.
//!
//! ============================================================================
//! LOOKAHEAD
//! ============================================================================
//!
//! Two tokens are live at all times: `current` (about to be matched) and
//! `future` (used only to disambiguate a procedure call from an assignment
//! — `ident (` is a call, anything else starting with `ident` is not).
//! `advance` slides `future` into `current` and pulls one new token from
//! the lexer; there is no backtracking.
//!
//! ============================================================================
//! ERROR RECOVERY
//! ============================================================================
//!
//! A syntax, name, type, or (static) runtime error inside a declaration or
//! statement does not abort the compilation. It is recorded, the error
//! flag is set, and the parser discards tokens until it reaches `;`,
//! then resumes with the next declaration or statement. Lexer warnings
//! never set the flag. The emitted file is written only if the flag is
//! still clear once the whole program has been consumed.

mod decl;
mod expr;
mod stmt;

use corec_gen::{install_runtime_procedures, Emitter};
use corec_lex::{Lexer, Token, TokenKind};
use corec_sym::{SymbolError, SymbolTable};
use corec_util::{Diagnostic, DiagnosticBuilder, ErrorKind, Handler, SourceFile, Span};

pub(crate) use expr::Operand;

/// A recoverable parse/name/type/runtime failure (spec.md §7). Carries
/// enough to become a [`Diagnostic`] once reported.
#[derive(Debug, Clone)]
pub(crate) struct ParseError {
    kind: ErrorKind,
    message: String,
    line: u32,
}

pub(crate) type PResult<T> = Result<T, ParseError>;

/// The result of one compilation: whether it succeeded, the accumulated
/// diagnostics (lexer warnings and parser errors/warnings merged), and the
/// emitter — whose buffer is only meaningful to commit when `success`.
pub struct CompileOutput {
    pub success: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub emitter: Emitter,
    /// Names declared in the global scope, for `corec-drv`'s `--emit-symbols`.
    pub global_names: Vec<String>,
}

/// Drives the lexer, symbol table, and emitter through one compilation
/// (spec.md §9: "make the components concrete and hold them by value").
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    symbols: SymbolTable,
    emitter: Emitter,
    handler: Handler,
    source: &'a SourceFile,
    current: Token,
    future: Token,
    runtime_labels: Vec<(String, u32)>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a SourceFile, debug: bool) -> Self {
        let mut lexer = Lexer::new(source);
        let mut symbols = SymbolTable::new();
        let mut emitter = Emitter::new(debug);
        let runtime_labels = install_runtime_procedures(&mut symbols, &mut emitter);

        let current = lexer.next_token();
        let future = lexer.next_token();

        Self {
            lexer,
            symbols,
            emitter,
            handler: Handler::new(),
            source,
            current,
            future,
            runtime_labels,
        }
    }

    /// Consumes `current`, pulls a fresh token from the lexer into `future`,
    /// and returns the token that was consumed.
    fn advance(&mut self) -> Token {
        let consumed = std::mem::replace(&mut self.current, self.future.clone());
        self.future = self.lexer.next_token();
        consumed
    }

    fn check(&self, kind: TokenKind, value: &str) -> bool {
        self.current.kind == kind && self.current.value == value
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn accept(&mut self, kind: TokenKind, value: &str) -> Option<Token> {
        if self.check(kind, value) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes and returns `current` iff it is of `kind`, regardless of
    /// value (used for identifier/integer/float/string literals).
    fn accept_kind(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check_kind(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn match_tok(&mut self, kind: TokenKind, value: &str) -> PResult<Token> {
        self.accept(kind, value)
            .ok_or_else(|| self.error(ErrorKind::Syntax, format!("expected '{value}', found {}", self.current)))
    }

    fn match_kind(&mut self, kind: TokenKind) -> PResult<Token> {
        self.accept_kind(kind)
            .ok_or_else(|| self.error(ErrorKind::Syntax, format!("expected {kind}, found {}", self.current)))
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            line: self.current.line,
        }
    }

    fn error_at(&self, kind: ErrorKind, line: u32, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            line,
        }
    }

    fn sym_err_at(&self, err: SymbolError, line: u32) -> ParseError {
        self.error_at(ErrorKind::Name, line, err.to_string())
    }

    fn report(&mut self, err: ParseError) {
        DiagnosticBuilder::error(err.kind, err.message, Span::new(err.line))
            .with_source(self.source)
            .emit(&mut self.handler);
    }

    fn warn(&mut self, message: impl Into<String>, line: u32) {
        DiagnosticBuilder::warning(message.into(), Span::new(line))
            .with_source(self.source)
            .emit(&mut self.handler);
    }

    /// Discards tokens up to and including the next `;` (or stops at
    /// end-of-file), the recovery policy from spec.md §4.3.
    fn recover(&mut self) {
        while self.current.kind != TokenKind::Eof && !self.check(TokenKind::Symbol, ";") {
            self.advance();
        }
        if self.check(TokenKind::Symbol, ";") {
            self.advance();
        }
    }

    fn run(&mut self) {
        if let Err(e) = self.program() {
            self.report(e);
            self.recover();
        }
        if self.current.kind != TokenKind::Eof {
            let line = self.current.line;
            self.warn("trailing tokens after 'end program' are ignored", line);
        }
    }
}

/// Compiles `source` in one pass, producing either committable emitter
/// output or a set of diagnostics explaining why not.
pub fn compile(source: &SourceFile, debug: bool) -> CompileOutput {
    let mut parser = Parser::new(source, debug);
    parser.run();

    let success = !parser.handler.has_errors();
    let mut diagnostics: Vec<Diagnostic> = parser.handler.diagnostics().to_vec();
    diagnostics.extend(parser.lexer.handler().diagnostics().iter().cloned());
    let global_names = parser.symbols.global_names().into_iter().map(String::from).collect();

    CompileOutput {
        success,
        diagnostics,
        emitter: parser.emitter,
        global_names,
    }
}
