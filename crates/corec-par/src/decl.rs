//! `program` / `program_body` / `decl` / `var_decl` / `proc_decl` /
//! `param_list` (spec.md §4.3 grammar).

use corec_lex::TokenKind;
use corec_sym::{Direction, Identifier, Owner, Parameter, Type};
use corec_util::ErrorKind;

use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn program(&mut self) -> PResult<()> {
        self.match_tok(TokenKind::Keyword, "program")?;
        let name_tok = self.match_kind(TokenKind::Identifier)?;
        self.match_tok(TokenKind::Keyword, "is")?;

        let label_id = self.emitter.mint_label();
        self.emitter.prologue();
        self.emitter.program_entry(&name_tok.value, label_id);

        self.symbols.push_scope(Owner::Global);
        self.emitter.reset_local_ptr();
        self.decl_list();

        self.match_tok(TokenKind::Keyword, "begin")?;
        self.emitter.label(&name_tok.value, label_id);
        self.emitter.label_begin(&name_tok.value, label_id);
        self.stmt_list();
        self.emitter.end_program_body();

        self.match_tok(TokenKind::Keyword, "end")?;
        self.match_tok(TokenKind::Keyword, "program")?;
        self.symbols.pop_scope();

        let labels = self.runtime_labels.clone();
        self.emitter.emit_runtime_procedures(&labels);
        self.emitter.epilogue();
        Ok(())
    }

    /// True if `current` begins a `decl` (spec.md grammar: `['global']
    /// (proc_decl | var_decl)`).
    pub(crate) fn decl_starts(&self) -> bool {
        self.current.kind == TokenKind::Keyword
            && matches!(
                self.current.value.as_str(),
                "global" | "procedure" | "integer" | "float" | "bool" | "string"
            )
    }

    pub(crate) fn decl_list(&mut self) {
        while self.decl_starts() {
            self.decl_and_semi();
        }
    }

    fn decl_and_semi(&mut self) {
        if let Err(e) = self.decl() {
            self.report(e);
            self.recover();
            return;
        }
        if let Err(e) = self.match_tok(TokenKind::Symbol, ";") {
            self.report(e);
            self.recover();
        }
    }

    fn decl(&mut self) -> PResult<()> {
        let is_global = self.accept(TokenKind::Keyword, "global").is_some();
        if self.check(TokenKind::Keyword, "procedure") {
            self.proc_decl(is_global)
        } else {
            self.var_decl(is_global)
        }
    }

    /// `type_mark ident ['[' integer_literal ']']`, shared by `var_decl`
    /// and `param`.
    fn var_decl_head(&mut self) -> PResult<(String, Type, Option<u32>)> {
        let ty = self.type_mark()?;
        let name_tok = self.match_kind(TokenKind::Identifier)?;
        let size = if self.accept(TokenKind::Symbol, "[").is_some() {
            let size_tok = self.match_kind(TokenKind::Integer)?;
            self.match_tok(TokenKind::Symbol, "]")?;
            let n: u32 = size_tok.value.parse().map_err(|_| {
                self.error_at(ErrorKind::Syntax, size_tok.line, "array size must be a non-negative integer")
            })?;
            Some(n)
        } else {
            None
        };
        Ok((name_tok.value, ty, size))
    }

    fn type_mark(&mut self) -> PResult<Type> {
        const TYPES: &[(&str, Type)] = &[
            ("integer", Type::Integer),
            ("float", Type::Float),
            ("bool", Type::Bool),
            ("string", Type::String),
        ];
        for (keyword, ty) in TYPES {
            if self.accept(TokenKind::Keyword, keyword).is_some() {
                return Ok(*ty);
            }
        }
        Err(self.error(ErrorKind::Syntax, format!("expected a type, found {}", self.current)))
    }

    fn var_decl(&mut self, is_global: bool) -> PResult<()> {
        let line = self.current.line;
        let (name, ty, size) = self.var_decl_head()?;
        let mem_ptr = if is_global {
            self.emitter.alloc_global()
        } else {
            self.emitter.alloc_local()
        };
        let id = Identifier::variable(name, ty, size, mem_ptr);
        self.symbols.add(id, is_global).map_err(|e| self.sym_err_at(e, line))
    }

    fn proc_decl(&mut self, is_global: bool) -> PResult<()> {
        self.match_tok(TokenKind::Keyword, "procedure")?;
        let name_tok = self.match_kind(TokenKind::Identifier)?;
        let label_id = self.emitter.mint_label();

        self.match_tok(TokenKind::Symbol, "(")?;
        self.emitter.reset_param_ptr();
        let params = if !self.check(TokenKind::Symbol, ")") {
            self.param_list()?
        } else {
            Vec::new()
        };
        self.match_tok(TokenKind::Symbol, ")")?;

        let descriptors: Vec<Parameter> = params.iter().map(|(p, _)| p.clone()).collect();
        let proc_id = Identifier::procedure(name_tok.value.clone(), descriptors, label_id as i64);
        self.symbols
            .add(proc_id.clone(), is_global)
            .map_err(|e| self.sym_err_at(e, name_tok.line))?;

        self.symbols.push_scope(Owner::Proc(proc_id));
        for (param, offset) in &params {
            let param_id = Identifier::variable(param.name.clone(), param.ty, param.size, *offset);
            self.symbols
                .add(param_id, false)
                .map_err(|e| self.sym_err_at(e, name_tok.line))?;
        }

        self.emitter.label(&name_tok.value, label_id);
        self.emitter.jump(&format!("{}_{}_begin", name_tok.value, label_id));
        self.emitter.reset_local_ptr();
        self.decl_list();

        self.match_tok(TokenKind::Keyword, "begin")?;
        self.emitter.label_begin(&name_tok.value, label_id);
        self.stmt_list();
        self.emitter.return_stmt();

        self.match_tok(TokenKind::Keyword, "end")?;
        self.match_tok(TokenKind::Keyword, "procedure")?;
        self.symbols.pop_scope();
        Ok(())
    }

    fn param_list(&mut self) -> PResult<Vec<(Parameter, i64)>> {
        let mut params = vec![self.param()?];
        while self.accept(TokenKind::Symbol, ",").is_some() {
            params.push(self.param()?);
        }
        Ok(params)
    }

    /// `param = var_decl ('in' | 'out')`.
    fn param(&mut self) -> PResult<(Parameter, i64)> {
        let (name, ty, size) = self.var_decl_head()?;
        let direction = if self.accept(TokenKind::Keyword, "in").is_some() {
            Direction::In
        } else {
            self.match_tok(TokenKind::Keyword, "out")?;
            Direction::Out
        };
        let offset = self.emitter.alloc_param();
        Ok((Parameter::new(name, ty, size, direction), offset))
    }
}
