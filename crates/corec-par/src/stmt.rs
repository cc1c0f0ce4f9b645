//! `stmt` / `assign` / `if_stmt` / `loop_stmt` / `proc_call`
//! (spec.md §4.3 grammar, error recovery, and type-checking rules).

use corec_lex::TokenKind;
use corec_sym::Direction;
use corec_util::ErrorKind;

use crate::expr::type_name;
use crate::{Operand, PResult, Parser};

impl<'a> Parser<'a> {
    /// Statement list terminated by `end`, `else`, or end-of-file — used by
    /// `program_body`, `proc_body`, and both branches of `if_stmt`.
    pub(crate) fn stmt_list(&mut self) {
        while self.current.kind != TokenKind::Eof
            && !self.check(TokenKind::Keyword, "end")
            && !self.check(TokenKind::Keyword, "else")
        {
            self.stmt_and_semi();
        }
    }

    fn stmt_and_semi(&mut self) {
        if let Err(e) = self.stmt() {
            self.report(e);
            self.recover();
            return;
        }
        if let Err(e) = self.match_tok(TokenKind::Symbol, ";") {
            self.report(e);
            self.recover();
        }
    }

    /// `stmt = assign | if_stmt | loop_stmt | 'return' | proc_call`.
    fn stmt(&mut self) -> PResult<()> {
        if self.check(TokenKind::Keyword, "if") {
            self.if_stmt()
        } else if self.check(TokenKind::Keyword, "for") {
            self.for_stmt()
        } else if self.accept(TokenKind::Keyword, "return").is_some() {
            self.emitter.return_stmt();
            Ok(())
        } else if self.current.kind == TokenKind::Identifier && self.future.is("(") {
            self.proc_call_stmt()
        } else {
            self.assign_stmt()
        }
    }

    /// `assign = dest ':=' expr`.
    fn assign_stmt(&mut self) -> PResult<()> {
        let line = self.current.line;
        let dest = self.resolve_name()?;
        self.match_tok(TokenKind::Symbol, ":=")?;
        let value = self.expr()?;

        if let Some(Direction::Out) = value.name.as_ref().and_then(|n| self.param_direction_of(&n.id.name)) {
            return Err(self.error_at(
                ErrorKind::Type,
                line,
                "expected 'in' param, encountered 'out' param",
            ));
        }

        if dest.id.ty != value.ty {
            return Err(self.error_at(
                ErrorKind::Type,
                line,
                format!(
                    "cannot assign {} to '{}' of type {}",
                    type_name(value.ty),
                    dest.id.name,
                    type_name(dest.id.ty)
                ),
            ));
        }
        if let Some(Direction::Out) = self.param_direction_of(&dest.id.name) {
            // Writing to an `out` parameter from within its own procedure is
            // the write side of the `in`/`out` direction rule — permitted.
        } else if let Some(Direction::In) = self.param_direction_of(&dest.id.name) {
            return Err(self.error_at(
                ErrorKind::Type,
                line,
                format!("expected 'out' param, encountered 'in' param '{}'", dest.id.name),
            ));
        }

        self.emitter.name_store(&dest.id, dest.location, dest.idx_reg, value.reg);
        Ok(())
    }

    fn param_direction_of(&self, name: &str) -> Option<Direction> {
        self.symbols.param_direction(name).ok()
    }

    /// `if_stmt = 'if' '(' expr ')' 'then' stmt ';' {stmt ';'}
    ///            ['else' stmt ';' {stmt ';'}] 'end' 'if'`.
    fn if_stmt(&mut self) -> PResult<()> {
        self.match_tok(TokenKind::Keyword, "if")?;
        self.match_tok(TokenKind::Symbol, "(")?;
        let cond = self.expr()?;
        self.match_tok(TokenKind::Symbol, ")")?;
        self.match_tok(TokenKind::Keyword, "then")?;

        let else_label = self.emitter.mint_label();
        let endif_label = self.emitter.mint_label();

        self.emitter.jump_if_zero(cond.reg, &format!("else_{else_label}"));
        self.stmt_list();
        self.emitter.jump(&format!("endif_{endif_label}"));
        self.emitter.label("else", else_label);

        if self.accept(TokenKind::Keyword, "else").is_some() {
            self.stmt_list();
        }
        self.emitter.label("endif", endif_label);

        self.match_tok(TokenKind::Keyword, "end")?;
        self.match_tok(TokenKind::Keyword, "if")?;
        Ok(())
    }

    /// `loop_stmt = 'for' '(' assign ';' expr ')' {stmt ';'} 'end' 'for'`.
    /// The initializer runs once before the loop label; the condition is
    /// re-evaluated on every iteration.
    fn for_stmt(&mut self) -> PResult<()> {
        self.match_tok(TokenKind::Keyword, "for")?;
        self.match_tok(TokenKind::Symbol, "(")?;
        self.assign_stmt()?;
        self.match_tok(TokenKind::Symbol, ";")?;

        let loop_label = self.emitter.mint_label();
        let endloop_label = self.emitter.mint_label();
        self.emitter.label("loop", loop_label);

        let cond = self.expr()?;
        self.match_tok(TokenKind::Symbol, ")")?;
        self.emitter.jump_if_zero(cond.reg, &format!("endloop_{endloop_label}"));

        self.stmt_list();
        self.emitter.jump(&format!("loop_{loop_label}"));
        self.emitter.label("endloop", endloop_label);

        self.match_tok(TokenKind::Keyword, "end")?;
        self.match_tok(TokenKind::Keyword, "for")?;
        Ok(())
    }

    /// `proc_call = ident '(' [arg_list] ')'`, used only as a statement —
    /// this language has no expression-position calls.
    fn proc_call_stmt(&mut self) -> PResult<()> {
        let name_tok = self.match_kind(TokenKind::Identifier)?;
        let id = self
            .symbols
            .find(&name_tok.value)
            .map(corec_sym::Identifier::clone)
            .map_err(|e| self.sym_err_at(e, name_tok.line))?;

        if id.ty != corec_sym::Type::Procedure {
            return Err(self.error_at(
                ErrorKind::Type,
                name_tok.line,
                format!("'{}' is not a procedure", name_tok.value),
            ));
        }
        let params = id.params.clone().unwrap_or_default();

        self.match_tok(TokenKind::Symbol, "(")?;
        let mut args: Vec<Operand> = Vec::new();
        if !self.check(TokenKind::Symbol, ")") {
            loop {
                let arg_line = self.current.line;
                let arg = self.expr()?;
                if let Some(param) = params.get(args.len()) {
                    if param.direction == Direction::Out && arg.name.is_none() {
                        return Err(self.error_at(
                            ErrorKind::Type,
                            arg_line,
                            format!("argument {} of '{}' requires a name, found an expression", args.len() + 1, name_tok.value),
                        ));
                    }
                    if param.ty != arg.ty {
                        return Err(self.error_at(
                            ErrorKind::Type,
                            arg_line,
                            format!(
                                "argument {} of '{}' expects {}, found {}",
                                args.len() + 1,
                                name_tok.value,
                                type_name(param.ty),
                                type_name(arg.ty)
                            ),
                        ));
                    }
                }
                args.push(arg);
                if self.accept(TokenKind::Symbol, ",").is_none() {
                    break;
                }
            }
        }
        self.match_tok(TokenKind::Symbol, ")")?;

        if args.len() != params.len() {
            return Err(self.error_at(
                ErrorKind::Runtime,
                name_tok.line,
                format!(
                    "'{}' expects {} argument(s), found {}",
                    name_tok.value,
                    params.len(),
                    args.len()
                ),
            ));
        }

        for arg in args.iter().rev() {
            self.emitter.param_push(arg.reg);
        }
        self.emitter.proc_call(&name_tok.value, id.mem_ptr as u32);

        for (param, arg) in params.iter().zip(args.iter()) {
            let value_reg = self.emitter.param_pop();
            if param.direction == Direction::Out {
                if let Some(dest) = &arg.name {
                    self.emitter.param_store(&dest.id, dest.location, value_reg);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use corec_util::SourceFile;

    fn run(src: &str) -> crate::CompileOutput {
        let source = SourceFile::from_string(PathBuf::from("t.src"), src.to_string());
        crate::compile(&source, false)
    }

    #[test]
    fn assignment_type_mismatch_is_recorded_and_blocks_output() {
        // spec.md §8 scenario E3.
        let out = run("program p is integer a; float b; begin a := b; end program");
        assert!(!out.success);
        assert!(out.diagnostics.iter().any(|d| d.message.contains("cannot assign")));
    }

    #[test]
    fn out_argument_must_be_a_name_not_an_expression() {
        // spec.md §8 scenario E4.
        let out = run(
            "program p is \
             procedure q(integer n out) begin return; end procedure \
             begin q(1 + 2); end program",
        );
        assert!(!out.success);
        assert!(out.diagnostics.iter().any(|d| d.message.contains("requires a name")));
    }

    #[test]
    fn if_else_emits_matching_labels() {
        // spec.md §8 scenario E5.
        let out = run(
            "program p is integer x; \
             begin if (true) then x := 1; else x := 2; end if; end program",
        );
        assert!(out.success);
    }

    #[test]
    fn multiple_calls_to_same_procedure_get_distinct_return_labels() {
        // spec.md §8 scenario E6.
        let out = run(
            "program p is \
             integer a; integer b; \
             procedure q(integer n in) begin return; end procedure \
             begin q(a); q(b); end program",
        );
        assert!(out.success);
    }

    #[test]
    fn for_loop_compiles_with_matching_loop_labels() {
        let out = run(
            "program p is integer i; \
             begin for (i := 0; i < 10) i := i + 1; end for; end program",
        );
        assert!(out.success);
    }

    #[test]
    fn wrong_argument_count_is_a_runtime_error() {
        let out = run(
            "program p is \
             procedure q(integer n in) begin return; end procedure \
             begin q(); end program",
        );
        assert!(!out.success);
    }
}
