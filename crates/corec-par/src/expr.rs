//! `expr` / `arith_op` / `relation` / `term` / `factor` / `name`
//! (spec.md §4.3 grammar and type-checking rules).

use corec_lex::TokenKind;
use corec_sym::{Identifier, Location, Type};
use corec_util::ErrorKind;

use crate::{PResult, Parser};

/// A reference to a resolved, possibly array-indexed name: enough to load
/// or store through it without re-resolving.
#[derive(Clone)]
pub(crate) struct NameRef {
    pub(crate) id: Identifier,
    pub(crate) location: Location,
    pub(crate) idx_reg: Option<u32>,
}

/// The value an expression production evaluated to. `name` survives only
/// when the production reduced to exactly a bare `name` with no operator
/// applied — used to check the "`out` arguments must be a name" rule
/// (spec.md §4.3).
#[derive(Clone)]
pub(crate) struct Operand {
    pub(crate) reg: u32,
    pub(crate) ty: Type,
    pub(crate) name: Option<NameRef>,
}

pub(crate) fn type_name(ty: Type) -> &'static str {
    match ty {
        Type::Integer => "integer",
        Type::Float => "float",
        Type::Bool => "bool",
        Type::String => "string",
        Type::Procedure => "procedure",
        Type::Program => "program",
    }
}

fn is_numeric(ty: Type) -> bool {
    matches!(ty, Type::Integer | Type::Float)
}

fn is_int_or_bool(ty: Type) -> bool {
    matches!(ty, Type::Integer | Type::Bool)
}

impl<'a> Parser<'a> {
    /// `expr = ['not'] arith_op {('&'|'|') arith_op}`.
    ///
    /// Resolved per the documented open question: `&`/`|` are plain bitwise
    /// ops with no short-circuit evaluation, matching the behavior observed
    /// in some snapshots of the original source (see DESIGN.md).
    pub(crate) fn expr(&mut self) -> PResult<Operand> {
        let negate = self.accept(TokenKind::Keyword, "not").is_some();
        let mut left = self.arith_op()?;

        if negate {
            if !is_int_or_bool(left.ty) {
                return Err(self.error(
                    ErrorKind::Type,
                    format!("'not' requires integer or bool, found {}", type_name(left.ty)),
                ));
            }
            let reg = self.emitter.logical_not(left.reg);
            left = Operand { reg, ty: left.ty, name: None };
        }

        while self.check(TokenKind::Symbol, "&") || self.check(TokenKind::Symbol, "|") {
            let op_tok = self.advance();
            let right = self.arith_op()?;
            if !is_int_or_bool(left.ty) || !is_int_or_bool(right.ty) {
                return Err(self.error(
                    ErrorKind::Type,
                    format!("'{}' requires integer or bool operands", op_tok.value),
                ));
            }
            let reg = self.emitter.operation(left.reg, left.ty, right.reg, right.ty, &op_tok.value);
            left = Operand { reg, ty: left.ty, name: None };
        }
        Ok(left)
    }

    /// `arith_op = relation {('+'|'-') relation}`.
    fn arith_op(&mut self) -> PResult<Operand> {
        let mut left = self.relation()?;
        while self.check(TokenKind::Symbol, "+") || self.check(TokenKind::Symbol, "-") {
            let op_tok = self.advance();
            let right = self.relation()?;
            if !is_numeric(left.ty) || !is_numeric(right.ty) {
                return Err(self.error(
                    ErrorKind::Type,
                    format!("'{}' requires integer or float operands", op_tok.value),
                ));
            }
            let reg = self.emitter.operation(left.reg, left.ty, right.reg, right.ty, &op_tok.value);
            left = Operand { reg, ty: left.ty, name: None };
        }
        Ok(left)
    }

    /// `relation = term {('<'|'>'|'<='|'>='|'=='|'!=') term}`.
    fn relation(&mut self) -> PResult<Operand> {
        const RELATIONS: &[&str] = &["<", ">", "<=", ">=", "==", "!="];
        let mut left = self.term()?;
        while RELATIONS.iter().any(|r| self.check(TokenKind::Symbol, r)) {
            let op_tok = self.advance();
            let right = self.term()?;
            if !is_int_or_bool(left.ty) || !is_int_or_bool(right.ty) {
                return Err(self.error(
                    ErrorKind::Type,
                    format!("'{}' requires integer or bool operands", op_tok.value),
                ));
            }
            let reg = self.emitter.operation(left.reg, left.ty, right.reg, right.ty, &op_tok.value);
            left = Operand { reg, ty: left.ty, name: None };
        }
        Ok(left)
    }

    /// `term = factor {('*'|'/') factor}`.
    fn term(&mut self) -> PResult<Operand> {
        let mut left = self.factor()?;
        while self.check(TokenKind::Symbol, "*") || self.check(TokenKind::Symbol, "/") {
            let op_tok = self.advance();
            let right = self.factor()?;
            if !is_numeric(left.ty) || !is_numeric(right.ty) {
                return Err(self.error(
                    ErrorKind::Type,
                    format!("'{}' requires integer or float operands", op_tok.value),
                ));
            }
            let reg = self.emitter.operation(left.reg, left.ty, right.reg, right.ty, &op_tok.value);
            left = Operand { reg, ty: left.ty, name: None };
        }
        Ok(left)
    }

    /// `factor = '(' expr ')' | ['-'] name | ['-'] number | string_literal
    ///         | 'true' | 'false'`.
    fn factor(&mut self) -> PResult<Operand> {
        if self.accept(TokenKind::Symbol, "(").is_some() {
            let inner = self.expr()?;
            self.match_tok(TokenKind::Symbol, ")")?;
            return Ok(Operand { name: None, ..inner });
        }

        if self.check(TokenKind::Keyword, "true") || self.check(TokenKind::Keyword, "false") {
            let tok = self.advance();
            let reg = self.emitter.number(if tok.value == "true" { "1" } else { "0" }, Type::Bool, false);
            return Ok(Operand { reg, ty: Type::Bool, name: None });
        }

        if let Some(tok) = self.accept_kind(TokenKind::String) {
            let reg = self.emitter.string_literal(&tok.value);
            return Ok(Operand { reg, ty: Type::String, name: None });
        }

        let negate = self.accept(TokenKind::Symbol, "-").is_some();

        if self.check_kind(TokenKind::Integer) || self.check_kind(TokenKind::Float) {
            let tok = self.advance();
            let ty = if tok.kind == TokenKind::Float { Type::Float } else { Type::Integer };
            let reg = self.emitter.number(&tok.value, ty, negate);
            return Ok(Operand { reg, ty, name: None });
        }

        let mut operand = self.name()?;
        if negate {
            let reg = self.emitter.negate(operand.reg, operand.ty);
            operand = Operand { reg, ty: operand.ty, name: None };
        }
        Ok(operand)
    }

    /// `name = ident ['[' expr ']']`. Resolves the identifier, validates
    /// index usage, and loads its current value.
    fn name(&mut self) -> PResult<Operand> {
        let name_ref = self.resolve_name()?;
        let reg = self.emitter.name_load(&name_ref.id, name_ref.location, name_ref.idx_reg);
        let ty = name_ref.id.ty;
        Ok(Operand { reg, ty, name: Some(name_ref) })
    }

    /// Shared by `name` (read) and `dest` (write): resolves `ident
    /// ['[' expr ']']` to a [`NameRef`] without emitting a load.
    pub(crate) fn resolve_name(&mut self) -> PResult<NameRef> {
        let name_tok = self.match_kind(TokenKind::Identifier)?;
        let id = self
            .symbols
            .find(&name_tok.value)
            .map(Identifier::clone)
            .map_err(|e| self.sym_err_at(e, name_tok.line))?;
        let location = self
            .symbols
            .id_location(&name_tok.value)
            .map_err(|e| self.sym_err_at(e, name_tok.line))?;

        let idx_reg = if self.accept(TokenKind::Symbol, "[").is_some() {
            let index = self.expr()?;
            if index.ty != Type::Integer {
                return Err(self.error_at(
                    ErrorKind::Type,
                    name_tok.line,
                    "array index must be an integer",
                ));
            }
            self.match_tok(TokenKind::Symbol, "]")?;
            Some(index.reg)
        } else {
            if id.is_array() {
                return Err(self.error_at(
                    ErrorKind::Runtime,
                    name_tok.line,
                    format!("'{}' is an array and requires an index", name_tok.value),
                ));
            }
            None
        };

        Ok(NameRef { id, location, idx_reg })
    }
}
