//! Value-producing operations exposed to the parser (spec.md §4.4): name
//! access, literals, arithmetic/relational/logical ops, and the call
//! protocol. Each is a pure appender of target text; only `Emitter::commit`
//! touches the filesystem.

use corec_sym::{Identifier, Location, Type};

use crate::layout::{base_address, FP, HP, SP};
use crate::Emitter;

impl Emitter {
    /// Computes the `MM` address of `id` (adding `idx_reg`'s value when the
    /// name is indexed) and loads it into a fresh register.
    pub fn name_load(&mut self, id: &Identifier, location: Location, idx_reg: Option<u32>) -> u32 {
        let addr_reg = self.emit_address(id, location, idx_reg);
        let value_reg = self.mint_register();
        self.emit_line(&format!("R[{value_reg}] = MM[R[{addr_reg}]];"));
        value_reg
    }

    /// Computes the `MM` address of `id` and stores `expr_reg` there.
    pub fn name_store(&mut self, id: &Identifier, location: Location, idx_reg: Option<u32>, expr_reg: u32) {
        let addr_reg = self.emit_address(id, location, idx_reg);
        self.emit_line(&format!("MM[R[{addr_reg}]] = R[{expr_reg}];"));
    }

    fn emit_address(&mut self, id: &Identifier, location: Location, idx_reg: Option<u32>) -> u32 {
        let base = base_address(location, id.mem_ptr);
        let addr_reg = self.mint_register();
        self.emit_line(&format!("R[{addr_reg}] = {base};"));
        if let Some(idx) = idx_reg {
            self.emit_line(&format!("R[{addr_reg}] = R[{addr_reg}] + R[{idx}];"));
        }
        addr_reg
    }

    /// Materializes an integer or float literal into a fresh register. Float
    /// literals round-trip through the scratch register `F[0]` via a
    /// `memcpy`-style bit transfer, matching `original_source`'s
    /// `codegenerator.py` treatment of boxed floats.
    pub fn number(&mut self, value: &str, kind: Type, negate: bool) -> u32 {
        let sign = if negate { "-" } else { "" };
        let reg = self.mint_register();
        match kind {
            Type::Float => {
                self.emit_line(&format!("F[0] = {sign}{value}f;"));
                self.emit_line(&format!("memcpy(&R[{reg}], &F[0], sizeof(int));"));
            }
            _ => {
                self.emit_line(&format!("R[{reg}] = {sign}{value};"));
            }
        }
        reg
    }

    /// Copies a string literal into the bump heap at `R[HP]` and returns a
    /// register holding its address (supplement: spec.md §4.4 only covers
    /// numeric literals; strings need heap placement too).
    pub fn string_literal(&mut self, value: &str) -> u32 {
        let reg = self.mint_register();
        self.emit_line(&format!("strcpy((char*)&MM[R[{HP}]], \"{value}\");"));
        self.emit_line(&format!("R[{reg}] = R[{HP}];"));
        self.emit_line(&format!("R[{HP}] = R[{HP}] + {};", value.len() + 1));
        reg
    }

    /// Emits the op for `r1 op r2`. If either operand is `float`, both are
    /// widened into `F[0]`/`F[1]` (bit-reinterpreted if they already came
    /// from a float, cast if they came from an integer) and the result
    /// round-trips back through `F[0]`.
    pub fn operation(&mut self, r1: u32, t1: Type, r2: u32, t2: Type, op: &str) -> u32 {
        let result = self.mint_register();
        if t1 == Type::Float || t2 == Type::Float {
            self.widen_to_float(0, r1, t1);
            self.widen_to_float(1, r2, t2);
            self.emit_line(&format!("F[0] = F[0] {op} F[1];"));
            self.emit_line(&format!("memcpy(&R[{result}], &F[0], sizeof(int));"));
        } else {
            self.emit_line(&format!("R[{result}] = R[{r1}] {op} R[{r2}];"));
        }
        result
    }

    fn widen_to_float(&mut self, slot: u32, reg: u32, ty: Type) {
        if ty == Type::Float {
            self.emit_line(&format!("memcpy(&F[{slot}], &R[{reg}], sizeof(int));"));
        } else {
            self.emit_line(&format!("F[{slot}] = (float) R[{reg}];"));
        }
    }

    /// Negates a loaded value in place (unary `-` applied to a `name`).
    pub fn negate(&mut self, reg: u32, ty: Type) -> u32 {
        let result = self.mint_register();
        if ty == Type::Float {
            self.emit_line(&format!("memcpy(&F[0], &R[{reg}], sizeof(int));"));
            self.emit_line("F[0] = -F[0];");
            self.emit_line(&format!("memcpy(&R[{result}], &F[0], sizeof(int));"));
        } else {
            self.emit_line(&format!("R[{result}] = -R[{reg}];"));
        }
        result
    }

    /// `not` applied to an integer or bool value.
    pub fn logical_not(&mut self, reg: u32) -> u32 {
        let result = self.mint_register();
        self.emit_line(&format!("R[{result}] = !R[{reg}];"));
        result
    }

    /// Pushes an evaluated argument onto the stack before a call, in reverse
    /// source order so the first parameter ends up highest on the callee's
    /// frame.
    pub fn param_push(&mut self, reg: u32) {
        self.emit_line(&format!("MM[R[{SP}]] = R[{reg}];"));
        self.emit_line(&format!("R[{SP}] = R[{SP}] - 1;"));
    }

    /// Pops one argument cell after the call returns, into a fresh register.
    pub fn param_pop(&mut self) -> u32 {
        self.emit_line(&format!("R[{SP}] = R[{SP}] + 1;"));
        let reg = self.mint_register();
        self.emit_line(&format!("R[{reg}] = MM[R[{SP}]];"));
        reg
    }

    /// Writes a popped `out` argument back to the caller's identifier.
    pub fn param_store(&mut self, id: &Identifier, location: Location, value_reg: u32) {
        self.name_store(id, location, None, value_reg);
    }

    /// Emits the caller-side call protocol and returns the unique call id
    /// used to form this call site's return label (spec.md §4.4, I4).
    pub fn proc_call(&mut self, name: &str, label_id: u32) -> u32 {
        let call_id = self.mint_call_id();
        let return_label = format!("{name}_{label_id}_ret{call_id}");

        self.emit_line(&format!("R[{SP}] = R[{SP}] - 1;"));
        self.emit_line(&format!("MM[R[{SP}]] = R[{FP}];"));
        self.emit_line(&format!("R[{FP}] = R[{SP}];"));
        self.emit_line(&format!("MM[R[{FP}]] = (int) &&{return_label};"));
        self.jump(&format!("{name}_{label_id}"));
        self.label_raw(&return_label);
        self.emit_line(&format!("R[{FP}] = MM[R[{SP}]];"));
        self.emit_line(&format!("R[{SP}] = R[{SP}] + 1;"));

        call_id
    }

    /// Sets `SP` back to `FP` and jumps indirectly through the saved return
    /// address.
    pub fn return_stmt(&mut self) {
        self.emit_line(&format!("R[{SP}] = R[{FP}];"));
        self.emit_line(&format!("goto *(void*)MM[R[{FP}]];"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literal_is_a_direct_store() {
        let mut e = Emitter::new(false);
        e.number("42", Type::Integer, false);
        assert!(e.buffer().contains("= 42;"));
    }

    #[test]
    fn float_literal_round_trips_through_scratch() {
        let mut e = Emitter::new(false);
        e.number("1.5", Type::Float, false);
        assert!(e.buffer().contains("F[0] = 1.5f;"));
        assert!(e.buffer().contains("memcpy(&R["));
    }

    #[test]
    fn proc_call_shares_target_across_two_calls() {
        let mut e = Emitter::new(false);
        let first = e.proc_call("q", 7);
        let second = e.proc_call("q", 7);
        assert_ne!(first, second);
        assert_eq!(e.buffer().matches("goto q_7;").count(), 2);
    }
}
