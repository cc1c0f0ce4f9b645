//! Code emitter (spec.md §4.4): appends textual intermediate-target source
//! to an in-memory buffer, committing it to disk only when the whole
//! compilation recorded no error (spec.md §7).
//!
//! Grounded in `faxc-gen/src/asm.rs`'s text-accumulating `AsmGenerator`
//! (`output: String` plus an indent level), generalized from an LLVM/asm
//! target to the portable C-like intermediate target spec.md §6 requires.

mod layout;
mod ops;
mod runtime;

pub use layout::{base_address, BUF_SIZE, FIRST_GP_REGISTER, FP, HP, MM_SIZE, R_SIZE, SP};
pub use runtime::{install_runtime_procedures, RUNTIME_PROCEDURES};

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}

/// Accumulates emitted text plus the per-compilation monotonic counters
/// (spec.md invariant I4). Threaded through the parser by value, not shared
/// as process-global state (spec.md §9 Design Notes).
pub struct Emitter {
    buffer: String,
    indent: usize,
    debug: bool,
    next_register: u32,
    next_label: u32,
    next_call_id: u32,
    next_global_offset: i64,
    next_local_offset: i64,
    next_param_offset: i64,
}

impl Emitter {
    pub fn new(debug: bool) -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
            debug,
            next_register: FIRST_GP_REGISTER,
            next_label: 1,
            next_call_id: 1,
            next_global_offset: 0,
            next_local_offset: 1,
            next_param_offset: 1,
        }
    }

    pub fn mint_register(&mut self) -> u32 {
        let r = self.next_register;
        self.next_register += 1;
        r
    }

    pub fn mint_label(&mut self) -> u32 {
        let l = self.next_label;
        self.next_label += 1;
        l
    }

    pub fn mint_call_id(&mut self) -> u32 {
        let id = self.next_call_id;
        self.next_call_id += 1;
        id
    }

    /// Globals grow downward from the top of memory and are never reset —
    /// they live for the whole compilation (spec.md §4.4).
    pub fn alloc_global(&mut self) -> i64 {
        let offset = self.next_global_offset;
        self.next_global_offset += 1;
        offset
    }

    /// Restarts local-slot counting at 1 (offset 0 is the return address).
    pub fn reset_local_ptr(&mut self) {
        self.next_local_offset = 1;
    }

    pub fn alloc_local(&mut self) -> i64 {
        let offset = self.next_local_offset;
        self.next_local_offset += 1;
        offset
    }

    /// Restarts parameter-slot counting at 1.
    pub fn reset_param_ptr(&mut self) {
        self.next_param_offset = 1;
    }

    pub fn alloc_param(&mut self) -> i64 {
        let offset = self.next_param_offset;
        self.next_param_offset += 1;
        offset
    }

    fn emit_line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.buffer.push_str("    ");
        }
        writeln!(self.buffer, "{text}").expect("writing to an in-memory String never fails");
    }

    /// A human-readable comment, emitted only under `-d`/`--debug`
    /// (spec.md §6).
    pub fn comment(&mut self, text: &str) {
        if self.debug {
            self.emit_line(&format!("// {text}"));
        }
    }

    /// Emits a label at `<name>_<label_id>:`, dedented one level from
    /// whatever surrounds it (label lines read at the enclosing scope).
    pub fn label(&mut self, name: &str, label_id: u32) {
        self.label_raw(&format!("{name}_{label_id}"));
    }

    pub(crate) fn label_raw(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.emit_line(&format!("{text}:"));
        self.indent += 1;
    }

    pub fn jump(&mut self, target: &str) {
        self.emit_line(&format!("goto {target};"));
    }

    pub fn jump_if_zero(&mut self, reg: u32, target: &str) {
        self.emit_line(&format!("if (R[{reg}] == 0) goto {target};"));
    }

    /// Emits the includes, the `main` function open, and the array
    /// declarations/pointer initialization every compilation needs
    /// (spec.md §6 item 1). Everything emitted after this call lives inside
    /// `main` until [`Emitter::epilogue`] closes it.
    pub fn prologue(&mut self) {
        self.emit_line("#include <stdio.h>");
        self.emit_line("#include <string.h>");
        self.emit_line("int main(void) {");
        self.indent += 1;
        self.emit_line(&format!("int MM[{MM_SIZE}];"));
        self.emit_line(&format!("int R[{R_SIZE}];"));
        self.emit_line("float F[2];");
        self.emit_line(&format!("char STR_BUF[{BUF_SIZE}];"));
        self.emit_line(&format!("R[{SP}] = R[{FP}] = {MM_SIZE} - 1;"));
        self.emit_line(&format!("R[{HP}] = 0;"));
    }

    /// Closes the `main` function opened by [`Emitter::prologue`]. Called
    /// once the runtime procedures have been emitted, at the very end of
    /// the output file.
    pub fn epilogue(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.emit_line("}");
    }

    /// Emits the `goto` to the program entry label and the exit label that
    /// follows it (spec.md §6 item 2). Seeds `MM[R[FP]]` with the exit
    /// label's address so the program body's closing indirect jump
    /// (`end_program_body`) lands there.
    pub fn program_entry(&mut self, name: &str, label_id: u32) {
        self.emit_line(&format!("MM[R[{FP}]] = (int)(long) &&exit_0;"));
        self.jump(&format!("{name}_{label_id}"));
        self.label("exit", 0);
        self.emit_line("return 0;");
    }

    /// Emits `<name>_<label_id>_begin:`, the nested label that follows a
    /// program's or procedure's declarations and precedes its statements
    /// (spec.md §6 item 3).
    pub fn label_begin(&mut self, name: &str, label_id: u32) {
        self.label_raw(&format!("{name}_{label_id}_begin"));
    }

    /// Emits the unconditional jump back to the exit label at the end of
    /// the user program's body (spec.md §6 item 4).
    pub fn end_program_body(&mut self) {
        self.emit_line(&format!("goto *(void*)MM[R[{FP}]];"));
    }

    /// Serializes the buffer to `path`. Called by the driver only after
    /// confirming the compilation recorded no error (spec.md §5, §7).
    pub fn commit(self, path: &Path) -> Result<(), GenError> {
        fs::write(path, self.buffer)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn buffer(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_monotonic() {
        let mut e = Emitter::new(false);
        let r1 = e.mint_register();
        let r2 = e.mint_register();
        assert!(r2 > r1);
        let l1 = e.mint_label();
        let l2 = e.mint_label();
        assert!(l2 > l1);
    }

    #[test]
    fn local_and_param_ptrs_reset_independently() {
        let mut e = Emitter::new(false);
        e.alloc_local();
        e.alloc_local();
        e.reset_local_ptr();
        assert_eq!(e.alloc_local(), 1);

        e.alloc_param();
        e.reset_param_ptr();
        assert_eq!(e.alloc_param(), 1);
    }

    #[test]
    fn debug_comments_are_gated() {
        let mut quiet = Emitter::new(false);
        quiet.comment("should not appear");
        assert!(!quiet.buffer().contains("should not appear"));

        let mut verbose = Emitter::new(true);
        verbose.comment("should appear");
        assert!(verbose.buffer().contains("should appear"));
    }

    #[test]
    fn program_entry_emits_matching_labels() {
        let mut e = Emitter::new(false);
        e.program_entry("empty", 1);
        assert!(e.buffer().contains("goto empty_1;"));
        assert!(e.buffer().contains("exit_0:"));
    }
}
