//! The eight predefined I/O procedures (spec.md §4.4), installed into the
//! symbol table before parsing begins and emitted verbatim in the epilogue.

use corec_sym::{Direction, Identifier, Parameter, SymbolTable, Type};

use crate::Emitter;

pub struct RuntimeProc {
    pub name: &'static str,
    pub param_name: &'static str,
    pub param_type: Type,
    pub direction: Direction,
}

pub const RUNTIME_PROCEDURES: &[RuntimeProc] = &[
    RuntimeProc { name: "getString", param_name: "my_string", param_type: Type::String, direction: Direction::Out },
    RuntimeProc { name: "putString", param_name: "my_string", param_type: Type::String, direction: Direction::In },
    RuntimeProc { name: "getBool", param_name: "my_bool", param_type: Type::Bool, direction: Direction::Out },
    RuntimeProc { name: "putBool", param_name: "my_bool", param_type: Type::Bool, direction: Direction::In },
    RuntimeProc { name: "getInteger", param_name: "my_integer", param_type: Type::Integer, direction: Direction::Out },
    RuntimeProc { name: "putInteger", param_name: "my_integer", param_type: Type::Integer, direction: Direction::In },
    RuntimeProc { name: "getFloat", param_name: "my_float", param_type: Type::Float, direction: Direction::Out },
    RuntimeProc { name: "putFloat", param_name: "my_float", param_type: Type::Float, direction: Direction::In },
];

/// Installs the eight runtime procedures into the global scope, minting one
/// label id per procedure so their emitted labels (`getString_1`, …) line
/// up with the identifiers the parser resolves calls against.
pub fn install_runtime_procedures(table: &mut SymbolTable, emitter: &mut Emitter) -> Vec<(String, u32)> {
    let mut labels = Vec::with_capacity(RUNTIME_PROCEDURES.len());
    for proc in RUNTIME_PROCEDURES {
        let label_id = emitter.mint_label();
        let param = Parameter::new(proc.param_name, proc.param_type, None, proc.direction);
        let id = Identifier::procedure(proc.name, vec![param], label_id as i64);
        table
            .add(id, true)
            .expect("runtime procedure names are fixed and never collide");
        labels.push((proc.name.to_string(), label_id));
    }
    labels
}

impl Emitter {
    /// Emits the bodies of the eight runtime procedures as the final part
    /// of the output file (spec.md §6 item 5). Implementations use the
    /// target's standard I/O (`scanf`/`printf`) and return via the same
    /// indirect-jump protocol as user procedures.
    pub fn emit_runtime_procedures(&mut self, labels: &[(String, u32)]) {
        for (name, label_id) in labels {
            self.label(name, *label_id);
            let param = RUNTIME_PROCEDURES
                .iter()
                .find(|p| p.name == name.as_str())
                .expect("every emitted runtime label has a matching RuntimeProc entry");
            self.emit_runtime_body(param);
            self.emit_line("goto *(void*)R[0];");
        }
    }

    fn emit_runtime_body(&mut self, proc: &RuntimeProc) {
        match (proc.name, proc.direction) {
            ("getString", _) => self.emit_line("scanf(\"%255s\", STR_BUF);"),
            ("putString", _) => self.emit_line("printf(\"%s\", (char*)&MM[R[0]]);"),
            ("getBool", _) | ("getInteger", _) => self.emit_line("scanf(\"%d\", &MM[R[0]]);"),
            ("putBool", _) | ("putInteger", _) => self.emit_line("printf(\"%d\", MM[R[0]]);"),
            ("getFloat", _) => self.emit_line("scanf(\"%f\", &F[0]); memcpy(&MM[R[0]], &F[0], sizeof(int));"),
            ("putFloat", _) => self.emit_line("memcpy(&F[0], &MM[R[0]], sizeof(int)); printf(\"%f\", F[0]);"),
            _ => unreachable!("RUNTIME_PROCEDURES only lists the eight names matched above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_all_eight_with_distinct_labels() {
        let mut table = SymbolTable::new();
        let mut emitter = Emitter::new(false);
        install_runtime_procedures(&mut table, &mut emitter);
        for proc in RUNTIME_PROCEDURES {
            let id = table.find(proc.name).unwrap();
            assert_eq!(id.ty, Type::Procedure);
        }
    }
}
