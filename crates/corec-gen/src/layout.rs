//! Frame model and memory layout constants (spec.md §4.4, §6).
//!
//! Values taken directly from `original_source/lib/codegenerator.py`, which
//! spec.md §4.4 only describes narratively.

use corec_sym::Location;

pub const MM_SIZE: u32 = 65536;
pub const R_SIZE: u32 = 2048;
pub const BUF_SIZE: u32 = 256;

/// General-purpose register numbers start after the three reserved ones.
pub const SP: u32 = 1;
pub const FP: u32 = 2;
pub const HP: u32 = 3;
pub const FIRST_GP_REGISTER: u32 = 4;

/// Renders the `MM` cell address of an identifier at `mem_ptr`, per the
/// frame layout in spec.md §4.4: globals grow down from the top of memory,
/// params sit above `FP`, locals sit below it.
pub fn base_address(location: Location, mem_ptr: i64) -> String {
    match location {
        Location::Global => format!("({MM_SIZE} - 1 - {mem_ptr})"),
        Location::Param => format!("(R[{FP}] + {mem_ptr})"),
        Location::Local => format!("(R[{FP}] - {mem_ptr})"),
    }
}
