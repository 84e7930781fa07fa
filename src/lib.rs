//! Cycle-accurate simulation of the Cusp accumulator machine.
//!
//! The machine is a single-accumulator processor with two general registers
//! (`A`, the accumulator, and `B`, the buffer), a word-addressable data
//! memory whose first cells are memory-mapped I/O devices, a downward-growing
//! stack sharing that memory, and a separate read-only instruction memory.
//! The [`ControlUnit`](control/struct.ControlUnit.html) drives a
//! [`DataPath`](datapath/struct.DataPath.html) through fetch, execute and
//! memory stages and appends one [`LogRecord`](logs/struct.LogRecord.html)
//! per cycle.
//!
//! Programs are lists of [`Operation`](operations/enum.Operation.html)s; the
//! [cusp](../cusp/index.html) crate produces them from source text, and their
//! serialized form is a JSON array discriminated by each operation's `code`
//! field.

pub mod alu;
pub mod constants;
pub mod control;
pub mod datapath;
pub mod error;
pub mod logs;
pub mod operations;

pub use crate::alu::{Alu, AluOperation};
pub use crate::control::ControlUnit;
pub use crate::datapath::DataPath;
pub use crate::error::ExecutionError;
pub use crate::logs::{FlagsRecord, LogRecord, RegistriesRecord};
pub use crate::operations::{
    BinaryCode, BinaryOperation, JumpCode, JumpOperation, MemoryCode, MemoryOperation, Operand,
    Operation, Registry, RegistryCode, StackCode, StackOperation, Value,
};

/// Machine word. Registers, memory cells and immediate operands all hold one.
pub type Word = i32;

#[cfg(test)]
mod test;
