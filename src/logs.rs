//! Per-cycle state records.

use serde::{Deserialize, Serialize};

use crate::operations::Operation;
use crate::Word;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistriesRecord {
    pub accumulator: Word,
    pub buffer: Word,
    pub memory_pointer: Word,
    pub stack_pointer: Word,
    pub instruction_pointer: Word,
    pub command_data: Option<Operation>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagsRecord {
    pub zero: bool,
    pub negative: bool,
}

/// Snapshot of the data path at the end of one cycle. `input` and `output`
/// are set only when the corresponding device was touched during the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub registries: RegistriesRecord,
    pub flags: FlagsRecord,
    pub input: Option<Word>,
    pub output: Option<Word>,
}
