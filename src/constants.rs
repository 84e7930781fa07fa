use crate::Word;

pub const WORD_LENGTH: u32 = 32;
pub const WORD_MAIN: i64 = 1 << (WORD_LENGTH - 1);
pub const WORD_MAX_VALUE: Word = (WORD_MAIN - 1) as Word;
pub const WORD_MIN_VALUE: Word = (-WORD_MAIN) as Word;

/// Number of data-memory cells reserved for memory-mapped devices.
pub const IO_DEVICE_COUNT: Word = 16;

/// Device cell wired to the input stream.
pub const INPUT_ADDRESS: Word = 1;

/// Device cell wired to the output stream.
pub const OUTPUT_ADDRESS: Word = 3;

/// Default size of the data memory, in words.
pub const DATA_MEMORY_SIZE: usize = 100;
