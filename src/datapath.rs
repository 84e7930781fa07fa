//! Machine state: registers, memories, pointers and the I/O devices.

use crate::alu::{Alu, AluOperation};
use crate::constants::{INPUT_ADDRESS, IO_DEVICE_COUNT, OUTPUT_ADDRESS};
use crate::error::ExecutionError;
use crate::logs::{FlagsRecord, LogRecord, RegistriesRecord};
use crate::operations::{Operation, RegistryCode};
use crate::Word;

/// The complete state bundle driven by the control unit.
///
/// Data-memory cells `0..IO_DEVICE_COUNT` form the device window; only the
/// input and output cells are connected. The stack shares the data memory:
/// the stack pointer starts one past the end and grows downward.
pub struct DataPath {
    pub(crate) accumulator: Word,
    pub(crate) buffer: Word,
    pub(crate) alu: Alu,

    pub(crate) data_memory: Vec<Word>,
    pub(crate) memory_pointer: Word,
    pub(crate) stack_pointer: Word,

    pub(crate) instruction_memory: Vec<Operation>,
    pub(crate) instruction_pointer: Word,
    pub(crate) command_data: Option<Operation>,

    pub(crate) input: Vec<Word>,
    pub(crate) output: Vec<Word>,
    pub(crate) last_input: Option<Word>,
    pub(crate) last_output: Option<Word>,
}

impl DataPath {
    /// Builds a data path over zeroed memory. `input_data` is delivered by
    /// the input device in order, one word per read; it is stored reversed so
    /// delivery can pop from the end.
    pub fn new(
        data_memory_size: usize,
        instruction_memory: Vec<Operation>,
        input_data: Vec<Word>,
    ) -> DataPath {
        let mut input = input_data;
        input.reverse();

        DataPath {
            accumulator: 0,
            buffer: 0,
            alu: Alu::new(),
            data_memory: vec![0; data_memory_size],
            memory_pointer: 0,
            stack_pointer: data_memory_size as Word,
            instruction_memory,
            instruction_pointer: 0,
            command_data: None,
            input,
            output: Vec::new(),
            last_input: None,
            last_output: None,
        }
    }

    pub fn accumulator(&self) -> Word {
        self.accumulator
    }

    pub fn buffer(&self) -> Word {
        self.buffer
    }

    /// Everything written to the output device so far, in arrival order.
    pub fn output(&self) -> &[Word] {
        &self.output
    }

    /// Latches the operation under the instruction pointer into the current-
    /// instruction register. Returns `false` when the pointer has left the
    /// instruction memory, which the control unit treats as termination.
    pub fn read_command(&mut self) -> bool {
        let index = self.instruction_pointer;
        if index < 0 || index as usize >= self.instruction_memory.len() {
            return false;
        }
        self.command_data = Some(self.instruction_memory[index as usize]);
        true
    }

    pub fn register(&self, code: RegistryCode) -> Word {
        match code {
            RegistryCode::A => self.accumulator,
            RegistryCode::B => self.buffer,
        }
    }

    pub fn write_register(&mut self, code: RegistryCode, value: Word) {
        match code {
            RegistryCode::A => self.accumulator = value,
            RegistryCode::B => self.buffer = value,
        }
    }

    fn device(&mut self, index: Word) -> Result<&mut Vec<Word>, ExecutionError> {
        match index {
            INPUT_ADDRESS => Ok(&mut self.input),
            OUTPUT_ADDRESS => Ok(&mut self.output),
            _ => Err(ExecutionError::DeviceNotConnected(index)),
        }
    }

    fn record_io(&mut self, index: Word, data: Word) {
        if index == INPUT_ADDRESS {
            self.last_input = Some(data);
        } else {
            self.last_output = Some(data);
        }
    }

    /// Reads one word into `destination` from the stack top or from the cell
    /// under the memory pointer. Device reads consume the device buffer,
    /// delivering 0 once it is empty. The word is routed through the ALU so
    /// the flags reflect the loaded value.
    pub fn memory_read(
        &mut self,
        destination: RegistryCode,
        stack: bool,
    ) -> Result<(), ExecutionError> {
        let index = if stack {
            self.stack_pointer - 1
        } else {
            self.memory_pointer
        };

        let data = if (0..IO_DEVICE_COUNT).contains(&index) {
            let data = self.device(index)?.pop().unwrap_or(0);
            self.record_io(index, data);
            data
        } else if index >= IO_DEVICE_COUNT && (index as usize) < self.data_memory.len() {
            self.data_memory[index as usize]
        } else {
            return Err(ExecutionError::ReadOutsideMemory);
        };

        let value = self.alu_execute(AluOperation::Left, data, 0, true)?;
        self.write_register(destination, value);
        Ok(())
    }

    /// Writes `source` to the stack top or to the cell under the memory
    /// pointer. Device writes append to the device buffer.
    pub fn memory_write(&mut self, source: RegistryCode, stack: bool) -> Result<(), ExecutionError> {
        let data = self.register(source);
        let index = if stack {
            self.stack_pointer
        } else {
            self.memory_pointer
        };

        if (0..IO_DEVICE_COUNT).contains(&index) {
            self.device(index)?.push(data);
            self.record_io(index, data);
            Ok(())
        } else if index >= IO_DEVICE_COUNT && (index as usize) < self.data_memory.len() {
            self.data_memory[index as usize] = data;
            Ok(())
        } else {
            Err(ExecutionError::WriteOutsideMemory)
        }
    }

    /// Latches `left` and `right` into the ALU and runs `operation`.
    pub fn alu_execute(
        &mut self,
        operation: AluOperation,
        left: Word,
        right: Word,
        flags: bool,
    ) -> Result<Word, ExecutionError> {
        self.alu.left = left;
        self.alu.right = right;
        self.alu.execute(operation, flags)
    }

    /// Snapshots registers, flags and the I/O activity accumulated since the
    /// previous snapshot, then clears that activity.
    pub fn record_state(&mut self) -> LogRecord {
        LogRecord {
            registries: RegistriesRecord {
                accumulator: self.accumulator,
                buffer: self.buffer,
                memory_pointer: self.memory_pointer,
                stack_pointer: self.stack_pointer,
                instruction_pointer: self.instruction_pointer,
                command_data: self.command_data,
            },
            flags: FlagsRecord {
                zero: self.alu.zero,
                negative: self.alu.negative,
            },
            input: self.last_input.take(),
            output: self.last_output.take(),
        }
    }
}
