//! The control unit: fetch, execute and memory stages over a data path.

use log::trace;

use crate::alu::AluOperation;
use crate::datapath::DataPath;
use crate::error::ExecutionError;
use crate::logs::LogRecord;
use crate::operations::{BinaryCode, BinaryOperation, JumpCode, JumpOperation, MemoryCode,
                        Operand, Operation, StackCode};

pub struct ControlUnit {
    pub(crate) data_path: DataPath,
    pub(crate) log: Vec<LogRecord>,
    pub(crate) finished: bool,
}

impl ControlUnit {
    pub fn new(data_path: DataPath) -> ControlUnit {
        ControlUnit {
            data_path,
            log: Vec::new(),
            finished: false,
        }
    }

    pub fn data_path(&self) -> &DataPath {
        &self.data_path
    }

    pub fn log(&self) -> &[LogRecord] {
        &self.log
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Latches the next operation and advances the instruction pointer, or
    /// marks the run as finished once the pointer walks off the end.
    pub(crate) fn fetch_instruction(&mut self) {
        if self.data_path.read_command() {
            self.data_path.instruction_pointer += 1;
        } else {
            self.finished = true;
        }
    }

    fn execute_binary(&mut self, operation: BinaryOperation) -> Result<(), ExecutionError> {
        let source = match operation.left {
            Operand::Registry(registry) => self.data_path.register(registry.code),
            Operand::Value(value) => value.value,
        };
        let target = self.data_path.register(operation.right.code);

        // cmp and pmc only differ in operand order and never store.
        let (alu_operation, left, right, store) = match operation.code {
            BinaryCode::Cmp => (AluOperation::Sub, target, source, false),
            BinaryCode::Pmc => (AluOperation::Sub, source, target, false),
            BinaryCode::Mov => (AluOperation::Right, target, source, true),
            BinaryCode::Add => (AluOperation::Add, target, source, true),
            BinaryCode::Sub => (AluOperation::Sub, target, source, true),
            BinaryCode::Mul => (AluOperation::Mul, target, source, true),
            BinaryCode::Div => (AluOperation::Div, target, source, true),
            BinaryCode::Mod => (AluOperation::Mod, target, source, true),
        };

        let result = self.data_path.alu_execute(alu_operation, left, right, true)?;
        if store {
            self.data_path.write_register(operation.right.code, result);
        }
        Ok(())
    }

    fn execute_jump(&mut self, operation: JumpOperation) -> Result<(), ExecutionError> {
        let taken = match operation.code {
            JumpCode::Jz => self.data_path.alu.zero,
            JumpCode::Jn => self.data_path.alu.negative,
            JumpCode::Jb => true,
        };
        if taken {
            let pointer = self.data_path.instruction_pointer;
            self.data_path.instruction_pointer =
                self.data_path
                    .alu_execute(AluOperation::Add, pointer, operation.offset, false)?;
        }
        Ok(())
    }

    /// Execute stage. Memory operations only latch the memory pointer here;
    /// the access itself belongs to the memory stage.
    pub(crate) fn execute_instruction(&mut self) -> Result<(), ExecutionError> {
        match self.data_path.command_data {
            Some(Operation::Binary(operation)) => self.execute_binary(operation),
            Some(Operation::Jump(operation)) => self.execute_jump(operation),
            Some(Operation::Memory(operation)) => {
                self.data_path.memory_pointer = operation.address;
                Ok(())
            }
            Some(Operation::Stack(operation)) => {
                let adjustment = match operation.code {
                    StackCode::Push => AluOperation::Sub,
                    StackCode::Grab => AluOperation::Add,
                };
                let pointer = self.data_path.stack_pointer;
                self.data_path.stack_pointer =
                    self.data_path.alu_execute(adjustment, pointer, 1, false)?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Memory stage: the actual data-memory or stack access, if any.
    pub(crate) fn memory_fetch(&mut self) -> Result<(), ExecutionError> {
        match self.data_path.command_data {
            Some(Operation::Memory(operation)) => match operation.code {
                MemoryCode::Load => self.data_path.memory_read(operation.right.code, false),
                MemoryCode::Save => self.data_path.memory_write(operation.right.code, false),
            },
            Some(Operation::Stack(operation)) => match operation.code {
                StackCode::Push => self.data_path.memory_write(operation.right.code, true),
                StackCode::Grab => self.data_path.memory_read(operation.right.code, true),
            },
            _ => Ok(()),
        }
    }

    pub(crate) fn save_state(&mut self) {
        let record = self.data_path.record_state();
        self.log.push(record);
    }

    /// Runs the program to completion. One snapshot is taken before the first
    /// fetch and one per executed cycle, including the cycle that raises an
    /// execution error.
    pub fn run(&mut self) -> Result<(), ExecutionError> {
        self.save_state();
        self.fetch_instruction();
        while !self.finished {
            trace!(
                "cycle {}: {:?}",
                self.log.len(),
                self.data_path.command_data
            );
            let outcome = self
                .execute_instruction()
                .and_then(|_| self.memory_fetch());
            if let Err(error) = outcome {
                self.save_state();
                return Err(error);
            }
            self.save_state();
            self.fetch_instruction();
        }
        Ok(())
    }
}
