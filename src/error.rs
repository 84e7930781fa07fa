use thiserror::Error;

use crate::Word;

/// Errors raised while the machine is running.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExecutionError {
    /// The address fell inside the device window but no device is wired to
    /// that cell.
    #[error("Device {0} not connected")]
    DeviceNotConnected(Word),

    #[error("An attempt to read from outside the memory")]
    ReadOutsideMemory,

    #[error("An attempt to write to outside the memory")]
    WriteOutsideMemory,

    #[error("Division by zero")]
    DivisionByZero,
}
