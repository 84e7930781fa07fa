//! The arithmetic-logic unit.

use crate::constants::{WORD_MAIN, WORD_MAX_VALUE, WORD_MIN_VALUE};
use crate::error::ExecutionError;
use crate::Word;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOperation {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// Pass the left input through. Used to route loaded memory words so the
    /// flags reflect the value that arrived in the register.
    Left,
    /// Pass the right input through. Backs the `mov` operation.
    Right,
}

/// Two word-sized inputs, a word-sized result and the two flag bits.
///
/// The unit itself is stateless between operations; the fields only hold the
/// most recent inputs and outcome so the data path can latch and inspect
/// them.
#[derive(Debug)]
pub struct Alu {
    pub left: Word,
    pub right: Word,
    pub result: Word,
    pub zero: bool,
    pub negative: bool,
}

impl Alu {
    pub fn new() -> Alu {
        Alu {
            left: 0,
            right: 0,
            result: 0,
            zero: true,
            negative: false,
        }
    }

    /// Applies `operation` to the latched inputs, folds the result into the
    /// word range and, unless `flags` is off, updates the flag bits from the
    /// folded result.
    ///
    /// Division and modulo truncate toward zero; a zero divisor is fatal.
    pub fn execute(&mut self, operation: AluOperation, flags: bool) -> Result<Word, ExecutionError> {
        let left = i64::from(self.left);
        let right = i64::from(self.right);

        let result = match operation {
            AluOperation::Add => left + right,
            AluOperation::Sub => left - right,
            AluOperation::Mul => left * right,
            AluOperation::Div => left
                .checked_div(right)
                .ok_or(ExecutionError::DivisionByZero)?,
            AluOperation::Mod => left
                .checked_rem(right)
                .ok_or(ExecutionError::DivisionByZero)?,
            AluOperation::Left => left,
            AluOperation::Right => right,
        };

        self.result = wrap_word(result);
        if flags {
            self.zero = self.result == 0;
            self.negative = self.result < 0;
        }
        Ok(self.result)
    }
}

impl Default for Alu {
    fn default() -> Alu {
        Alu::new()
    }
}

/// Folds an intermediate result into the machine word range.
///
/// Overflow past the maximum folds modulo 2³¹ into `[0, 2³¹)`; overflow below
/// the minimum folds modulo −2³¹ into `(−2³¹, 0]`.
pub fn wrap_word(value: i64) -> Word {
    if value > i64::from(WORD_MAX_VALUE) {
        value.rem_euclid(WORD_MAIN) as Word
    } else if value < i64::from(WORD_MIN_VALUE) {
        let modulus = -WORD_MAIN;
        ((value % modulus + modulus) % modulus) as Word
    } else {
        value as Word
    }
}
