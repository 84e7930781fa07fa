//! The flat variable namespace.

use std::collections::HashMap;

use regex::Regex;

use cvm::constants::IO_DEVICE_COUNT;
use cvm::Word;

use crate::error::TranslationError;

/// A resolved variable: its name and data-memory address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarDef {
    pub name: String,
    pub location: Word,
}

/// Append-only name → address table.
///
/// Addresses are handed out in first-seen order from a counter that starts
/// just past the device window, so variables never shadow a device cell.
pub struct VariableIndex {
    pattern: Regex,
    variables: HashMap<String, Word>,
    next_location: Word,
}

impl VariableIndex {
    pub fn new() -> VariableIndex {
        VariableIndex {
            pattern: Regex::new("^[a-z_][a-z_0-9]*$").unwrap(),
            variables: HashMap::new(),
            next_location: IO_DEVICE_COUNT,
        }
    }

    fn check_name(&self, name: &str) -> Result<(), TranslationError> {
        if self.pattern.is_match(name) {
            Ok(())
        } else {
            Err(TranslationError::UnsupportedVariableName(name.to_string()))
        }
    }

    /// Returns the address of `name`, allocating the next free slot the
    /// first time the name is seen.
    pub fn register(&mut self, name: &str) -> Result<Word, TranslationError> {
        self.check_name(name)?;
        if !self.variables.contains_key(name) {
            self.variables.insert(name.to_string(), self.next_location);
            self.next_location += 1;
        }
        Ok(self.variables[name])
    }

    /// Looks up an already-registered name.
    pub fn read(&self, name: &str) -> Result<VarDef, TranslationError> {
        self.check_name(name)?;
        match self.variables.get(name) {
            Some(&location) => Ok(VarDef {
                name: name.to_string(),
                location,
            }),
            None => Err(TranslationError::UndefinedVariable(name.to_string())),
        }
    }
}

impl Default for VariableIndex {
    fn default() -> VariableIndex {
        VariableIndex::new()
    }
}
