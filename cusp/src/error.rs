use std::fmt;

use pest::error::Error as PestError;
use thiserror::Error;

use crate::parser::{Rule, Symbol};

/// Lexical failures.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Missing closing quotation mark")]
    UnterminatedString(#[source] Box<PestError<Rule>>),
}

/// Structural mistakes in the source, raised by the reader and translator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Unexpected closing symbol")]
    UnexpectedClosing,

    #[error("Missing closing bracket")]
    MissingClosingBracket,

    #[error("An expression was expected")]
    ExpectedExpression,

    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Argument can't be a string")]
    StringArgument,

    #[error("Unknown operation: '{0}'")]
    UnknownOperation(String),

    #[error("Unknown comparator: '{0}'")]
    UnknownComparator(String),

    #[error("Unsupported variable name: '{0}'")]
    UnsupportedVariableName(String),

    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(String),
}

/// A translation error paired with the symbol the reader was stepped back to,
/// which is the closest description of where the source went wrong.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationFailure {
    pub error: TranslationError,
    pub symbol: Option<Symbol>,
}

impl fmt::Display for TranslationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(
                f,
                "Translation error occurred at {}:{} ({}): {}",
                symbol.line, symbol.char, symbol.text, self.error
            ),
            None => write!(f, "Translation error occurred: {}", self.error),
        }
    }
}

impl std::error::Error for TranslationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Any failure of the source-to-operations pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Translation(#[from] TranslationFailure),
}
