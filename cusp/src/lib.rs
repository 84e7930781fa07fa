//! Translator for the Cusp language, targeting the [cvm](../cvm/index.html)
//! accumulator machine.
//!
//! The main function provided by this crate is [`translate`](fn.translate.html),
//! which accepts a string containing Cusp source code and outputs the flat
//! list of machine operations ready for execution (or for serialization to
//! the `.curp` JSON format by a caller). [`parse`](fn.parse.html) exposes the
//! intermediate symbol list on its own.
//!
//! # The Cusp Language
//!
//! A Cusp program is a sequence of parenthesized prefix-notation forms. A
//! *valuable* is anything that leaves its result in the accumulator: an
//! integer literal, a variable name, or a form.
//!
//! Form | Effect
//! -----|-------
//! `(input)` | reads one word from the input device
//! `(print X)` | writes `X` to the output device; `X` may be a quoted string, which is written character by character
//! `(output X)` | writes `X` as decimal digits, with `-` for negatives and a trailing newline
//! `(assign name X)` | registers `name` (first use allocates its cell) and stores `X` there
//! `(+ a b ...)`, `(-`, `(*`, `(/`, `(%` | left-to-right arithmetic over the accumulator
//! `(if cond body ...)` | runs the body forms when `cond` holds
//! `(loop cond body ...)` | re-runs the body forms while `cond` holds
//!
//! A condition is either a variable (true when non-zero) or a comparison:
//! `>=`, `<`, `<=`, `>`, `=`, `!=`. Variable names match
//! `[a-z_][a-z_0-9]*`; integer literals are plain digit runs. Quoted strings
//! may contain any characters, including brackets and newlines, and are only
//! allowed inside `print`.
//!
//! # Errors
//!
//! Lexing fails only on an unterminated string ([`ParseError`]). Everything
//! structural is a [`TranslationError`]; [`translate`] wraps it together with
//! the offending symbol as a [`TranslationFailure`], so callers can report
//! the source position.
//!
//! [`ParseError`]: enum.ParseError.html
//! [`TranslationError`]: enum.TranslationError.html
//! [`TranslationFailure`]: struct.TranslationFailure.html
//! [`translate`]: fn.translate.html

pub mod comparators;
pub mod error;
pub mod parser;
pub mod reader;
pub mod translator;
pub mod variables;

#[cfg(test)]
mod test;

pub use crate::error::{Error, ParseError, TranslationError, TranslationFailure};
pub use crate::parser::{parse, Symbol};
pub use crate::reader::Reader;
pub use crate::translator::Translator;
pub use crate::variables::{VarDef, VariableIndex};

use cvm::operations::Operation;

/// Translates Cusp source text into machine operations.
pub fn translate(source: &str) -> Result<Vec<Operation>, Error> {
    let symbols = parse(source)?;
    Ok(translate_symbols(symbols)?)
}

/// Translates an already-parsed symbol sequence.
///
/// On failure the reader is stepped back one symbol and that symbol is
/// captured alongside the error.
pub fn translate_symbols(symbols: Vec<Symbol>) -> Result<Vec<Operation>, TranslationFailure> {
    let mut translator = Translator::new(Reader::new(symbols));
    match translator.translate_blocks(false) {
        Ok(()) => Ok(translator.into_operations()),
        Err(error) => {
            let symbol = translator.offending_symbol();
            Err(TranslationFailure { error, symbol })
        }
    }
}
