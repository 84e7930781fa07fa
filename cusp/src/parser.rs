//! The lexer, implemented as a pest grammar over the raw source text.

use log::debug;
use pest::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(pest_derive::Parser)]
#[grammar = "cusp.pest"]
struct CuspParser;

/// One source token and the position of its first character (1-based line,
/// 0-based column).
///
/// A symbol is either a run of non-separator characters, a quoted sequence of
/// arbitrary characters (delimiters included in the text), or a lone `)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub text: String,
    pub line: usize,
    pub char: usize,
}

impl Symbol {
    pub fn new<T: Into<String>>(text: T, line: usize, char: usize) -> Symbol {
        Symbol {
            text: text.into(),
            line,
            char,
        }
    }

    /// Expression headers open a form: `(print`, `(+`, `(if`.
    pub fn is_expression(&self) -> bool {
        self.text.starts_with('(')
    }

    pub fn is_quoted(&self) -> bool {
        self.text.starts_with('"')
    }

    pub fn is_closing(&self) -> bool {
        self.text == ")"
    }
}

/// Splits `source` into symbols.
///
/// Whitespace separates symbols, `)` always stands alone, and `"` opens a
/// quoted symbol that runs to the next `"` regardless of what is in between.
/// The grammar accepts any other character sequence, so the only possible
/// failure is a string that never closes.
pub fn parse(source: &str) -> Result<Vec<Symbol>, ParseError> {
    let program = CuspParser::parse(Rule::program, source)
        .map_err(|error| ParseError::UnterminatedString(Box::new(error)))?
        .next()
        .unwrap();

    let symbols: Vec<Symbol> = program
        .into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(|pair| {
            let (line, column) = pair.as_span().start_pos().line_col();
            Symbol::new(pair.as_str(), line, column - 1)
        })
        .collect();

    debug!("parsed {} symbols: {:?}", symbols.len(), symbols);
    Ok(symbols)
}
