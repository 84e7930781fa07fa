use matches::assert_matches;

use crate::error::ParseError;
use crate::parser::{parse, Symbol};

fn texts(source: &str) -> Vec<String> {
    parse(source)
        .unwrap()
        .into_iter()
        .map(|symbol| symbol.text)
        .collect()
}

#[test]
fn splits() {
    assert_eq!(texts("hello"), ["hello"]);
    assert_eq!(texts("hello world"), ["hello", "world"]);
    assert_eq!(texts("(output 1)"), ["(output", "1", ")"]);
    assert_eq!(texts("\"hello world))\""), ["\"hello world))\""]);
    assert_eq!(texts("(+ (* 3 2) 5)"), ["(+", "(*", "3", "2", ")", "5", ")"]);
    assert_eq!(texts("(print (input))"), ["(print", "(input", ")", ")"]);
}

#[test]
fn whitespace_is_interchangeable() {
    assert_eq!(texts("  hello\n\tworld \n"), ["hello", "world"]);
    assert_eq!(texts("(output\n\t1\n)"), ["(output", "1", ")"]);
    assert_eq!(texts(""), [""; 0]);
    assert_eq!(texts(" \t\n"), [""; 0]);
}

#[test]
fn quotes_swallow_separators() {
    assert_eq!(
        texts("(print \"a b\n\tc)\")"),
        ["(print", "\"a b\n\tc)\"", ")"]
    );
}

#[test]
fn positions_point_at_the_first_character() {
    let symbols = parse("(output 1)\n  (input)").unwrap();
    let positions: Vec<(usize, usize, &str)> = symbols
        .iter()
        .map(|symbol| (symbol.line, symbol.char, symbol.text.as_str()))
        .collect();

    assert_eq!(
        positions,
        [
            (1, 0, "(output"),
            (1, 8, "1"),
            (1, 9, ")"),
            (2, 2, "(input"),
            (2, 8, ")"),
        ]
    );
}

#[test]
fn symbol_predicates() {
    let cases = [
        ("1", false, false, false),
        ("(input", true, false, false),
        ("\"hello\"", false, true, false),
        (")", false, false, true),
    ];
    for &(text, expression, quoted, closing) in &cases {
        let symbol = Symbol::new(text, 0, 0);
        assert_eq!(symbol.is_expression(), expression);
        assert_eq!(symbol.is_quoted(), quoted);
        assert_eq!(symbol.is_closing(), closing);
    }
}

#[test]
fn missing_quote_fails() {
    assert_matches!(parse("\"hey"), Err(ParseError::UnterminatedString(_)));
    assert_eq!(
        parse("\"hey").unwrap_err().to_string(),
        "Missing closing quotation mark"
    );
    assert_matches!(
        parse("(print \"unclosed)"),
        Err(ParseError::UnterminatedString(_))
    );
}
