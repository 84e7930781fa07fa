use cvm::constants::{INPUT_ADDRESS, IO_DEVICE_COUNT, OUTPUT_ADDRESS};
use cvm::operations::{
    BinaryCode, JumpCode, MemoryCode, Operation, Registry, RegistryCode, StackCode,
};
use cvm::Word;

use crate::error::TranslationError;
use crate::parser::Symbol;
use crate::reader::Reader;
use crate::translator::Translator;

fn symbols(texts: &[&str]) -> Vec<Symbol> {
    texts.iter().map(|text| Symbol::new(*text, 0, 0)).collect()
}

/// A translator over the given symbols, with `var` pre-registered at the
/// first free address.
fn translator_over(texts: &[&str]) -> Translator {
    let mut translator = Translator::new(Reader::new(symbols(texts)));
    translator.variables.register("var").unwrap();
    translator
}

#[test]
fn arguments_lower_to_single_operations() {
    let extra = Operation::binary(BinaryCode::Mov, Registry::A, 1);
    let cases: Vec<(Vec<&str>, Operation)> = vec![
        (
            vec!["1"],
            Operation::binary(BinaryCode::Mov, Registry::A, 1),
        ),
        (
            vec!["var"],
            Operation::memory(MemoryCode::Load, Registry::A, IO_DEVICE_COUNT),
        ),
        (
            vec!["(input", ")"],
            Operation::memory(MemoryCode::Load, Registry::A, INPUT_ADDRESS),
        ),
    ];

    for (texts, expected) in cases {
        let mut translator = translator_over(&texts);
        translator
            .translate_argument(Some(extra), RegistryCode::A, false, true)
            .unwrap();
        assert_eq!(translator.result, vec![expected, extra]);
    }
}

#[test]
fn oversized_literals_wrap_into_the_word() {
    let mut translator = translator_over(&["2147483648"]);
    translator
        .translate_argument(None, RegistryCode::A, false, true)
        .unwrap();
    assert_eq!(
        translator.result,
        vec![Operation::binary(BinaryCode::Mov, Registry::A, 0)]
    );
}

#[test]
fn strings_are_rejected_outside_print() {
    let mut translator = translator_over(&["\"hello\""]);
    assert_eq!(
        translator.translate_argument(None, RegistryCode::A, false, true),
        Err(TranslationError::StringArgument)
    );
    assert_eq!(translator.offending_symbol().unwrap().text, "\"hello\"");
}

#[test]
fn operators_accumulate_through_the_buffer() {
    let cases = [
        ("+", BinaryCode::Add),
        ("-", BinaryCode::Sub),
        ("*", BinaryCode::Mul),
        ("/", BinaryCode::Div),
        ("%", BinaryCode::Mod),
    ];

    for &(operator, code) in &cases {
        for &stack in &[false, true] {
            let header = format!("({}", operator);
            let mut translator = translator_over(&[header.as_str(), "1", "2", ")"]);
            translator
                .translate_valuable(RegistryCode::A, stack)
                .unwrap();

            let mut expected = vec![
                Operation::binary(BinaryCode::Mov, Registry::A, 1),
                Operation::binary(BinaryCode::Mov, Registry::B, 2),
                Operation::binary(code, Registry::A, Registry::B),
            ];
            if stack {
                expected.insert(1, Operation::stack(StackCode::Push, Registry::B));
                expected.push(Operation::stack(StackCode::Grab, Registry::B));
            }
            assert_eq!(translator.result, expected, "case ({} ...), stack={}", operator, stack);
        }
    }
}

#[test]
fn operator_arguments_may_be_variables_and_expressions() {
    let mut translator = translator_over(&["(+", "1", "var", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();
    assert_eq!(
        translator.result,
        vec![
            Operation::binary(BinaryCode::Mov, Registry::A, 1),
            Operation::memory(MemoryCode::Load, Registry::B, IO_DEVICE_COUNT),
            Operation::binary(BinaryCode::Add, Registry::A, Registry::B),
        ]
    );

    let mut translator = translator_over(&["(+", "1", "(input", ")", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();
    assert_eq!(
        translator.result,
        vec![
            Operation::binary(BinaryCode::Mov, Registry::A, 1),
            Operation::memory(MemoryCode::Load, Registry::B, INPUT_ADDRESS),
            Operation::binary(BinaryCode::Add, Registry::A, Registry::B),
        ]
    );
}

#[test]
fn nested_operations_preserve_the_accumulator() {
    let mut translator = translator_over(&["(+", "1", "(*", "2", "3", ")", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();

    assert_eq!(
        translator.result,
        vec![
            Operation::binary(BinaryCode::Mov, Registry::A, 1),
            Operation::binary(BinaryCode::Mov, Registry::B, 2),
            Operation::stack(StackCode::Push, Registry::A),
            Operation::binary(BinaryCode::Mov, Registry::A, 3),
            Operation::binary(BinaryCode::Mul, Registry::B, Registry::A),
            Operation::stack(StackCode::Grab, Registry::A),
            Operation::binary(BinaryCode::Add, Registry::A, Registry::B),
        ]
    );
}

#[test]
fn print_and_assign_end_with_a_save() {
    let cases: Vec<(Vec<&str>, Word)> = vec![
        (vec!["(print", "var", ")"], OUTPUT_ADDRESS),
        (vec!["(print", "\"h\"", ")"], OUTPUT_ADDRESS),
        (vec!["(assign", "var", "1", ")"], IO_DEVICE_COUNT),
    ];

    for (texts, address) in cases {
        let mut translator = translator_over(&texts);
        translator.translate_valuable(RegistryCode::A, false).unwrap();

        assert_eq!(translator.result.len(), 2);
        assert_eq!(
            translator.result[1],
            Operation::memory(MemoryCode::Save, Registry::A, address)
        );
    }
}

#[test]
fn quoted_strings_emit_one_save_per_character() {
    let mut translator = translator_over(&["(print", "\"ab\"", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();

    let save = Operation::memory(MemoryCode::Save, Registry::A, OUTPUT_ADDRESS);
    assert_eq!(
        translator.result,
        vec![
            Operation::binary(BinaryCode::Mov, Registry::A, 'a' as Word),
            save,
            Operation::binary(BinaryCode::Mov, Registry::A, 'b' as Word),
            save,
        ]
    );
}

#[test]
fn output_emits_the_decimal_template() {
    let mut translator = translator_over(&["(output", "var", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();

    // The variable load plus the fixed 28-operation template.
    assert_eq!(translator.result.len(), 29);
    assert_eq!(
        translator.result[0],
        Operation::memory(MemoryCode::Load, Registry::A, IO_DEVICE_COUNT)
    );
    assert_eq!(
        translator.result[1],
        Operation::stack(StackCode::Push, Registry::A)
    );
    // The zero path bails out over the sign and digit handling.
    assert_eq!(translator.result[7], Operation::jump(JumpCode::Jb, 18));
    // The digit loop closes back on itself.
    assert_eq!(translator.result[21], Operation::jump(JumpCode::Jb, -7));
    assert_eq!(
        translator.result.last(),
        Some(&Operation::stack(StackCode::Grab, Registry::A))
    );
}

#[test]
fn if_with_variable_condition() {
    let mut translator = translator_over(&["(if", "var", "(input", ")", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();

    assert_eq!(
        translator.result,
        vec![
            Operation::memory(MemoryCode::Load, Registry::A, IO_DEVICE_COUNT),
            Operation::jump(JumpCode::Jz, 1),
            Operation::memory(MemoryCode::Load, Registry::A, INPUT_ADDRESS),
        ]
    );
}

#[test]
fn if_with_plain_comparator() {
    let mut translator = translator_over(&["(if", "(>=", "var", "1", ")", "(input", ")", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();

    assert_eq!(
        translator.result,
        vec![
            Operation::memory(MemoryCode::Load, Registry::A, IO_DEVICE_COUNT),
            Operation::binary(BinaryCode::Mov, Registry::B, 1),
            Operation::binary(BinaryCode::Cmp, Registry::A, Registry::B),
            Operation::jump(JumpCode::Jn, 1),
            Operation::memory(MemoryCode::Load, Registry::A, INPUT_ADDRESS),
        ]
    );
}

#[test]
fn negated_comparators_add_an_inverting_jump() {
    let mut translator = translator_over(&["(if", "(=", "var", "1", ")", "(input", ")", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();

    assert_eq!(
        translator.result,
        vec![
            Operation::memory(MemoryCode::Load, Registry::A, IO_DEVICE_COUNT),
            Operation::binary(BinaryCode::Mov, Registry::B, 1),
            Operation::binary(BinaryCode::Cmp, Registry::A, Registry::B),
            Operation::jump(JumpCode::Jz, 1),
            Operation::jump(JumpCode::Jb, 1),
            Operation::memory(MemoryCode::Load, Registry::A, INPUT_ADDRESS),
        ]
    );
}

#[test]
fn loop_jumps_back_to_the_condition() {
    let mut translator = translator_over(&["(loop", "(!=", "var", "0", ")", "(input", ")", ")"]);
    translator.translate_valuable(RegistryCode::A, false).unwrap();

    assert_eq!(
        translator.result,
        vec![
            Operation::memory(MemoryCode::Load, Registry::A, IO_DEVICE_COUNT),
            Operation::binary(BinaryCode::Mov, Registry::B, 0),
            Operation::binary(BinaryCode::Cmp, Registry::A, Registry::B),
            Operation::jump(JumpCode::Jz, 2),
            Operation::memory(MemoryCode::Load, Registry::A, INPUT_ADDRESS),
            Operation::jump(JumpCode::Jb, -6),
        ]
    );
}

#[test]
fn unknown_heads_are_reported_with_their_symbol() {
    let mut translator = Translator::new(Reader::new(vec![Symbol::new("(!", 2, 4)]));
    assert_eq!(
        translator.translate_valuable(RegistryCode::A, false),
        Err(TranslationError::UnknownOperation("!".to_string()))
    );

    let symbol = translator.offending_symbol().unwrap();
    assert_eq!((symbol.line, symbol.char, symbol.text.as_str()), (2, 4, "(!"));
}

#[test]
fn unknown_comparators_are_reported() {
    let mut translator = translator_over(&["(if", "(==", "var", "1", ")", "(input", ")", ")"]);
    assert_eq!(
        translator.translate_valuable(RegistryCode::A, false),
        Err(TranslationError::UnknownComparator("==".to_string()))
    );
}

#[test]
fn blocks_stop_at_a_closing_symbol_only_when_allowed() {
    let mut translator = Translator::new(Reader::new(vec![]));
    translator.translate_blocks(false).unwrap();
    assert!(translator.result.is_empty());

    let mut translator = Translator::new(Reader::new(symbols(&[")"])));
    translator.translate_blocks(true).unwrap();
    assert!(translator.result.is_empty());

    let mut translator = Translator::new(Reader::new(symbols(&[")"])));
    assert_eq!(
        translator.translate_blocks(false),
        Err(TranslationError::UnexpectedClosing)
    );
}

#[test]
fn error_messages_are_literal() {
    assert_eq!(
        TranslationError::UnexpectedClosing.to_string(),
        "Unexpected closing symbol"
    );
    assert_eq!(
        TranslationError::MissingClosingBracket.to_string(),
        "Missing closing bracket"
    );
    assert_eq!(
        TranslationError::ExpectedExpression.to_string(),
        "An expression was expected"
    );
    assert_eq!(
        TranslationError::StringArgument.to_string(),
        "Argument can't be a string"
    );
    assert_eq!(
        TranslationError::UnknownOperation("!".to_string()).to_string(),
        "Unknown operation: '!'"
    );
    assert_eq!(
        TranslationError::UnknownComparator("==".to_string()).to_string(),
        "Unknown comparator: '=='"
    );
    assert_eq!(
        TranslationError::UnsupportedVariableName("VAR".to_string()).to_string(),
        "Unsupported variable name: 'VAR'"
    );
    assert_eq!(
        TranslationError::UndefinedVariable("x".to_string()).to_string(),
        "Variable 'x' is not defined"
    );
}
