use cvm::constants::IO_DEVICE_COUNT;

use crate::error::TranslationError;
use crate::variables::VariableIndex;

#[test]
fn invalid_names_are_rejected() {
    let mut variables = VariableIndex::new();
    for name in &["1000", "var-var", "VAR", "Var", "v r", ""] {
        assert_eq!(
            variables.read(name),
            Err(TranslationError::UnsupportedVariableName(name.to_string()))
        );
        assert_eq!(
            variables.register(name),
            Err(TranslationError::UnsupportedVariableName(name.to_string()))
        );
    }
}

#[test]
fn reading_an_unregistered_name_fails() {
    let variables = VariableIndex::new();
    assert_eq!(
        variables.read("var"),
        Err(TranslationError::UndefinedVariable("var".to_string()))
    );
}

#[test]
fn valid_names_allocate_contiguously() {
    let mut variables = VariableIndex::new();

    assert_eq!(variables.register("var").unwrap(), IO_DEVICE_COUNT);
    assert_eq!(variables.register("var_var").unwrap(), IO_DEVICE_COUNT + 1);
    assert_eq!(variables.register("_x0").unwrap(), IO_DEVICE_COUNT + 2);

    // Re-registration is idempotent and burns no slot.
    assert_eq!(variables.register("var_var").unwrap(), IO_DEVICE_COUNT + 1);
    assert_eq!(variables.register("x").unwrap(), IO_DEVICE_COUNT + 3);

    let definition = variables.read("var").unwrap();
    assert_eq!(definition.name, "var");
    assert_eq!(definition.location, IO_DEVICE_COUNT);
}
