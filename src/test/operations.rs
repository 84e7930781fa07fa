use serde_json::json;

use crate::operations::{
    BinaryCode, JumpCode, MemoryCode, Operation, Registry, StackCode,
};

#[test]
fn serialized_shapes() {
    let cases = vec![
        (
            Operation::binary(BinaryCode::Mov, Registry::A, 1),
            json!({
                "code": "mov",
                "right": {"type": "registry", "code": "A"},
                "left": {"type": "value", "value": 1},
            }),
        ),
        (
            Operation::binary(BinaryCode::Add, Registry::A, Registry::B),
            json!({
                "code": "add",
                "right": {"type": "registry", "code": "A"},
                "left": {"type": "registry", "code": "B"},
            }),
        ),
        (
            Operation::stack(StackCode::Push, Registry::B),
            json!({"code": "push", "right": {"type": "registry", "code": "B"}}),
        ),
        (
            Operation::jump(JumpCode::Jn, -7),
            json!({"code": "jn", "offset": -7}),
        ),
        (
            Operation::memory(MemoryCode::Save, Registry::A, 16),
            json!({
                "code": "save",
                "right": {"type": "registry", "code": "A"},
                "address": 16,
            }),
        ),
    ];

    for (operation, expected) in cases {
        assert_eq!(serde_json::to_value(&operation).unwrap(), expected);
    }
}

#[test]
fn operation_list_round_trips() {
    let operations = vec![
        Operation::binary(BinaryCode::Mov, Registry::A, 72),
        Operation::binary(BinaryCode::Cmp, Registry::A, Registry::B),
        Operation::binary(BinaryCode::Pmc, Registry::B, Registry::A),
        Operation::binary(BinaryCode::Mod, Registry::B, 10),
        Operation::stack(StackCode::Push, Registry::A),
        Operation::stack(StackCode::Grab, Registry::B),
        Operation::jump(JumpCode::Jz, 5),
        Operation::jump(JumpCode::Jb, -4),
        Operation::memory(MemoryCode::Load, Registry::A, 1),
        Operation::memory(MemoryCode::Save, Registry::B, 3),
    ];

    let serialized = serde_json::to_string(&operations).unwrap();
    let deserialized: Vec<Operation> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, operations);

    // A second trip changes nothing.
    assert_eq!(serde_json::to_string(&deserialized).unwrap(), serialized);
}

#[test]
fn defaults_fill_in_missing_fields() {
    let operation: Operation = serde_json::from_value(json!({"code": "jz"})).unwrap();
    assert_eq!(operation, Operation::jump(JumpCode::Jz, 1));

    let operation: Operation = serde_json::from_value(json!({"code": "push"})).unwrap();
    assert_eq!(operation, Operation::stack(StackCode::Push, Registry::A));

    let operation: Operation = serde_json::from_value(json!({
        "code": "mov",
        "left": {"type": "registry", "code": "B"},
    }))
    .unwrap();
    assert_eq!(operation, Operation::binary(BinaryCode::Mov, Registry::A, Registry::B));

    let operation: Operation = serde_json::from_value(json!({
        "code": "load",
        "address": 1,
    }))
    .unwrap();
    assert_eq!(operation, Operation::memory(MemoryCode::Load, Registry::A, 1));
}
