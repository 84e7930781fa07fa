//! Static JSON Schema for the compiled-program format.

use serde_json::{json, Value};

/// Schema of a compiled program: an array of operations discriminated by
/// their `code` field, mirroring the serde shapes in `cvm::operations`.
pub fn operation_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Compiled program",
        "type": "array",
        "items": { "$ref": "#/definitions/Operation" },
        "definitions": {
            "Registry": {
                "type": "object",
                "properties": {
                    "type": { "const": "registry" },
                    "code": { "enum": ["A", "B"] }
                },
                "required": ["code"]
            },
            "Value": {
                "type": "object",
                "properties": {
                    "type": { "const": "value" },
                    "value": { "type": "integer" }
                },
                "required": ["value"]
            },
            "Operand": {
                "anyOf": [
                    { "$ref": "#/definitions/Registry" },
                    { "$ref": "#/definitions/Value" }
                ]
            },
            "BinaryOperation": {
                "type": "object",
                "properties": {
                    "code": { "enum": ["mov", "cmp", "pmc", "add", "sub", "mul", "div", "mod"] },
                    "right": { "$ref": "#/definitions/Registry" },
                    "left": { "$ref": "#/definitions/Operand" }
                },
                "required": ["code", "left"]
            },
            "StackOperation": {
                "type": "object",
                "properties": {
                    "code": { "enum": ["push", "grab"] },
                    "right": { "$ref": "#/definitions/Registry" }
                },
                "required": ["code"]
            },
            "JumpOperation": {
                "type": "object",
                "properties": {
                    "code": { "enum": ["jz", "jn", "jb"], "default": "jb" },
                    "offset": { "type": "integer", "default": 1 }
                }
            },
            "MemoryOperation": {
                "type": "object",
                "properties": {
                    "code": { "enum": ["load", "save"] },
                    "right": { "$ref": "#/definitions/Registry" },
                    "address": { "type": "integer" }
                },
                "required": ["code", "address"]
            },
            "Operation": {
                "anyOf": [
                    { "$ref": "#/definitions/BinaryOperation" },
                    { "$ref": "#/definitions/MemoryOperation" },
                    { "$ref": "#/definitions/StackOperation" },
                    { "$ref": "#/definitions/JumpOperation" }
                ]
            }
        }
    })
}
