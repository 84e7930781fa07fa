//! The operation model shared by the translator and the executor.
//!
//! Operations come in four families, each serialized as a flat JSON object
//! discriminated by its `code` field. The codes are globally unique across
//! families, so deserialization can pick the family from the code alone:
//!
//! Family | Codes | Extra fields
//! -------|-------|-------------
//! Binary | `mov`, `cmp`, `pmc`, `add`, `sub`, `mul`, `div`, `mod` | `right` (registry, default `A`), `left` (registry or value)
//! Stack  | `push`, `grab` | `right` (registry, default `A`)
//! Jump   | `jz`, `jn`, `jb` | `offset` (default `1`)
//! Memory | `load`, `save` | `right` (registry, default `A`), `address`

use serde::{Deserialize, Serialize};

use crate::Word;

/// Identifier of a general register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryCode {
    /// The accumulator.
    A,
    /// The buffer.
    B,
}

/// A register operand, serialized as `{"type": "registry", "code": "A"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "registry")]
pub struct Registry {
    pub code: RegistryCode,
}

impl Registry {
    pub const A: Registry = Registry {
        code: RegistryCode::A,
    };
    pub const B: Registry = Registry {
        code: RegistryCode::B,
    };
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::A
    }
}

impl From<RegistryCode> for Registry {
    fn from(code: RegistryCode) -> Registry {
        Registry { code }
    }
}

/// An immediate operand, serialized as `{"type": "value", "value": 7}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "value")]
pub struct Value {
    pub value: Word,
}

impl Value {
    pub fn new(value: Word) -> Value {
        Value { value }
    }
}

/// Source operand of a binary operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Registry(Registry),
    Value(Value),
}

impl From<Registry> for Operand {
    fn from(registry: Registry) -> Operand {
        Operand::Registry(registry)
    }
}

impl From<RegistryCode> for Operand {
    fn from(code: RegistryCode) -> Operand {
        Operand::Registry(Registry { code })
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Operand {
        Operand::Value(value)
    }
}

impl From<Word> for Operand {
    fn from(value: Word) -> Operand {
        Operand::Value(Value { value })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryCode {
    Mov,
    Cmp,
    Pmc,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackCode {
    Push,
    Grab,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpCode {
    Jz,
    Jn,
    Jb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCode {
    Load,
    Save,
}

/// ALU operation over `right ⊕ left`. `cmp` and `pmc` only set flags; every
/// other code stores the result back into `right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryOperation {
    pub code: BinaryCode,
    #[serde(default)]
    pub right: Registry,
    pub left: Operand,
}

/// Stack access. `push` decrements the stack pointer and writes the register
/// at the new top; `grab` reads the top into the register and increments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOperation {
    pub code: StackCode,
    #[serde(default)]
    pub right: Registry,
}

/// Instruction-pointer adjustment, conditional on a flag for `jz`/`jn`.
///
/// The offset applies after the post-fetch increment, so the default offset
/// of 1 makes a taken `jb` skip exactly one operation and an absent one a
/// placeholder that is patched once its target is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpOperation {
    #[serde(default = "JumpOperation::default_code")]
    pub code: JumpCode,
    #[serde(default = "JumpOperation::default_offset")]
    pub offset: Word,
}

impl JumpOperation {
    fn default_code() -> JumpCode {
        JumpCode::Jb
    }

    fn default_offset() -> Word {
        1
    }
}

impl Default for JumpOperation {
    fn default() -> JumpOperation {
        JumpOperation {
            code: JumpCode::Jb,
            offset: 1,
        }
    }
}

/// Data-memory access through the memory pointer, which is latched from
/// `address` at the execute stage; the access itself happens in the memory
/// stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryOperation {
    pub code: MemoryCode,
    #[serde(default)]
    pub right: Registry,
    pub address: Word,
}

/// One machine operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operation {
    Binary(BinaryOperation),
    Memory(MemoryOperation),
    Stack(StackOperation),
    Jump(JumpOperation),
}

impl Operation {
    pub fn binary<L: Into<Operand>>(code: BinaryCode, right: Registry, left: L) -> Operation {
        Operation::Binary(BinaryOperation {
            code,
            right,
            left: left.into(),
        })
    }

    pub fn stack(code: StackCode, right: Registry) -> Operation {
        Operation::Stack(StackOperation { code, right })
    }

    pub fn jump(code: JumpCode, offset: Word) -> Operation {
        Operation::Jump(JumpOperation { code, offset })
    }

    pub fn memory(code: MemoryCode, right: Registry, address: Word) -> Operation {
        Operation::Memory(MemoryOperation {
            code,
            right,
            address,
        })
    }
}
