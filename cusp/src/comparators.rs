//! Lowering templates for the comparison forms.

use cvm::operations::{BinaryCode, JumpCode};

/// How a textual comparator lowers: which flag the skip jump tests, whether
/// the compare runs with reversed operands, and whether the jump sense has to
/// be inverted with an extra unconditional jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComparatorTemplate {
    pub zero: bool,
    pub reverse: bool,
    pub negated: bool,
}

/// Concrete operation codes derived from a [`ComparatorTemplate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComparatorData {
    pub jump: JumpCode,
    pub command: BinaryCode,
    pub negated: bool,
}

impl ComparatorTemplate {
    pub fn data(self) -> ComparatorData {
        ComparatorData {
            jump: if self.zero { JumpCode::Jz } else { JumpCode::Jn },
            command: if self.reverse {
                BinaryCode::Pmc
            } else {
                BinaryCode::Cmp
            },
            negated: self.negated,
        }
    }
}

// The skip jump fires when the condition is false:
//   (>= a b) -> cmp is a-b, jn skips on a < b
//   (<  a b) -> cmp is a-b, jn hops into the body, jb skips otherwise
//   (<= a b) -> pmc is b-a, jn skips on a > b
//   (>  a b) -> pmc is b-a, jn hops into the body, jb skips otherwise
//   (=  a b) -> cmp is a-b, jz hops into the body, jb skips otherwise
//   (!= a b) -> cmp is a-b, jz skips on a = b
pub fn comparator(symbol: &str) -> Option<ComparatorTemplate> {
    let template = |zero, reverse, negated| ComparatorTemplate {
        zero,
        reverse,
        negated,
    };
    match symbol {
        ">=" => Some(template(false, false, false)),
        "<" => Some(template(false, false, true)),
        "<=" => Some(template(false, true, false)),
        ">" => Some(template(false, true, true)),
        "=" => Some(template(true, false, true)),
        "!=" => Some(template(true, false, false)),
        _ => None,
    }
}
