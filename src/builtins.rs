// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The fixed set of built-in operators. Each is bound to itself in the
//! global context, so a symbol's interned slot index doubles as its dispatch
//! code: look a name up, and if what comes back is one of these fourteen
//! small integers, you've found an operator rather than a closure.
//!
//! Slot 0 is `nil` and carries no operator of its own; it falls through to
//! the "apply as closure" path in both evaluators, which degrades it to
//! `nil` via the heap's lenient accessors.

/// Names interned (in this order) right after `nil`, so that `Quote` lands
/// on slot 1, `If` on slot 2, and so on through `LetRec` on slot 13.
pub const NAMES: [&str; 13] = [
    "'", "?", "+", "-", "*", "<", "=", ".", "head", "tail", "lambda", "let", "letrec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinId {
    Quote = 1,
    If = 2,
    Add = 3,
    Sub = 4,
    Mul = 5,
    Lt = 6,
    Eq = 7,
    Cons = 8,
    Head = 9,
    Tail = 10,
    Lambda = 11,
    Let = 12,
    LetRec = 13,
}

impl TryFrom<usize> for BuiltinId {
    type Error = ();

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Ok(match index {
            1 => BuiltinId::Quote,
            2 => BuiltinId::If,
            3 => BuiltinId::Add,
            4 => BuiltinId::Sub,
            5 => BuiltinId::Mul,
            6 => BuiltinId::Lt,
            7 => BuiltinId::Eq,
            8 => BuiltinId::Cons,
            9 => BuiltinId::Head,
            10 => BuiltinId::Tail,
            11 => BuiltinId::Lambda,
            12 => BuiltinId::Let,
            13 => BuiltinId::LetRec,
            _ => return Err(()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_line_up_with_slot_indices() {
        assert_eq!(NAMES[(BuiltinId::Quote as usize) - 1], "'");
        assert_eq!(NAMES[(BuiltinId::LetRec as usize) - 1], "letrec");
    }

    #[test]
    fn zero_and_out_of_range_are_not_builtins() {
        assert!(BuiltinId::try_from(0).is_err());
        assert!(BuiltinId::try_from(14).is_err());
    }
}
