//! Variables and digit domains

use std::fmt;

/// Index of a variable inside a [`Model`](super::Model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

/// A set of decimal digits stored as a bitmask (bit `d` set means digit `d` is present)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet(u16);

impl DigitSet {
    pub const EMPTY: DigitSet = DigitSet(0);
    /// `{0..9}`
    pub const DIGITS: DigitSet = DigitSet(0x3FF);
    /// `{1..9}`
    pub const NONZERO: DigitSet = DigitSet(0x3FE);
    /// `{0, 1}`
    pub const BINARY: DigitSet = DigitSet(0b11);

    pub fn singleton(digit: u8) -> Self {
        debug_assert!(digit < 10);
        DigitSet(1 << digit)
    }

    pub fn contains(self, digit: u8) -> bool {
        digit < 10 && self.0 & (1 << digit) != 0
    }

    pub fn insert(&mut self, digit: u8) {
        debug_assert!(digit < 10);
        self.0 |= 1 << digit;
    }

    pub fn remove(&mut self, digit: u8) {
        self.0 &= !(1 << digit);
    }

    pub fn intersect(self, other: DigitSet) -> DigitSet {
        DigitSet(self.0 & other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl DoubleEndedIterator<Item = u8> {
        (0..10u8).filter(move |&d| self.contains(d))
    }

    /// Highest digit first
    pub fn iter_descending(self) -> impl Iterator<Item = u8> {
        self.iter().rev()
    }
}

impl fmt::Debug for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// What a variable stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// A distinct letter of the puzzle
    Letter(char),
    /// Carry out of column `n` (0 = least significant)
    Carry(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub kind: VariableKind,
    pub domain: DigitSet,
}

impl Variable {
    pub fn letter(ch: char, domain: DigitSet) -> Self {
        Self { kind: VariableKind::Letter(ch), domain }
    }

    pub fn carry(column: usize, domain: DigitSet) -> Self {
        Self { kind: VariableKind::Carry(column), domain }
    }

    pub fn is_carry(&self) -> bool {
        matches!(self.kind, VariableKind::Carry(_))
    }

    pub fn as_letter(&self) -> Option<char> {
        match self.kind {
            VariableKind::Letter(ch) => Some(ch),
            VariableKind::Carry(_) => None,
        }
    }

    /// Letters are named by themselves, carries `c1`, `c2`, ...
    pub fn name(&self) -> String {
        match self.kind {
            VariableKind::Letter(ch) => ch.to_string(),
            VariableKind::Carry(column) => format!("c{}", column + 1),
        }
    }
}
