//! Partial assignment of digits to variables

use super::VarId;

/// Digit (or nothing) per variable, indexed by [`VarId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Option<u8>>,
    unassigned: usize,
}

impl Assignment {
    pub fn new(variable_count: usize) -> Self {
        Self {
            values: vec![None; variable_count],
            unassigned: variable_count,
        }
    }

    pub fn get(&self, id: VarId) -> Option<u8> {
        self.values[id.0]
    }

    pub fn is_assigned(&self, id: VarId) -> bool {
        self.values[id.0].is_some()
    }

    /// Set a previously unassigned variable
    pub fn set(&mut self, id: VarId, value: u8) {
        debug_assert!(self.values[id.0].is_none(), "variable {} assigned twice", id.0);
        self.values[id.0] = Some(value);
        self.unassigned -= 1;
    }

    /// Clear an assigned variable, returning its old value
    pub fn clear(&mut self, id: VarId) -> Option<u8> {
        let old = self.values[id.0].take();
        if old.is_some() {
            self.unassigned += 1;
        }
        old
    }

    pub fn is_complete(&self) -> bool {
        self.unassigned == 0
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Option<u8>] {
        &self.values
    }
}
