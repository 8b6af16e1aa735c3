//! Fixed column layout of a two-addend puzzle

use crate::errors::ModelError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Widest addend supported; the sum then has 10 digits, which still fits in a `u64`
pub const MAX_ADDEND_WIDTH: usize = 9;

/// Column metadata for `ADDEND1 + ADDEND2 = SUM`.
///
/// Both addends have `addend_width` letters and the sum has one more. Positions
/// index into the concatenation `addend1 ++ addend2 ++ sum`, so the standard
/// 4 + 4 = 5 layout spans 13 positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
    addend_width: usize,
}

/// One addition column, least significant first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub addend1: usize,
    pub addend2: usize,
    pub sum: usize,
    /// Index of the carry flowing into this column (none for the rightmost)
    pub carry_in: Option<usize>,
    /// Index of the carry this column produces
    pub carry_out: usize,
}

impl Layout {
    /// The 4 + 4 = 5 layout
    pub const STANDARD: Layout = Layout { addend_width: 4 };

    pub fn new(addend_width: usize) -> Result<Self, ModelError> {
        if !(1..=MAX_ADDEND_WIDTH).contains(&addend_width) {
            return Err(ModelError::UnsupportedWidth(addend_width));
        }
        Ok(Self { addend_width })
    }

    pub fn addend_width(&self) -> usize {
        self.addend_width
    }

    pub fn sum_width(&self) -> usize {
        self.addend_width + 1
    }

    /// Number of character positions across all three words
    pub fn total_width(&self) -> usize {
        2 * self.addend_width + self.sum_width()
    }

    pub fn addend1_range(&self) -> Range<usize> {
        0..self.addend_width
    }

    pub fn addend2_range(&self) -> Range<usize> {
        self.addend_width..2 * self.addend_width
    }

    pub fn sum_range(&self) -> Range<usize> {
        2 * self.addend_width..self.total_width()
    }

    /// Most significant position of each of the three numbers
    pub fn leading_positions(&self) -> [usize; 3] {
        [0, self.addend_width, 2 * self.addend_width]
    }

    pub fn sum_leading_position(&self) -> usize {
        2 * self.addend_width
    }

    /// One carry per column boundary, the last one feeding the sum's extra digit
    pub fn carry_count(&self) -> usize {
        self.addend_width
    }

    /// Addition columns from least to most significant
    pub fn columns(&self) -> Vec<Column> {
        let w = self.addend_width;
        (0..w)
            .map(|k| Column {
                addend1: w - 1 - k,
                addend2: 2 * w - 1 - k,
                sum: self.total_width() - 1 - k,
                carry_in: k.checked_sub(1),
                carry_out: k,
            })
            .collect()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let layout = Layout::STANDARD;
        assert_eq!(layout.total_width(), 13);
        assert_eq!(layout.addend2_range(), 4..8);
        assert_eq!(layout.sum_range(), 8..13);
        assert_eq!(layout.leading_positions(), [0, 4, 8]);
        assert_eq!(layout.carry_count(), 4);
    }

    #[test]
    fn test_columns_follow_carry_chain() {
        let columns = Layout::STANDARD.columns();
        assert_eq!(columns.len(), 4);

        let column = |addend1, addend2, sum, carry_in, carry_out| Column {
            addend1,
            addend2,
            sum,
            carry_in,
            carry_out,
        };
        assert_eq!(columns[0], column(3, 7, 12, None, 0));
        assert_eq!(columns[1], column(2, 6, 11, Some(0), 1));
        assert_eq!(columns[3], column(0, 4, 9, Some(2), 3));
    }

    #[test]
    fn test_width_bounds() {
        assert!(Layout::new(0).is_err());
        assert!(Layout::new(MAX_ADDEND_WIDTH + 1).is_err());
        assert_eq!(Layout::new(3).unwrap().total_width(), 10);
    }
}
