//! Solved puzzle representation

use super::validator::{column_carries, word_values};
use crate::csp::{Assignment, Model, SearchStats};
use crate::puzzle::Puzzle;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// A digit for every letter of a puzzle, with the equation it satisfies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub puzzle: Puzzle,
    /// Digit per letter
    pub letters: BTreeMap<char, u8>,
    /// The three words rendered as digits
    pub digits: [String; 3],
    pub values: [u64; 3],
    /// Arithmetic carry out of each column, least significant first
    pub carries: Vec<u8>,
    pub stats: SearchStats,
    /// Time taken by the search
    #[serde(skip)]
    pub solve_time: Duration,
}

impl Solution {
    /// Build a solution from a complete assignment of `model`
    pub fn from_assignment(
        puzzle: &Puzzle,
        model: &Model,
        assignment: &Assignment,
        stats: SearchStats,
        solve_time: Duration,
    ) -> Result<Self> {
        let letters: BTreeMap<char, u8> = model
            .letters()
            .map(|(id, ch)| {
                assignment
                    .get(id)
                    .map(|digit| (ch, digit))
                    .ok_or_else(|| anyhow::anyhow!("letter {} left unassigned", ch))
            })
            .collect::<Result<_>>()?;

        let position_digits: Vec<u8> = model
            .positions()
            .iter()
            .map(|&id| assignment.get(id).unwrap_or_default())
            .collect();

        let layout = model.layout();
        let render = |range: std::ops::Range<usize>| -> String {
            position_digits[range].iter().map(|d| char::from(b'0' + d)).collect()
        };

        Ok(Self {
            puzzle: puzzle.clone(),
            digits: [
                render(layout.addend1_range()),
                render(layout.addend2_range()),
                render(layout.sum_range()),
            ],
            values: word_values(layout, &position_digits),
            carries: column_carries(layout, &position_digits),
            letters,
            stats,
            solve_time,
        })
    }

    pub fn digit_of(&self, letter: char) -> Option<u8> {
        self.letters.get(&letter).copied()
    }

    /// The solved digits, one number per line
    pub fn digit_lines(&self) -> String {
        self.digits.join("\n")
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
