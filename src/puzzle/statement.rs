//! The three words of a puzzle

use super::Layout;
use crate::csp::{build_model, Model};
use crate::errors::ModelError;
use serde::{Deserialize, Serialize};

/// An `ADDEND1 + ADDEND2 = SUM` puzzle as read from its source.
///
/// No checking happens here; the words are validated against the layout when
/// the model is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub layout: Layout,
    pub addend1: String,
    pub addend2: String,
    pub sum: String,
}

impl Puzzle {
    pub fn new(
        layout: Layout,
        addend1: impl Into<String>,
        addend2: impl Into<String>,
        sum: impl Into<String>,
    ) -> Self {
        Self {
            layout,
            addend1: addend1.into(),
            addend2: addend2.into(),
            sum: sum.into(),
        }
    }

    pub fn from_words(layout: Layout, words: [String; 3]) -> Self {
        let [addend1, addend2, sum] = words;
        Self { layout, addend1, addend2, sum }
    }

    pub fn words(&self) -> [&str; 3] {
        [&self.addend1, &self.addend2, &self.sum]
    }

    /// All characters in layout position order
    pub fn concatenated(&self) -> String {
        self.words().concat()
    }

    /// Build the constraint model for this puzzle
    pub fn build_model(&self) -> Result<Model, ModelError> {
        build_model(self.layout, &self.addend1, &self.addend2, &self.sum)
    }
}

impl std::fmt::Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.addend1, self.addend2, self.sum)
    }
}
