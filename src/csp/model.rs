//! Constraint model construction

use super::{Assignment, DigitSet, VarId, Variable};
use crate::errors::ModelError;
use crate::puzzle::Layout;
use itertools::Itertools;
use std::ops::Range;

/// Variables, domains and the all-different group for one puzzle.
///
/// Immutable once built. Letter variables come first in order of first
/// appearance across `addend1 ++ addend2 ++ sum`, followed by the carries
/// `c1 .. cN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    layout: Layout,
    variables: Vec<Variable>,
    /// Letter variable occupying each layout position
    positions: Vec<VarId>,
    /// Letters that must take pairwise distinct digits
    all_different: Vec<VarId>,
}

/// Build the constraint model for `addend1 + addend2 = sum` under `layout`.
///
/// Rejects words of the wrong width, non-letter characters and puzzles with
/// more than ten distinct letters.
pub fn build_model(
    layout: Layout,
    addend1: &str,
    addend2: &str,
    sum: &str,
) -> Result<Model, ModelError> {
    let expected = [
        ("addend1", addend1, layout.addend_width()),
        ("addend2", addend2, layout.addend_width()),
        ("sum", sum, layout.sum_width()),
    ];
    for (word, text, width) in expected {
        let actual = text.chars().count();
        if actual != width {
            return Err(ModelError::WidthMismatch {
                word,
                text: text.to_string(),
                expected: width,
                actual,
            });
        }
        if let Some(ch) = text.chars().find(|c| !c.is_alphabetic()) {
            return Err(ModelError::InvalidCharacter { word, ch });
        }
    }

    let cells: Vec<char> = addend1.chars().chain(addend2.chars()).chain(sum.chars()).collect();
    let letters: Vec<char> = cells.iter().copied().unique().collect();
    if letters.len() > 10 {
        return Err(ModelError::TooManyLetters { count: letters.len() });
    }

    let index_of = |ch: char| letters.iter().position(|&l| l == ch).map(VarId);
    let positions: Vec<VarId> = cells.iter().filter_map(|&ch| index_of(ch)).collect();

    // Domains are keyed by letter, so the tightest restriction from any occurrence wins
    let mut domains = vec![DigitSet::DIGITS; letters.len()];
    for position in layout.leading_positions() {
        let id = positions[position];
        domains[id.0] = domains[id.0].intersect(DigitSet::NONZERO);
    }
    // The final carry is 1, so the sum's extra leading digit is 1
    let sum_leading = positions[layout.sum_leading_position()];
    domains[sum_leading.0] = domains[sum_leading.0].intersect(DigitSet::singleton(1));

    let mut variables: Vec<Variable> = letters
        .iter()
        .zip(domains)
        .map(|(&ch, domain)| Variable::letter(ch, domain))
        .collect();

    let carry_count = layout.carry_count();
    variables.extend((0..carry_count).map(|column| {
        let domain = if column + 1 == carry_count {
            DigitSet::singleton(1)
        } else {
            DigitSet::BINARY
        };
        Variable::carry(column, domain)
    }));

    Ok(Model {
        layout,
        variables,
        positions,
        all_different: (0..letters.len()).map(VarId).collect(),
    })
}

impl Model {
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.0]
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = VarId> {
        (0..self.variables.len()).map(VarId)
    }

    pub fn letters(&self) -> impl Iterator<Item = (VarId, char)> + '_ {
        self.variables
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_letter().map(|ch| (VarId(i), ch)))
    }

    pub fn carries(&self) -> impl Iterator<Item = VarId> + '_ {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_carry())
            .map(|(i, _)| VarId(i))
    }

    pub fn positions(&self) -> &[VarId] {
        &self.positions
    }

    pub fn all_different(&self) -> &[VarId] {
        &self.all_different
    }

    /// Numeric value of the word spanning `range`, if all its letters are assigned
    pub fn word_value(&self, assignment: &Assignment, range: Range<usize>) -> Option<u64> {
        self.positions[range]
            .iter()
            .try_fold(0u64, |acc, &id| assignment.get(id).map(|d| acc * 10 + u64::from(d)))
    }

    /// Values of addend-1, addend-2 and the sum
    pub fn evaluate(&self, assignment: &Assignment) -> Option<[u64; 3]> {
        Some([
            self.word_value(assignment, self.layout.addend1_range())?,
            self.word_value(assignment, self.layout.addend2_range())?,
            self.word_value(assignment, self.layout.sum_range())?,
        ])
    }

    /// Replace a domain; only used to construct defective models in tests
    #[cfg(test)]
    pub(crate) fn with_domain(mut self, id: VarId, domain: DigitSet) -> Self {
        self.variables[id.0].domain = domain;
        self
    }

    pub fn statistics(&self) -> ModelStatistics {
        let layout = self.layout;
        let leading_letters = layout
            .leading_positions()
            .iter()
            .map(|&p| self.positions[p])
            .unique()
            .count();

        ModelStatistics {
            letter_variables: self.all_different.len(),
            carry_variables: self.carries().count(),
            leading_letters,
            fixed_variables: self.variables.iter().filter(|v| v.domain.len() == 1).count(),
            search_space: self
                .variables
                .iter()
                .map(|v| v.domain.len() as u128)
                .product(),
        }
    }
}

/// Statistics about a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatistics {
    pub letter_variables: usize,
    pub carry_variables: usize,
    pub leading_letters: usize,
    /// Variables whose domain is a singleton
    pub fixed_variables: usize,
    /// Product of all domain sizes, before the all-different constraint
    pub search_space: u128,
}

impl std::fmt::Display for ModelStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model Statistics:")?;
        writeln!(f, "  Letter variables: {}", self.letter_variables)?;
        writeln!(f, "  Carry variables: {}", self.carry_variables)?;
        writeln!(f, "  Leading letters: {}", self.leading_letters)?;
        writeln!(f, "  Fixed variables: {}", self.fixed_variables)?;
        writeln!(f, "  Raw search space: {}", self.search_space)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send_more_money() -> Model {
        build_model(Layout::STANDARD, "SEND", "MORE", "MONEY").unwrap()
    }

    fn domain_of(model: &Model, letter: char) -> DigitSet {
        let (id, _) = model.letters().find(|&(_, ch)| ch == letter).unwrap();
        model.variable(id).domain
    }

    #[test]
    fn test_letters_in_first_appearance_order() {
        let model = send_more_money();
        let letters: String = model.letters().map(|(_, ch)| ch).collect();
        assert_eq!(letters, "SENDMORY");
        assert_eq!(model.all_different().len(), 8);
        assert_eq!(model.variable_count(), 12);
    }

    #[test]
    fn test_domains() {
        let model = send_more_money();
        assert_eq!(domain_of(&model, 'S'), DigitSet::NONZERO);
        assert_eq!(domain_of(&model, 'E'), DigitSet::DIGITS);
        // M leads both an addend and the sum; the singleton wins
        assert_eq!(domain_of(&model, 'M'), DigitSet::singleton(1));
    }

    #[test]
    fn test_carry_domains() {
        let model = send_more_money();
        let carries: Vec<_> = model.carries().map(|id| model.variable(id).clone()).collect();
        assert_eq!(carries.len(), 4);
        assert_eq!(carries[0].name(), "c1");
        assert_eq!(carries[0].domain, DigitSet::BINARY);
        assert_eq!(carries[2].domain, DigitSet::BINARY);
        assert_eq!(carries[3].domain, DigitSet::singleton(1));
    }

    #[test]
    fn test_sum_leading_singleton_applies_to_all_occurrences() {
        // B leads the sum and also sits in non-leading positions of the addends
        let model = build_model(Layout::STANDARD, "ABBC", "DEFB", "BGHIJ").unwrap();
        assert_eq!(domain_of(&model, 'B'), DigitSet::singleton(1));
        assert_eq!(domain_of(&model, 'C'), DigitSet::DIGITS);
    }

    #[test]
    fn test_build_is_idempotent() {
        assert_eq!(send_more_money(), send_more_money());
    }

    #[test]
    fn test_positions_and_evaluate() {
        let model = send_more_money();
        assert_eq!(model.positions().len(), 13);

        let mut assignment = Assignment::new(model.variable_count());
        assert_eq!(model.evaluate(&assignment), None);

        for ((id, _), digit) in model.letters().zip([9, 5, 6, 7, 1, 0, 8, 2]) {
            assignment.set(id, digit);
        }
        assert_eq!(model.evaluate(&assignment), Some([9567, 1085, 10652]));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            build_model(Layout::STANDARD, "SEN", "MORE", "MONEY"),
            Err(ModelError::WidthMismatch { word: "addend1", expected: 4, actual: 3, .. })
        ));
        assert!(matches!(
            build_model(Layout::STANDARD, "SEND", "MORE", "MONE"),
            Err(ModelError::WidthMismatch { word: "sum", .. })
        ));
        assert_eq!(
            build_model(Layout::STANDARD, "SE1D", "MORE", "MONEY"),
            Err(ModelError::InvalidCharacter { word: "addend1", ch: '1' })
        );
        assert_eq!(
            build_model(Layout::STANDARD, "ABCD", "EFGH", "IJKLM"),
            Err(ModelError::TooManyLetters { count: 13 })
        );
    }

    #[test]
    fn test_statistics() {
        let stats = send_more_money().statistics();
        assert_eq!(stats.letter_variables, 8);
        assert_eq!(stats.carry_variables, 4);
        assert_eq!(stats.leading_letters, 2);
        assert_eq!(stats.fixed_variables, 2);
        // S: 9, E N D O R Y: 10 each, M: 1, carries 2 * 2 * 2 * 1
        assert_eq!(stats.search_space, 9 * 10u128.pow(6) * 8);
    }
}
