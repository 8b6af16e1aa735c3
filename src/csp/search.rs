//! Backtracking search over a [`Model`]
//!
//! Depth-first search with a single [`Assignment`] mutated on descent and
//! restored on backtrack. Variables are picked by minimum remaining values,
//! digits are tried highest first, and the only constraint checked during
//! descent is that letters take distinct digits. Carries are assigned like
//! any other variable but never prune; the arithmetic is checked once the
//! assignment is complete.

use super::{Assignment, DigitSet, Model, VarId};
use crate::errors::SearchError;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Result of an exhaustive search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Assignment),
    /// Every branch was explored without satisfying the equation
    NoSolution,
}

impl Outcome {
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Outcome::Solved(assignment) => Some(assignment),
            Outcome::NoSolution => None,
        }
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Recursive calls made
    pub nodes: u64,
    /// Assignments undone after their subtree failed
    pub backtracks: u64,
    /// Complete assignments rejected by the arithmetic check
    pub rejected_complete: u64,
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes: {}", self.nodes)?;
        writeln!(f, "  Backtracks: {}", self.backtracks)?;
        writeln!(f, "  Rejected complete assignments: {}", self.rejected_complete)?;
        Ok(())
    }
}

/// Search for one assignment satisfying `model`
pub fn solve(model: &Model) -> Result<Outcome, SearchError> {
    SearchEngine::new(model).run().map(|(outcome, _)| outcome)
}

/// Same as [`solve`], also returning the search counters
pub fn solve_with_stats(model: &Model) -> Result<(Outcome, SearchStats), SearchError> {
    SearchEngine::new(model).run()
}

/// State of one search: the assignment on the active path plus the digits
/// currently held by all-different members.
pub struct SearchEngine<'m> {
    model: &'m Model,
    assignment: Assignment,
    distinct: Vec<bool>,
    in_use: DigitSet,
    stats: SearchStats,
}

impl<'m> SearchEngine<'m> {
    pub fn new(model: &'m Model) -> Self {
        let mut distinct = vec![false; model.variable_count()];
        for id in model.all_different() {
            distinct[id.0] = true;
        }

        Self {
            model,
            assignment: Assignment::new(model.variable_count()),
            distinct,
            in_use: DigitSet::EMPTY,
            stats: SearchStats::default(),
        }
    }

    /// Run the search to completion
    pub fn run(mut self) -> Result<(Outcome, SearchStats), SearchError> {
        debug!(
            "Searching {} variables ({} letters)",
            self.model.variable_count(),
            self.model.all_different().len()
        );

        let outcome = if self.backtrack()? {
            Outcome::Solved(self.assignment)
        } else {
            Outcome::NoSolution
        };

        debug!(
            "Search finished after {} nodes, {} backtracks",
            self.stats.nodes, self.stats.backtracks
        );
        Ok((outcome, self.stats))
    }

    /// Returns true when the current assignment has been extended to a solution,
    /// leaving it in place.
    fn backtrack(&mut self) -> Result<bool, SearchError> {
        self.stats.nodes += 1;

        if self.assignment.is_complete() {
            if self.satisfies_equation() {
                return Ok(true);
            }
            self.stats.rejected_complete += 1;
            trace!("Rejected complete assignment {:?}", self.assignment.values());
            return Ok(false);
        }

        let Some(id) = self.select_unassigned_variable() else {
            return Ok(false);
        };

        let domain = self.model.variable(id).domain;
        if domain.is_empty() {
            return Err(SearchError::EmptyDomain {
                name: self.model.variable(id).name(),
            });
        }

        for value in order_domain_values(domain) {
            if !self.is_consistent(id, value) {
                continue;
            }

            self.assign(id, value);
            if self.backtrack()? {
                return Ok(true);
            }
            self.unassign(id);
            self.stats.backtracks += 1;
        }

        Ok(false)
    }

    /// The unassigned variable with the fewest consistent values; the first
    /// one in model order wins ties.
    fn select_unassigned_variable(&self) -> Option<VarId> {
        let mut selected = None;
        let mut fewest = usize::MAX;

        for id in self.model.ids() {
            if self.assignment.is_assigned(id) {
                continue;
            }
            let remaining = self.remaining_values(id);
            if remaining < fewest {
                selected = Some(id);
                fewest = remaining;
                if remaining == 0 {
                    break;
                }
            }
        }

        selected
    }

    fn remaining_values(&self, id: VarId) -> usize {
        let domain = self.model.variable(id).domain;
        if self.distinct[id.0] {
            domain.iter().filter(|&v| !self.in_use.contains(v)).count()
        } else {
            domain.len()
        }
    }

    /// Only the all-different constraint is checked here
    fn is_consistent(&self, id: VarId, value: u8) -> bool {
        !self.distinct[id.0] || !self.in_use.contains(value)
    }

    fn assign(&mut self, id: VarId, value: u8) {
        self.assignment.set(id, value);
        if self.distinct[id.0] {
            self.in_use.insert(value);
        }
    }

    fn unassign(&mut self, id: VarId) {
        if let Some(value) = self.assignment.clear(id) {
            if self.distinct[id.0] {
                self.in_use.remove(value);
            }
        }
    }

    fn satisfies_equation(&self) -> bool {
        matches!(
            self.model.evaluate(&self.assignment),
            Some([addend1, addend2, sum]) if addend1 + addend2 == sum
        )
    }
}

/// Candidate values in the order they are tried
fn order_domain_values(domain: DigitSet) -> impl Iterator<Item = u8> {
    domain.iter_descending()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::build_model;
    use crate::puzzle::Layout;
    use itertools::Itertools;
    use std::collections::HashMap;

    fn letter_digits(model: &Model, assignment: &Assignment) -> HashMap<char, u8> {
        model
            .letters()
            .map(|(id, ch)| (ch, assignment.get(id).unwrap()))
            .collect()
    }

    #[test]
    fn test_send_more_money() {
        let model = build_model(Layout::STANDARD, "SEND", "MORE", "MONEY").unwrap();
        let outcome = solve(&model).unwrap();
        let assignment = outcome.assignment().expect("puzzle has a solution");

        assert_eq!(model.evaluate(assignment), Some([9567, 1085, 10652]));
        let digits = letter_digits(&model, assignment);
        assert_eq!(digits[&'M'], 1);
        assert_eq!(digits[&'O'], 0);
    }

    #[test]
    fn test_solution_is_sound() {
        let model = build_model(Layout::STANDARD, "BASE", "BALL", "GAMES").unwrap();
        let outcome = solve(&model).unwrap();
        let assignment = outcome.assignment().unwrap();

        let [a, b, s] = model.evaluate(assignment).unwrap();
        assert_eq!(a + b, s);

        let digits = letter_digits(&model, assignment);
        assert!(digits.values().all_unique());
        for position in Layout::STANDARD.leading_positions() {
            assert_ne!(assignment.get(model.positions()[position]), Some(0));
        }
    }

    #[test]
    fn test_equal_addends_solved_normally() {
        let layout = Layout::new(3).unwrap();
        let model = build_model(layout, "TWO", "TWO", "FOUR").unwrap();
        let outcome = solve(&model).unwrap();
        let assignment = outcome.assignment().unwrap();

        let [a, b, s] = model.evaluate(assignment).unwrap();
        assert_eq!(a, b);
        assert_eq!(a + b, s);
    }

    #[test]
    fn test_unsolvable_puzzle_exhausts() {
        let model = build_model(Layout::STANDARD, "AAAA", "AAAA", "BBBBB").unwrap();
        let (outcome, stats) = solve_with_stats(&model).unwrap();

        assert_eq!(outcome, Outcome::NoSolution);
        // A takes 2..=9 (B holds 1), times 2^3 free carries
        assert_eq!(stats.rejected_complete, 8 * 8);
    }

    #[test]
    fn test_search_is_deterministic() {
        let model = build_model(Layout::STANDARD, "BASE", "BALL", "GAMES").unwrap();
        let first = solve_with_stats(&model).unwrap();
        let second = solve_with_stats(&model).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_carries_take_highest_value_first() {
        // Carries never prune, so the first carry values tried are kept
        let model = build_model(Layout::STANDARD, "SEND", "MORE", "MONEY").unwrap();
        let outcome = solve(&model).unwrap();
        let assignment = outcome.assignment().unwrap();
        for id in model.carries() {
            assert_eq!(assignment.get(id), Some(1));
        }
    }

    #[test]
    fn test_mrv_prefers_most_constrained() {
        let model = build_model(Layout::STANDARD, "SEND", "MORE", "MONEY").unwrap();
        let engine = SearchEngine::new(&model);

        // M has the singleton domain {1} and comes before the fixed carry
        let selected = engine.select_unassigned_variable().unwrap();
        assert_eq!(model.variable(selected).name(), "M");
    }

    #[test]
    fn test_selection_counts_values_left_by_assignment() {
        let model = build_model(Layout::STANDARD, "SEND", "MORE", "MONEY").unwrap();
        let mut engine = SearchEngine::new(&model);
        let m = VarId(4);

        // S takes M's only digit, leaving M nothing
        engine.assign(VarId(0), 1);
        assert_eq!(engine.remaining_values(m), 0);
        assert_eq!(engine.select_unassigned_variable(), Some(m));

        // Ten letters: once nine digits are taken, J has a single value left
        // against the two of each free carry
        let model = build_model(Layout::STANDARD, "ABCD", "EFGH", "IJABC").unwrap();
        let mut engine = SearchEngine::new(&model);
        let j = VarId(9);
        let last_carry = VarId(13);
        assert_eq!(model.variable(j).domain.len(), 10);

        engine.assign(VarId(8), 1);
        for (letter, digit) in (0..8).zip(2..) {
            engine.assign(VarId(letter), digit);
        }
        engine.assign(last_carry, 1);

        assert_eq!(engine.remaining_values(j), 1);
        assert_eq!(engine.remaining_values(VarId(10)), 2);
        assert_eq!(engine.select_unassigned_variable(), Some(j));
    }

    #[test]
    fn test_selection_ties_go_to_first_variable() {
        let model = build_model(Layout::STANDARD, "SEND", "MORE", "MONEY").unwrap();
        let mut engine = SearchEngine::new(&model);

        // With M and c4 fixed, c1..c3 all have two values
        engine.assign(VarId(4), 1);
        engine.assign(VarId(11), 1);
        let selected = engine.select_unassigned_variable().unwrap();
        assert_eq!(selected, VarId(8));
        assert_eq!(model.variable(selected).name(), "c1");

        // E, N, D, O, R and Y all have eight digits left
        for carry in 8..11 {
            engine.assign(VarId(carry), 1);
        }
        engine.assign(VarId(0), 9);
        for letter in [1, 2, 3, 5, 6, 7] {
            assert_eq!(engine.remaining_values(VarId(letter)), 8);
        }
        assert_eq!(engine.select_unassigned_variable(), Some(VarId(1)));
    }

    #[test]
    fn test_consistency_ignores_carries() {
        let model = build_model(Layout::STANDARD, "SEND", "MORE", "MONEY").unwrap();
        let mut engine = SearchEngine::new(&model);
        let s = VarId(0);
        let carry = model.carries().next().unwrap();

        engine.assign(s, 1);
        assert!(!engine.is_consistent(VarId(1), 1));
        assert!(engine.is_consistent(carry, 1));
        assert_eq!(engine.remaining_values(VarId(1)), 9);

        engine.unassign(s);
        assert!(engine.is_consistent(VarId(1), 1));
    }

    #[test]
    fn test_empty_domain_fails_loudly() {
        let model = build_model(Layout::STANDARD, "SEND", "MORE", "MONEY")
            .unwrap()
            .with_domain(VarId(2), DigitSet::EMPTY);

        assert_eq!(
            solve(&model),
            Err(SearchError::EmptyDomain { name: "N".to_string() })
        );
    }
}
