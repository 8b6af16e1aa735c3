//! Constraint model and backtracking search for cryptarithm puzzles

pub mod variables;
pub mod assignment;
pub mod model;
pub mod search;

pub use variables::{DigitSet, VarId, Variable, VariableKind};
pub use assignment::Assignment;
pub use model::{build_model, Model, ModelStatistics};
pub use search::{solve, solve_with_stats, Outcome, SearchEngine, SearchStats};
