//! Cryptarithm Solver
//!
//! Solves two-addend letter arithmetic puzzles such as `SEND + MORE = MONEY`
//! with a backtracking search over digit assignments.

pub mod config;
pub mod csp;
pub mod errors;
pub mod logging;
pub mod puzzle;
pub mod solve;
pub mod utils;

pub use config::Settings;
pub use csp::{build_model, solve, Model, Outcome};
pub use errors::{ModelError, SearchError};
pub use puzzle::{Layout, Puzzle};
pub use solve::{CryptarithmProblem, Solution};

use anyhow::Result;

/// Main entry point: solve the puzzle named by `settings`
pub fn solve_puzzle(settings: Settings) -> Result<Option<Solution>> {
    let problem = CryptarithmProblem::new(settings)?;
    problem.solve()
}
