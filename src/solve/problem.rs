//! Cryptarithm problem definition

use super::{Solution, SolutionValidator};
use crate::config::Settings;
use crate::csp::{solve_with_stats, Model, ModelStatistics, Outcome};
use crate::puzzle::{load_puzzle_from_file, Puzzle};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// A puzzle together with its constraint model
pub struct CryptarithmProblem {
    settings: Settings,
    puzzle: Puzzle,
    model: Model,
}

impl CryptarithmProblem {
    /// Create a new problem from settings, reading the configured puzzle file
    pub fn new(settings: Settings) -> Result<Self> {
        let layout = settings.layout()?;
        let puzzle = load_puzzle_from_file(&settings.input.puzzle_file, layout)
            .context("Failed to load puzzle file")?;

        Self::with_puzzle(settings, puzzle)
    }

    /// Create a problem with an explicit puzzle
    pub fn with_puzzle(settings: Settings, puzzle: Puzzle) -> Result<Self> {
        let model = puzzle
            .build_model()
            .with_context(|| format!("Invalid puzzle {}", puzzle))?;

        Ok(Self { settings, puzzle, model })
    }

    /// Search for a solution. `Ok(None)` means the puzzle has none.
    pub fn solve(&self) -> Result<Option<Solution>> {
        let start_time = Instant::now();
        info!("Solving {}", self.puzzle);
        debug!("{}", self.model.statistics());

        let (outcome, stats) = solve_with_stats(&self.model)
            .context("Search aborted")?;
        let solve_time = start_time.elapsed();

        if self.settings.solver.log_statistics {
            info!("{}", stats);
        }

        let assignment = match outcome {
            Outcome::Solved(assignment) => assignment,
            Outcome::NoSolution => {
                info!("No solution after {} nodes ({:.3}s)", stats.nodes, solve_time.as_secs_f64());
                return Ok(None);
            }
        };

        let solution = Solution::from_assignment(
            &self.puzzle,
            &self.model,
            &assignment,
            stats,
            solve_time,
        )?;

        let validation = SolutionValidator::validate(&self.puzzle, &solution.letters);
        if !validation.is_valid {
            warn!("Search produced an invalid solution:\n{}", validation);
            anyhow::bail!("Solution for {} failed validation", self.puzzle);
        }

        info!("Solved {} in {:.3}s", self.puzzle, solve_time.as_secs_f64());
        Ok(Some(solution))
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn statistics(&self) -> ModelStatistics {
        self.model.statistics()
    }
}
