//! Configuration settings for the cryptarithm solver

use crate::puzzle::{Layout, MAX_ADDEND_WIDTH};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub puzzle: PuzzleConfig,
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Letters per addend; the sum has one more
    pub addend_width: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Log search counters after each solve
    pub log_statistics: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Three lines of digits, like the puzzle file
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            puzzle: PuzzleConfig {
                addend_width: Layout::STANDARD.addend_width(),
            },
            solver: SolverConfig {
                log_statistics: false,
            },
            input: InputConfig {
                puzzle_file: PathBuf::from("input/puzzles/send_more_money.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.layout()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Column layout described by these settings
    pub fn layout(&self) -> Result<Layout> {
        Layout::new(self.puzzle.addend_width).with_context(|| {
            format!("puzzle.addend_width must be between 1 and {}", MAX_ADDEND_WIDTH)
        })
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.layout()?;

        if !self.input.puzzle_file.exists() {
            anyhow::bail!("Puzzle file does not exist: {}", self.input.puzzle_file.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(addend_width) = cli_overrides.addend_width {
            self.puzzle.addend_width = addend_width;
        }
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub addend_width: Option<usize>,
    pub puzzle_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}
