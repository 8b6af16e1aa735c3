//! Configuration management for the cryptarithm solver

pub mod settings;

pub use settings::{
    Settings, PuzzleConfig, SolverConfig, InputConfig, OutputConfig, OutputFormat, CliOverrides
};
