//! Main CLI application for the cryptarithm solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cryptarithm_solver::{
    config::{CliOverrides, OutputFormat, Settings},
    logging::init_logger,
    puzzle::{create_example_puzzles, load_puzzle_from_file, load_words_from_file},
    solve::{CryptarithmProblem, SolutionValidator},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cryptarithm_solver")]
#[command(about = "Cryptarithmetic addition puzzle solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle file
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Letters per addend (overrides config)
        #[arg(short, long)]
        width: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a digit solution against a puzzle
    Validate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// File with the solved digits, one number per line
        #[arg(short, long)]
        digits: PathBuf,
    },

    /// Show the constraint model of a puzzle without solving it
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { config, puzzle, width, output, format, verbose } => {
            init_logger(verbose);
            solve_command(config, puzzle, width, output, format, verbose)
        }
        Commands::Setup { directory, force } => {
            init_logger(false);
            setup_command(directory, force)
        }
        Commands::Validate { config, puzzle, digits } => {
            init_logger(false);
            validate_command(config, puzzle, digits)
        }
        Commands::Analyze { config, puzzle } => {
            init_logger(false);
            analyze_command(config, puzzle)
        }
    }
}

/// Load settings from `config_path`, falling back to defaults when it is missing
fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::warn!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    addend_width: Option<usize>,
    output_dir: Option<PathBuf>,
    format: Option<OutputFormat>,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;

    let cli_overrides = CliOverrides {
        addend_width,
        puzzle_file,
        output_dir,
        format,
    };
    settings.merge_with_cli(&cli_overrides);
    if verbose {
        settings.solver.log_statistics = true;
    }

    settings.validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let problem = CryptarithmProblem::new(settings.clone())
        .context("Failed to create cryptarithm problem")?;

    if verbose {
        println!("{}", problem.statistics());
    }

    let Some(solution) = problem.solve().context("Failed to solve puzzle")? else {
        let message = format!("No solution exists for {}", problem.puzzle());
        println!("{}", ColorOutput::warning(&message));
        return Ok(());
    };

    println!("{}", ColorOutput::success(&format!(
        "Solved in {:.3}s",
        start_time.elapsed().as_secs_f64()
    )));
    println!("\n{}", SolutionFormatter::format_solution(&solution));

    let path = SolutionFormatter::save_solution(
        &solution,
        &settings.input.puzzle_file,
        &settings.output.output_directory,
        settings.output.format,
    ).context("Failed to save solution")?;

    println!("{}", ColorOutput::success(&format!("Solution saved to {}", path.display())));

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&input_dir)
        .context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    let mut json_config = Settings::default();
    json_config.input.puzzle_file = PathBuf::from("input/puzzles/base_ball_games.txt");
    json_config.output.format = OutputFormat::Json;
    json_config.to_file(&config_dir.join("json.yaml"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Add your puzzles to {}", input_dir.display());
    println!("2. Run: cryptarithm_solver solve --config config/default.yaml");

    Ok(())
}

fn validate_command(
    config_path: PathBuf,
    puzzle_path: PathBuf,
    digits_path: PathBuf,
) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let layout = settings.layout()?;

    let puzzle = load_puzzle_from_file(&puzzle_path, layout)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;
    let digits = load_words_from_file(&digits_path)
        .with_context(|| format!("Failed to load digits from {}", digits_path.display()))?;

    let result = SolutionValidator::validate_digits(&puzzle, &digits);

    println!("{}", SolutionFormatter::format_side_by_side(puzzle.words(), &digits));
    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
    }

    Ok(())
}

fn analyze_command(config_path: PathBuf, puzzle_path: PathBuf) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let layout = settings.layout()?;

    let puzzle = load_puzzle_from_file(&puzzle_path, layout)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;

    println!("{}", SolutionFormatter::format_addition(puzzle.words()));

    let problem = CryptarithmProblem::with_puzzle(settings, puzzle)
        .context("Failed to build model")?;

    println!("Variables:");
    for variable in problem.model().variables() {
        println!("  {:>3}: {:?}", variable.name(), variable.domain);
    }
    println!("\n{}", problem.statistics());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "cryptarithm_solver",
            "solve",
            "--config", "test.yaml",
            "--width", "3",
            "--format", "json",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/puzzles/send_more_money.txt").exists());
    }

    #[test]
    fn test_solve_command_writes_output() {
        let temp_dir = tempdir().unwrap();
        let puzzle = temp_dir.path().join("send.txt");
        std::fs::write(&puzzle, "SEND\nMORE\nMONEY\n").unwrap();
        let output = temp_dir.path().join("out");

        solve_command(
            temp_dir.path().join("missing.yaml"),
            Some(puzzle),
            None,
            Some(output.clone()),
            Some(OutputFormat::Text),
            false,
        ).unwrap();

        let written = std::fs::read_to_string(output.join("output_send.txt")).unwrap();
        assert_eq!(written, "9567\n1085\n10652");
    }

    #[test]
    fn test_validate_command_reports_puzzle_wider_than_layout() {
        let temp_dir = tempdir().unwrap();
        let puzzle = temp_dir.path().join("two.txt");
        std::fs::write(&puzzle, "TWO\nTWO\nFOUR\n").unwrap();
        let digits = temp_dir.path().join("output_two.txt");
        std::fs::write(&digits, "734\n734\n1468").unwrap();

        // Default layout is width 4, so the puzzle is invalid rather than a crash
        let result = validate_command(temp_dir.path().join("missing.yaml"), puzzle, digits);
        assert!(result.is_ok());
    }
}
