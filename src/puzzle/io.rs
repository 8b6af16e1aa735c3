//! File I/O for puzzles and solved digits

use super::{Layout, Puzzle};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a puzzle from a text file
/// Format: three lines holding addend-1, addend-2 and the sum
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P, layout: Layout) -> Result<Puzzle> {
    let words = load_words_from_file(&path)?;
    Ok(Puzzle::from_words(layout, words))
}

/// Load the three words of a puzzle (or of a digit solution) from a file
pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<[String; 3]> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_words(&content)
        .with_context(|| format!("Failed to parse puzzle file: {}", path.as_ref().display()))
}

/// Parse three words from text, one per line. Blank lines are skipped.
pub fn parse_words(content: &str) -> Result<[String; 3]> {
    let lines: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    match <[String; 3]>::try_from(lines) {
        Ok(words) => Ok(words),
        Err(lines) => anyhow::bail!(
            "Expected 3 non-empty lines (addend, addend, sum), found {}",
            lines.len()
        ),
    }
}

/// Name of the output file for a given input file: `output_<file name>`
pub fn output_file_name<P: AsRef<Path>>(input: P) -> String {
    let name = input
        .as_ref()
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("puzzle.txt");
    format!("output_{}", name)
}

/// Write solved digits, one number per line
pub fn save_digits_to_file<P: AsRef<Path>>(digits: &[String; 3], path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, digits.join("\n"))
        .with_context(|| format!("Failed to write digits to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example puzzle files for the standard 4 + 4 = 5 layout
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("send_more_money.txt", "SEND\nMORE\nMONEY\n"),
        ("base_ball_games.txt", "BASE\nBALL\nGAMES\n"),
        // 2222 * A never equals 11111
        ("no_solution.txt", "AAAA\nAAAA\nBBBBB\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
