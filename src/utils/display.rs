//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::puzzle::{output_file_name, save_digits_to_file};
use crate::solve::Solution;
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a solution for console output
    pub fn format_solution(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== {} ===\n", solution.puzzle));
        output.push_str(&Self::format_side_by_side(solution.puzzle.words(), &solution.digits));
        output.push('\n');
        output.push_str(&format!("Letters: {}\n", Self::format_mapping(solution)));
        output.push_str(&format!(
            "Carries: {}\n",
            solution.carries.iter().rev().join(" ")
        ));
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));

        output
    }

    /// Render an addition with the letters and the digits next to each other
    pub fn format_side_by_side(words: [&str; 3], digits: &[String; 3]) -> String {
        let letters = Self::format_addition(words);
        let [addend1, addend2, sum] = digits;
        let numbers = Self::format_addition([addend1.as_str(), addend2.as_str(), sum.as_str()]);

        letters
            .lines()
            .zip(numbers.lines())
            .map(|(l, n)| format!("{}    {}\n", l, n))
            .collect()
    }

    /// Right-aligned column addition:
    ///
    /// ```text
    ///    SEND
    /// +  MORE
    ///  ------
    ///   MONEY
    /// ```
    pub fn format_addition(words: [&str; 3]) -> String {
        let width = words.iter().map(|w| w.chars().count()).max().unwrap_or(0) + 2;
        let [addend1, addend2, sum] = words;

        let mut output = String::new();
        output.push_str(&format!("{:>width$}\n", addend1, width = width));
        output.push_str(&format!("+{:>width$}\n", addend2, width = width - 1));
        output.push_str(&format!(" {}\n", "-".repeat(width - 1)));
        output.push_str(&format!("{:>width$}\n", sum, width = width));
        output
    }

    /// `D=7 E=5 ...` in letter order
    pub fn format_mapping(solution: &Solution) -> String {
        solution
            .letters
            .iter()
            .map(|(letter, digit)| format!("{}={}", letter, digit))
            .join(" ")
    }

    /// Save a solution into `output_dir`.
    ///
    /// Text output writes the digits to `output_<puzzle file name>`; JSON writes
    /// the whole solution to `output_<puzzle file stem>.json`. Returns the path written.
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        puzzle_file: &Path,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(output_file_name(puzzle_file));
                save_digits_to_file(&solution.digits, &path)?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir
                    .join(output_file_name(puzzle_file))
                    .with_extension("json");
                solution.save_to_file(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
        };

        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Puzzle;
    use crate::solve::CryptarithmProblem;
    use crate::config::Settings;
    use crate::puzzle::Layout;
    use tempfile::tempdir;

    fn send_more_money() -> Solution {
        let puzzle = Puzzle::new(Layout::STANDARD, "SEND", "MORE", "MONEY");
        CryptarithmProblem::with_puzzle(Settings::default(), puzzle)
            .unwrap()
            .solve()
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_format_addition() {
        let text = SolutionFormatter::format_addition(["SEND", "MORE", "MONEY"]);
        assert_eq!(text, "   SEND\n+  MORE\n ------\n  MONEY\n");
    }

    #[test]
    fn test_format_solution() {
        let text = SolutionFormatter::format_solution(&send_more_money());
        assert!(text.contains("SEND + MORE = MONEY"));
        assert!(text.contains("10652"));
        assert!(text.contains("D=7 E=5 M=1 N=6 O=0 R=8 S=9 Y=2"));
        assert!(text.contains("Carries: 1 0 1 1"));
    }

    #[test]
    fn test_save_solution_formats() {
        let temp_dir = tempdir().unwrap();
        let solution = send_more_money();
        let puzzle_file = Path::new("input/send.txt");

        let text_path = SolutionFormatter::save_solution(
            &solution, puzzle_file, temp_dir.path(), OutputFormat::Text,
        ).unwrap();
        assert_eq!(text_path, temp_dir.path().join("output_send.txt"));
        assert_eq!(std::fs::read_to_string(&text_path).unwrap(), "9567\n1085\n10652");

        let json_path = SolutionFormatter::save_solution(
            &solution, puzzle_file, temp_dir.path(), OutputFormat::Json,
        ).unwrap();
        assert_eq!(json_path, temp_dir.path().join("output_send.json"));
        let loaded = Solution::load_from_file(&json_path).unwrap();
        assert_eq!(loaded.digits, solution.digits);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
