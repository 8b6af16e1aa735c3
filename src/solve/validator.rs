//! Independent checking of letter-to-digit mappings

use crate::errors::ModelError;
use crate::puzzle::{Layout, Puzzle};
use std::collections::BTreeMap;
use std::fmt;

/// Validates proposed solutions against a puzzle
pub struct SolutionValidator;

/// Result of solution validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    /// Addend-1, addend-2 and sum, when every letter has a digit
    pub values: Option<[u64; 3]>,
    /// Carry out of each column, least significant first
    pub carries: Vec<u8>,
}

/// A single reason a mapping does not solve the puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    UnmappedLetter(char),
    DigitOutOfRange { letter: char, digit: u8 },
    DuplicateDigit { digit: u8, first: char, second: char },
    LeadingZero(char),
    SumMismatch { addend1: u64, addend2: u64, sum: u64 },
    /// A digit file gives one letter two different digits
    ConflictingDigits { letter: char, first: u8, second: u8 },
    /// A digit file has a non-digit character or the wrong shape
    MalformedDigits(String),
    /// The puzzle itself does not fit its layout
    MalformedPuzzle(ModelError),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnmappedLetter(ch) => write!(f, "letter {} has no digit", ch),
            Violation::DigitOutOfRange { letter, digit } => {
                write!(f, "letter {} maps to {}, not a decimal digit", letter, digit)
            }
            Violation::DuplicateDigit { digit, first, second } => {
                write!(f, "letters {} and {} both map to {}", first, second, digit)
            }
            Violation::LeadingZero(ch) => write!(f, "leading letter {} maps to 0", ch),
            Violation::SumMismatch { addend1, addend2, sum } => {
                write!(f, "{} + {} = {}, not {}", addend1, addend2, addend1 + addend2, sum)
            }
            Violation::ConflictingDigits { letter, first, second } => {
                write!(f, "letter {} is given both {} and {}", letter, first, second)
            }
            Violation::MalformedDigits(reason) => write!(f, "malformed digits: {}", reason),
            Violation::MalformedPuzzle(err) => write!(f, "malformed puzzle: {}", err),
        }
    }
}

impl SolutionValidator {
    /// Check `mapping` against `puzzle`
    pub fn validate(puzzle: &Puzzle, mapping: &BTreeMap<char, u8>) -> ValidationResult {
        if let Err(err) = puzzle.build_model() {
            return Self::rejected(Violation::MalformedPuzzle(err));
        }

        let layout = puzzle.layout;
        let cells: Vec<char> = puzzle.concatenated().chars().collect();
        let mut violations = Vec::new();

        let mut owner: [Option<char>; 10] = [None; 10];
        let mut seen = Vec::new();
        for &ch in &cells {
            if seen.contains(&ch) {
                continue;
            }
            seen.push(ch);

            match mapping.get(&ch) {
                None => violations.push(Violation::UnmappedLetter(ch)),
                Some(&digit) if digit > 9 => {
                    violations.push(Violation::DigitOutOfRange { letter: ch, digit })
                }
                Some(&digit) => match owner[digit as usize] {
                    Some(first) => violations.push(Violation::DuplicateDigit {
                        digit,
                        first,
                        second: ch,
                    }),
                    None => owner[digit as usize] = Some(ch),
                },
            }
        }

        for position in layout.leading_positions() {
            let ch = cells[position];
            if mapping.get(&ch) == Some(&0) && !violations.contains(&Violation::LeadingZero(ch)) {
                violations.push(Violation::LeadingZero(ch));
            }
        }

        let digits: Option<Vec<u8>> = cells
            .iter()
            .map(|ch| mapping.get(ch).copied().filter(|&d| d <= 9))
            .collect();

        let (values, carries) = match digits {
            Some(digits) => {
                let values = word_values(layout, &digits);
                let [addend1, addend2, sum] = values;
                if addend1 + addend2 != sum {
                    violations.push(Violation::SumMismatch { addend1, addend2, sum });
                }
                (Some(values), column_carries(layout, &digits))
            }
            None => (None, Vec::new()),
        };

        ValidationResult {
            is_valid: violations.is_empty(),
            violations,
            values,
            carries,
        }
    }

    /// Check a digit rendering of the puzzle (three lines of digits laid out
    /// like the puzzle words)
    pub fn validate_digits(puzzle: &Puzzle, digit_words: &[String; 3]) -> ValidationResult {
        if let Err(err) = puzzle.build_model() {
            return Self::rejected(Violation::MalformedPuzzle(err));
        }

        let cells: Vec<char> = puzzle.concatenated().chars().collect();
        let digit_cells: Vec<char> = digit_words.concat().chars().collect();

        if digit_cells.len() != cells.len() {
            return Self::rejected(Violation::MalformedDigits(format!(
                "expected {} digits, found {}",
                cells.len(),
                digit_cells.len()
            )));
        }
        for (word, (digits, letters)) in digit_words.iter().zip(puzzle.words()).enumerate() {
            if digits.chars().count() != letters.chars().count() {
                return Self::rejected(Violation::MalformedDigits(format!(
                    "line {} has {} digits for {} letters",
                    word + 1,
                    digits.chars().count(),
                    letters.chars().count()
                )));
            }
        }

        let mut mapping = BTreeMap::new();
        for (&letter, &digit_char) in cells.iter().zip(&digit_cells) {
            let Some(digit) = digit_char.to_digit(10) else {
                return Self::rejected(Violation::MalformedDigits(format!(
                    "'{}' is not a digit",
                    digit_char
                )));
            };
            let digit = digit as u8;

            if let Some(&first) = mapping.get(&letter) {
                if first != digit {
                    return Self::rejected(Violation::ConflictingDigits {
                        letter,
                        first,
                        second: digit,
                    });
                }
            }
            mapping.insert(letter, digit);
        }

        Self::validate(puzzle, &mapping)
    }

    fn rejected(violation: Violation) -> ValidationResult {
        ValidationResult {
            is_valid: false,
            violations: vec![violation],
            values: None,
            carries: Vec::new(),
        }
    }
}

/// Numeric values of the three words given one digit per layout position
pub fn word_values(layout: Layout, digits: &[u8]) -> [u64; 3] {
    let value = |range: std::ops::Range<usize>| {
        digits[range].iter().fold(0u64, |acc, &d| acc * 10 + u64::from(d))
    };
    [
        value(layout.addend1_range()),
        value(layout.addend2_range()),
        value(layout.sum_range()),
    ]
}

/// Arithmetic carry out of each column, least significant first
pub fn column_carries(layout: Layout, digits: &[u8]) -> Vec<u8> {
    let mut carries = Vec::with_capacity(layout.carry_count());
    for column in layout.columns() {
        let carry_in = column.carry_in.map_or(0, |c| carries[c]);
        let total = digits[column.addend1] + digits[column.addend2] + carry_in;
        carries.push(total / 10);
    }
    carries
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        if let Some([addend1, addend2, sum]) = self.values {
            writeln!(f, "  Equation: {} + {} = {}", addend1, addend2, sum)?;
        }
        if !self.carries.is_empty() {
            let carries: Vec<String> = self.carries.iter().map(|c| c.to_string()).collect();
            writeln!(f, "  Carries: {}", carries.join(" "))?;
        }
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}
