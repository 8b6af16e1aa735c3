//! Puzzle statement, column layout and file I/O

pub mod layout;
pub mod statement;
pub mod io;

pub use layout::{Column, Layout, MAX_ADDEND_WIDTH};
pub use statement::Puzzle;
pub use io::{
    create_example_puzzles, load_puzzle_from_file, load_words_from_file, output_file_name,
    parse_words, save_digits_to_file,
};
