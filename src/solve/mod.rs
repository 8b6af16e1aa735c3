//! Problem definition, solutions and their validation

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::CryptarithmProblem;
pub use solution::Solution;
pub use validator::{SolutionValidator, ValidationResult, Violation};
