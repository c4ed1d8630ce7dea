//! Helpers shared by the puzzle solutions

pub mod dp_cache;
pub mod line_parser;

use aoc_solver::{ParseError, SolveError};

/// Convert a solver-side parse failure into the framework's error, keeping the context chain
pub fn invalid_format(err: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("{err:#}"))
}

/// Convert a solver-side failure into the framework's error
pub fn solve_failed(err: anyhow::Error) -> SolveError {
    SolveError::SolveFailed(err.into())
}
