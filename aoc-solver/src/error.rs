//! Errors raised while registering, parsing and solving puzzles

use thiserror::Error;

/// Puzzle text that a solver cannot make sense of
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Something the puzzle needs (a start marker, a section) is absent
    #[error("Missing data: {0}")]
    MissingData(String),
}

#[derive(Debug, Error)]
pub enum SolveError {
    /// The part exists but has no solution yet; callers report it and move on
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure to produce or run a solver from the registry
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("No solver registered for {0} day {1}")]
    NotFound(u16, u8),
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    #[error("A solver is already registered for {0} day {1}")]
    DuplicateSolver(u16, u8),
    #[error("Cannot register solver for {0} day {1}: out of range")]
    InvalidYearDay(u16, u8),
}
