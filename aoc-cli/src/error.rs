//! Error types for the CLI

use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input is not cached and no session cookie is available to download it
    #[error(
        "Configuration error: {year} day {day:02} is not cached and {var} is not set; \
         export your adventofcode.com session cookie as {var}"
    )]
    MissingSession {
        year: u16,
        day: u8,
        var: &'static str,
    },

    /// Cache error
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    /// Solver error outside a specific puzzle (lookup, creation)
    #[error("Solver error: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// A puzzle failed to parse or solve
    #[error("{year} day {day:02}: {source}")]
    Puzzle {
        year: u16,
        day: u8,
        #[source]
        source: aoc_solver::SolverError,
    },

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),
}

/// Cache-specific errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache directory creation failed
    #[error("Cache directory creation failed: {0}")]
    DirCreation(String),
}
