//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains the puzzle solutions organized by year, plus the
//! small utilities they share. Each solution uses the `AutoRegisterSolver`
//! derive macro for automatic plugin registration with the solver framework.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
