//! Blocking downloads of personal Advent of Code puzzle inputs.
//!
//! Requests go over rustls and carry the account's `session` cookie, marked
//! sensitive and wiped from memory once the header is built.
//!
//! ```no_run
//! use aoc_http_client::AocClient;
//!
//! # fn main() -> Result<(), aoc_http_client::AocError> {
//! let client = AocClient::new()?;
//! let input = client.get_input(2025, 1, "53616c7465645f5f...")?;
//! println!("{} bytes", input.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{AocClient, AocClientBuilder, DEFAULT_BASE_URL};
pub use error::AocError;
