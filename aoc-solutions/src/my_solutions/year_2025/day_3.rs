use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::line_parser::LineParser;
use crate::utils::{invalid_format, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["greedy"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<u8>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        LineParser::new()
            .parse_with(input, |line| {
                line.trim()
                    .chars()
                    .map(|c| {
                        c.to_digit(10)
                            .map(|d| d as u8)
                            .with_context(|| format!("bank {line:?} has non-digit {c:?}"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .map_err(invalid_format)
    }
}

/// Largest `size`-digit number formed by picking digits of `bank` in order.
///
/// Each digit is the leftmost maximum among the positions that still leave
/// room for the remaining digits.
fn joltage(bank: &[u8], size: usize) -> anyhow::Result<u64> {
    if bank.len() < size {
        return Err(anyhow!(
            "bank of {} batteries cannot supply {size} digits",
            bank.len()
        ));
    }

    let mut rest = bank;
    let mut value = 0;
    for remaining in (1..=size).rev() {
        let window = &rest[..rest.len() + 1 - remaining];
        let (position, digit) = window
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, digit)| digit)
            .context("empty battery window")?;
        value = value * 10 + u64::from(*digit);
        rest = &rest[position + 1..];
    }
    Ok(value)
}

fn total_joltage(banks: &[Vec<u8>], size: usize) -> Result<String, SolveError> {
    banks
        .iter()
        .map(|bank| joltage(bank, size))
        .sum::<anyhow::Result<u64>>()
        .map(|total| total.to_string())
        .map_err(solve_failed)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 2)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
987654321111111
811111111111119
234234234234278
818181911112111
";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = <Solver as AocParser>::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(solve(EXAMPLE, 1), "357");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(solve(EXAMPLE, 2), "3121910778619");
    }

    #[test]
    fn test_leftmost_maximum_is_chosen() {
        assert_eq!(joltage(&[9, 1, 9], 2).unwrap(), 99);
        assert_eq!(joltage(&[8, 1, 8, 9], 2).unwrap(), 89);
    }

    #[test]
    fn test_short_bank_fails() {
        let mut shared = <Solver as AocParser>::parse("12345").unwrap();
        assert!(matches!(
            <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
