use std::ops::RangeInclusive;

use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::{invalid_format, solve_failed};
use crate::utils::line_parser::LineParser;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["brute-force", "digits"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<RangeInclusive<u64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        LineParser::new()
            .separator(",")
            .parse_with(input, parse_range)
            .map_err(invalid_format)
    }
}

fn parse_range(record: &str) -> anyhow::Result<RangeInclusive<u64>> {
    let record = record.trim();
    let (start, end) = record
        .split_once('-')
        .with_context(|| format!("range {record:?} is missing '-'"))?;
    let start = start
        .parse()
        .with_context(|| format!("invalid range start in {record:?}"))?;
    let end = end
        .parse()
        .with_context(|| format!("invalid range end in {record:?}"))?;
    Ok(start..=end)
}

fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

/// True when the decimal form of `n` is one `block`-digit chunk repeated at
/// least twice.
///
/// A `len`-digit number made of `len / block` copies of a chunk equals the
/// chunk times `1 + 10^block + 10^(2*block) + ...`, so a divisibility check
/// replaces string comparisons.
fn is_repeated(n: u64, block: u32) -> bool {
    let len = digit_count(n);
    if block == 0 || len % block != 0 || len / block < 2 {
        return false;
    }

    let multiplier: u64 = (0..len / block).map(|i| 10u64.pow(i * block)).sum();
    n % multiplier == 0
}

fn is_doubled(n: u64) -> bool {
    let len = digit_count(n);
    len % 2 == 0 && is_repeated(n, len / 2)
}

fn has_repeating_block(n: u64) -> bool {
    (1..=digit_count(n) / 2).any(|block| is_repeated(n, block))
}

fn sum_matching(
    ranges: &[RangeInclusive<u64>],
    predicate: impl Fn(u64) -> bool,
) -> anyhow::Result<u64> {
    ranges
        .iter()
        .flat_map(|range| range.clone())
        .filter(|&n| predicate(n))
        .try_fold(0u64, |total, n| total.checked_add(n))
        .context("sum of invalid ids overflows")
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_matching(shared, is_doubled)
            .map(|total| total.to_string())
            .map_err(solve_failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_matching(shared, has_repeating_block)
            .map(|total| total.to_string())
            .map_err(solve_failed)
    }
}
