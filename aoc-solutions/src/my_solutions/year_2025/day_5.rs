use std::ops::RangeInclusive;

use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct Inventory {
    fresh: Vec<RangeInclusive<u64>>,
    ingredients: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Inventory;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_inventory(input).map_err(invalid_format)
    }
}

/// Fresh ranges, a blank line, then one ingredient id per line
fn parse_inventory(input: &str) -> anyhow::Result<Inventory> {
    let mut lines = input.trim().lines().map(str::trim_end);

    let mut fresh = Vec::new();
    for line in lines.by_ref().take_while(|line| !line.is_empty()) {
        let (start, end) = line
            .split_once('-')
            .with_context(|| format!("range {line:?} is missing '-'"))?;
        let start: u64 = start
            .parse()
            .with_context(|| format!("invalid range start in {line:?}"))?;
        let end: u64 = end
            .parse()
            .with_context(|| format!("invalid range end in {line:?}"))?;
        fresh.push(start..=end);
    }

    let ingredients = lines
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse()
                .with_context(|| format!("invalid ingredient id {line:?}"))
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(Inventory { fresh, ingredients })
}

/// Number of ids covered by at least one range; `0..=u64::MAX` alone holds 2^64
fn union_size(ranges: &[RangeInclusive<u64>]) -> u128 {
    let mut sorted: Vec<_> = ranges.iter().map(|r| (*r.start(), *r.end())).collect();
    sorted.sort_unstable();

    let mut total = 0;
    // Highest id counted so far
    let mut counted: Option<u64> = None;
    for (start, end) in sorted {
        let from = match counted {
            Some(last) if last >= end => continue,
            Some(last) => start.max(last + 1),
            None => start,
        };
        if from > end {
            continue;
        }
        total += u128::from(end - from) + 1;
        counted = Some(end);
    }
    total
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = shared
            .ingredients
            .iter()
            .filter(|&&id| shared.fresh.iter().any(|range| range.contains(&id)))
            .count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(union_size(&shared.fresh).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
3-5
10-14
16-20
12-18

1
5
8
11
17
32
";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = <Solver as AocParser>::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(solve(EXAMPLE, 1), "3");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(solve(EXAMPLE, 2), "14");
    }

    #[test]
    fn test_union_handles_nested_and_touching_ranges() {
        assert_eq!(union_size(&[1..=10, 2..=3, 11..=12]), 12);
        assert_eq!(union_size(&[5..=5, 5..=5]), 1);
        assert_eq!(union_size(&[0..=0, 7..=6]), 1);
    }

    #[test]
    fn test_union_reaching_the_largest_id() {
        assert_eq!(
            union_size(&[5..=u64::MAX, u64::MAX..=u64::MAX]),
            u128::from(u64::MAX - 4)
        );
        assert_eq!(union_size(&[u64::MAX..=u64::MAX, u64::MAX..=u64::MAX]), 1);
        assert_eq!(union_size(&[0..=u64::MAX, 3..=9]), 1 << 64);
    }
}
