use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::invalid_format;
use crate::utils::line_parser::LineParser;

const DIAL_SIZE: i64 = 100;
const START_POSITION: i64 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i64>,
    common_result: Option<CommonResult>,
}

#[derive(Debug)]
pub struct CommonResult {
    zero_landings: u64,
    revolutions: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rotations = LineParser::new()
            .parse_with(input, parse_rotation)
            .map_err(invalid_format)?;

        Ok(SharedData {
            rotations,
            common_result: None,
        })
    }
}

/// `L68` turns left (negative), `R48` turns right
fn parse_rotation(line: &str) -> anyhow::Result<i64> {
    let (direction, amount) = line
        .split_at_checked(1)
        .with_context(|| format!("rotation {line:?} has no direction"))?;
    let amount = i64::from(
        amount
            .parse::<u32>()
            .with_context(|| format!("rotation {line:?} has an invalid amount"))?,
    );

    match direction {
        "L" => Ok(-amount),
        "R" => Ok(amount),
        _ => bail!("rotation {line:?} must start with 'L' or 'R'"),
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).zero_landings.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).revolutions.to_string())
    }
}

/// Turns the dial once through every rotation.
///
/// Each rotation is applied to the wrapped position; the unwrapped result
/// counts as a zero landing when it is a multiple of the dial size, and
/// contributes the absolute number of whole revolutions (floored) it spans.
fn solve_once_for_both(shared: &mut SharedData) -> &CommonResult {
    shared.common_result.get_or_insert_with(|| {
        let mut position = START_POSITION;
        let mut zero_landings = 0;
        let mut revolutions = 0;

        for rotation in &shared.rotations {
            let unwrapped = position + rotation;
            if unwrapped.rem_euclid(DIAL_SIZE) == 0 {
                zero_landings += 1;
            }
            revolutions += unwrapped.div_euclid(DIAL_SIZE).unsigned_abs();
            position = unwrapped.rem_euclid(DIAL_SIZE);
        }

        CommonResult {
            zero_landings,
            revolutions,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
L68
L30
R48
L5
R60
L55
L1
L99
R14
L82
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
        assert_eq!(solve(EXAMPLE, 2), "6");
    }

    #[test]
    fn test_rejects_unknown_direction() {
        assert!(<Solver as AocParser>::parse("L5\nX3").is_err());
        assert!(<Solver as AocParser>::parse("R-3").is_err());
    }
}
