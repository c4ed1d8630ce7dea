use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

type Point = (i32, i32);

const NEIGHBOURS: [Point; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A roll is accessible when fewer than this many neighbours hold rolls
const CROWDED: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["grid", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Point>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rolls = HashSet::new();
        for (row, line) in input.trim().lines().enumerate() {
            for (col, cell) in line.trim_end().chars().enumerate() {
                match cell {
                    '@' => {
                        let point = i32::try_from(row)
                            .ok()
                            .zip(i32::try_from(col).ok())
                            .ok_or_else(|| {
                                ParseError::InvalidFormat("grid is too large".to_string())
                            })?;
                        rolls.insert(point);
                    }
                    '.' => {}
                    other => {
                        return Err(ParseError::InvalidFormat(format!(
                            "unexpected {other:?} at row {row}, column {col}"
                        )));
                    }
                }
            }
        }
        Ok(rolls)
    }
}

fn accessible(rolls: &HashSet<Point>) -> Vec<Point> {
    rolls
        .iter()
        .filter(|&&(row, col)| {
            NEIGHBOURS
                .iter()
                .filter(|(dr, dc)| rolls.contains(&(row + dr, col + dc)))
                .count()
                < CROWDED
        })
        .copied()
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(accessible(shared).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut rolls = shared.clone();
        let start = rolls.len();

        loop {
            let removable = accessible(&rolls);
            if removable.is_empty() {
                break;
            }
            for point in removable {
                rolls.remove(&point);
            }
        }

        Ok((start - rolls.len()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.
";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = <Solver as AocParser>::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(solve(EXAMPLE, 1), "13");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(solve(EXAMPLE, 2), "43");
    }

    #[test]
    fn test_part2_leaves_shared_grid_intact() {
        let mut shared = <Solver as AocParser>::parse(EXAMPLE).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2).unwrap();
        assert_eq!(
            <Solver as aoc_solver::Solver>::solve_part(&mut shared, 1).unwrap(),
            "13"
        );
    }

    #[test]
    fn test_rejects_unknown_cells() {
        assert!(<Solver as AocParser>::parse("@.\n.x").is_err());
    }
}
