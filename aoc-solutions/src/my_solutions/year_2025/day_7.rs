use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const START: u8 = b'S';
const SPLITTER: u8 = b'^';
const EMPTY: u8 = b'.';

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["grid", "dp"])]
pub struct Solver;

#[derive(Debug)]
pub struct Manifold {
    rows: Vec<Vec<u8>>,
    width: usize,
}

#[derive(Debug, PartialEq, Eq)]
struct BeamStats {
    splitters_hit: u64,
    timelines: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Manifold;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows: Vec<Vec<u8>> = input
            .trim()
            .lines()
            .map(|line| line.trim_end().as_bytes().to_vec())
            .collect();

        for (r, row) in rows.iter().enumerate() {
            if let Some(c) = row
                .iter()
                .position(|&cell| !matches!(cell, START | SPLITTER | EMPTY))
            {
                return Err(ParseError::InvalidFormat(format!(
                    "unexpected {:?} at row {r}, column {c}",
                    char::from(row[c])
                )));
            }
        }
        if !rows.iter().flatten().any(|&cell| cell == START) {
            return Err(ParseError::MissingData("no beam start 'S'".to_string()));
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Ok(Manifold { rows, width })
    }
}

impl Manifold {
    /// Sweeps the beams down row by row.
    ///
    /// `beams[c]` holds the number of timelines whose beam is in column `c`.
    /// A splitter sends every incoming timeline both left and right into
    /// the next row; beams leaving the grid sideways are lost.
    fn sweep(&self) -> BeamStats {
        let mut beams = vec![0u64; self.width];
        let mut splitters_hit = 0;

        for row in &self.rows {
            for (c, &cell) in row.iter().enumerate() {
                if cell == START {
                    beams[c] += 1;
                }
            }

            let mut next = vec![0u64; self.width];
            for (c, &count) in beams.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                if row.get(c) == Some(&SPLITTER) {
                    splitters_hit += 1;
                    if let Some(left) = c.checked_sub(1) {
                        next[left] += count;
                    }
                    if let Some(right) = next.get_mut(c + 1) {
                        *right += count;
                    }
                } else {
                    next[c] += count;
                }
            }
            beams = next;
        }

        BeamStats {
            splitters_hit,
            timelines: beams.iter().sum(),
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.sweep().splitters_hit.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.sweep().timelines.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
.......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............
";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = <Solver as AocParser>::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(solve(EXAMPLE, 1), "21");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(solve(EXAMPLE, 2), "40");
    }

    #[test]
    fn test_beams_leaving_the_grid_are_dropped() {
        let manifold = <Solver as AocParser>::parse("S.\n^.\n..").unwrap();
        assert_eq!(
            manifold.sweep(),
            BeamStats {
                splitters_hit: 1,
                timelines: 1
            }
        );
    }

    #[test]
    fn test_missing_start_is_rejected() {
        assert!(matches!(
            <Solver as AocParser>::parse("...\n.^."),
            Err(ParseError::MissingData(_))
        ));
        assert!(matches!(
            <Solver as AocParser>::parse("S..\n.#."),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
