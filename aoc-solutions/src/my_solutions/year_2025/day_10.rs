use std::collections::HashSet;

use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::line_parser::LineParser;
use crate::utils::{invalid_format, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["bfs", "linear-algebra"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    lights: Vec<bool>,
    buttons: Vec<Vec<usize>>,
    joltage: Vec<i64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        LineParser::new()
            .parse_with(input, parse_machine)
            .map_err(invalid_format)
    }
}

fn strip_delimiters<'a>(token: &'a str, open: char, close: char) -> anyhow::Result<&'a str> {
    token
        .strip_prefix(open)
        .and_then(|rest| rest.strip_suffix(close))
        .with_context(|| format!("expected {open}...{close}, got {token:?}"))
}

fn parse_list<T: std::str::FromStr>(list: &str) -> anyhow::Result<Vec<T>> {
    list.split(',')
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| anyhow!("invalid number {value:?}"))
        })
        .collect()
}

/// `[.##.] (3) (1,3) (2) {3,5,4,7}`
fn parse_machine(line: &str) -> anyhow::Result<Machine> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [lights, buttons @ .., joltage] = tokens.as_slice() else {
        bail!("machine {line:?} needs lights and joltage");
    };

    let lights = strip_delimiters(lights, '[', ']')?
        .chars()
        .map(|c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            other => Err(anyhow!("unexpected light {other:?}")),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    ensure!(
        lights.len() <= 64,
        "machine has {} lights, at most 64 are supported",
        lights.len()
    );

    let buttons = buttons
        .iter()
        .map(|button| parse_list::<usize>(strip_delimiters(button, '(', ')')?))
        .collect::<anyhow::Result<Vec<_>>>()
        .with_context(|| format!("in machine {line:?}"))?;
    if let Some(index) = buttons.iter().flatten().find(|&&i| i >= lights.len()) {
        bail!("button wired to light {index}, machine only has {}", lights.len());
    }

    let joltage = parse_list::<i64>(strip_delimiters(joltage, '{', '}')?)?;
    ensure!(
        joltage.len() == lights.len(),
        "{} joltage requirements for {} lights",
        joltage.len(),
        lights.len()
    );
    ensure!(
        joltage.iter().all(|&j| j >= 0),
        "joltage requirements must be non-negative"
    );

    Ok(Machine {
        lights,
        buttons,
        joltage,
    })
}

impl Machine {
    /// Fewest presses toggling the lights from all-off into the pattern
    fn fewest_toggles(&self) -> Option<u64> {
        let target = self
            .lights
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .fold(0u64, |mask, (i, _)| mask | 1 << i);
        let buttons: Vec<u64> = self
            .buttons
            .iter()
            .map(|wires| wires.iter().fold(0u64, |mask, &i| mask ^ 1 << i))
            .collect();

        let mut seen = HashSet::from([0u64]);
        let mut frontier = vec![0u64];
        let mut presses = 0;
        while !frontier.is_empty() {
            if frontier.contains(&target) {
                return Some(presses);
            }
            let mut next = Vec::new();
            for state in frontier {
                for button in &buttons {
                    let toggled = state ^ button;
                    if seen.insert(toggled) {
                        next.push(toggled);
                    }
                }
            }
            frontier = next;
            presses += 1;
        }
        None
    }

    /// Fewest presses raising every counter exactly to its joltage.
    ///
    /// Solves `A x = b` over non-negative integers, where `A[i][j]` counts how
    /// often button `j` bumps counter `i`: the system is reduced to echelon
    /// form, then the free presses are enumerated within their bounds and the
    /// pivot presses recovered by back substitution.
    fn fewest_joltage_presses(&self) -> Option<i64> {
        let columns = self.buttons.len();
        let matrix = self
            .joltage
            .iter()
            .enumerate()
            .map(|(counter, &target)| {
                let mut row: Vec<i64> = self
                    .buttons
                    .iter()
                    .map(|wires| wires.iter().filter(|&&i| i == counter).count() as i64)
                    .collect();
                row.push(target);
                row
            })
            .collect();

        let system = ReducedSystem::new(matrix, columns)?;
        let bounds: Vec<i64> = system
            .free
            .iter()
            .map(|&button| {
                self.buttons[button]
                    .iter()
                    .map(|&counter| self.joltage[counter])
                    .min()
                    .unwrap_or(0)
            })
            .collect();

        let mut search = FreeSearch {
            system: &system,
            bounds: &bounds,
            assignment: vec![0; bounds.len()],
            best: None,
        };
        search.run(0, 0);
        search.best
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn normalize(row: &mut [i64]) {
    let divisor = row.iter().fold(0, |g, &x| gcd(g, x));
    if divisor > 1 {
        row.iter_mut().for_each(|x| *x /= divisor);
    }
}

/// Integer reduced row echelon form of an augmented matrix
#[derive(Debug)]
struct ReducedSystem {
    /// One row per pivot; the last entry is the right-hand side
    rows: Vec<Vec<i64>>,
    pivots: Vec<usize>,
    free: Vec<usize>,
    columns: usize,
}

impl ReducedSystem {
    /// Fraction-free elimination. `None` when the system is inconsistent.
    fn new(mut matrix: Vec<Vec<i64>>, columns: usize) -> Option<Self> {
        let mut pivots = Vec::new();
        let mut rank = 0;

        for col in 0..columns {
            let Some(found) = (rank..matrix.len()).find(|&r| matrix[r][col] != 0) else {
                continue;
            };
            matrix.swap(rank, found);
            let pivot_row = matrix[rank].clone();
            let pivot = pivot_row[col];

            for (r, row) in matrix.iter_mut().enumerate() {
                let factor = row[col];
                if r == rank || factor == 0 {
                    continue;
                }
                for (x, &y) in row.iter_mut().zip(&pivot_row) {
                    *x = *x * pivot - y * factor;
                }
                normalize(row);
            }

            pivots.push(col);
            rank += 1;
        }

        if matrix[rank..].iter().any(|row| row[columns] != 0) {
            return None;
        }
        matrix.truncate(rank);

        let free = (0..columns).filter(|c| !pivots.contains(c)).collect();
        Some(Self {
            rows: matrix,
            pivots,
            free,
            columns,
        })
    }

    /// Total pivot presses for the given free presses, if all are
    /// non-negative integers
    fn pivot_presses(&self, assignment: &[i64]) -> Option<i64> {
        self.rows
            .iter()
            .zip(&self.pivots)
            .try_fold(0, |total, (row, &pivot)| {
                let numerator = row[self.columns]
                    - self
                        .free
                        .iter()
                        .zip(assignment)
                        .map(|(&col, &presses)| row[col] * presses)
                        .sum::<i64>();
                let divisor = row[pivot];
                if numerator % divisor != 0 {
                    return None;
                }
                let presses = numerator / divisor;
                (presses >= 0).then_some(total + presses)
            })
    }
}

struct FreeSearch<'s> {
    system: &'s ReducedSystem,
    bounds: &'s [i64],
    assignment: Vec<i64>,
    best: Option<i64>,
}

impl FreeSearch<'_> {
    fn run(&mut self, index: usize, presses: i64) {
        if self.best.is_some_and(|best| presses >= best) {
            return;
        }
        if index == self.assignment.len() {
            if let Some(pivot_presses) = self.system.pivot_presses(&self.assignment) {
                let total = presses + pivot_presses;
                if self.best.is_none_or(|best| total < best) {
                    self.best = Some(total);
                }
            }
            return;
        }
        for value in 0..=self.bounds[index] {
            self.assignment[index] = value;
            self.run(index + 1, presses + value);
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(i, machine)| {
                machine
                    .fewest_toggles()
                    .ok_or_else(|| anyhow!("machine {i} cannot reach its light pattern"))
            })
            .sum::<anyhow::Result<u64>>()
            .map(|total| total.to_string())
            .map_err(solve_failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(i, machine)| {
                machine.fewest_joltage_presses().ok_or_else(|| {
                    anyhow!("machine {i} has no non-negative integer press counts")
                })
            })
            .sum::<anyhow::Result<i64>>()
            .map(|total| total.to_string())
            .map_err(solve_failed)
    }
}
