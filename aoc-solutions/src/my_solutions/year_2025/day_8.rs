use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::line_parser::LineParser;
use crate::utils::{invalid_format, solve_failed};

/// Closest pairs wired together in part 1
pub const CONNECTIONS: usize = 1000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["union-find", "geometry"])]
pub struct Solver;

type Position = [i64; 3];

#[derive(Debug)]
pub struct Playground {
    boxes: Vec<Position>,
    /// Index pairs ordered by distance, computed on first use
    closest_pairs: Option<Vec<(usize, usize)>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Playground;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let boxes = LineParser::new()
            .parse_with(input, parse_position)
            .map_err(invalid_format)?;
        Ok(Playground {
            boxes,
            closest_pairs: None,
        })
    }
}

fn parse_position(line: &str) -> anyhow::Result<Position> {
    let (x, y, z) = line
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<i64>()
                .with_context(|| format!("invalid coordinate {value:?} in {line:?}"))
        })
        .collect_tuple()
        .with_context(|| format!("junction box {line:?} needs three coordinates"))?;
    Ok([x?, y?, z?])
}

fn squared_distance(a: &Position, b: &Position) -> i64 {
    a.iter().zip(b).map(|(p, q)| (p - q).pow(2)).sum()
}

impl Playground {
    fn closest_pairs(&mut self) -> &[(usize, usize)] {
        let boxes = &self.boxes;
        self.closest_pairs.get_or_insert_with(|| {
            let mut pairs: Vec<_> = (0..boxes.len()).tuple_combinations().collect();
            pairs.sort_by_cached_key(|&(i, j)| (squared_distance(&boxes[i], &boxes[j]), i, j));
            pairs
        })
    }
}

struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            count: len,
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Returns false when both boxes were already on the same circuit
    fn connect(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.count -= 1;
        true
    }

    fn sizes(&self) -> Vec<usize> {
        (0..self.parent.len())
            .filter(|&node| self.parent[node] == node)
            .map(|root| self.size[root])
            .collect()
    }
}

/// Wire up the `connections` closest pairs, then multiply the sizes of the
/// three largest circuits.
pub fn largest_circuits_product(
    playground: &mut Playground,
    connections: usize,
) -> anyhow::Result<usize> {
    let mut circuits = Circuits::new(playground.boxes.len());
    for &(a, b) in playground.closest_pairs().iter().take(connections) {
        circuits.connect(a, b);
    }

    let mut sizes = circuits.sizes();
    ensure!(
        sizes.len() >= 3,
        "only {} circuits remain, need three",
        sizes.len()
    );
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    Ok(sizes[..3].iter().product())
}

/// Keep wiring closest pairs until every box is on one circuit; the product
/// of the x coordinates of the final pair.
pub fn final_connection(playground: &mut Playground) -> anyhow::Result<i64> {
    let mut circuits = Circuits::new(playground.boxes.len());
    let last = playground
        .closest_pairs()
        .iter()
        .copied()
        .find(|&(a, b)| circuits.connect(a, b) && circuits.count == 1)
        .ok_or_else(|| anyhow!("junction boxes never form a single circuit"))?;

    let (a, b) = last;
    Ok(playground.boxes[a][0] * playground.boxes[b][0])
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        largest_circuits_product(shared, CONNECTIONS)
            .map(|product| product.to_string())
            .map_err(solve_failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        final_connection(shared)
            .map(|product| product.to_string())
            .map_err(solve_failed)
    }
}
