use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::line_parser::LineParser;
use crate::utils::{invalid_format, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["graph", "dp"])]
pub struct Solver;

/// Device graph with names interned to dense ids
#[derive(Debug, Default)]
pub struct DeviceGraph<'a> {
    ids: HashMap<&'a str, usize>,
    outputs: Vec<Vec<usize>>,
}

impl<'a> DeviceGraph<'a> {
    fn intern(&mut self, name: &'a str) -> usize {
        let next = self.outputs.len();
        let id = *self.ids.entry(name).or_insert(next);
        if id == next {
            self.outputs.push(Vec::new());
        }
        id
    }

    fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// True when following outputs can lead back to a device (Kahn's algorithm)
    fn has_cycle(&self) -> bool {
        let mut incoming = vec![0usize; self.outputs.len()];
        for &to in self.outputs.iter().flatten() {
            incoming[to] += 1;
        }

        let mut ready: Vec<usize> = (0..incoming.len()).filter(|&n| incoming[n] == 0).collect();
        let mut visited = 0;
        while let Some(node) = ready.pop() {
            visited += 1;
            for &to in &self.outputs[node] {
                incoming[to] -= 1;
                if incoming[to] == 0 {
                    ready.push(to);
                }
            }
        }
        visited != self.outputs.len()
    }

    /// Number of distinct paths from `from` to `to`; zero if either is unknown.
    /// Fails when the count does not fit in a `u64`.
    pub fn paths(&self, from: &str, to: &str) -> anyhow::Result<u64> {
        let (Some(from_id), Some(to_id)) = (self.id(from), self.id(to)) else {
            return Ok(0);
        };
        let cache = DpCache::with_problem(
            VecBackend::with_capacity(self.outputs.len()),
            PathsTo {
                outputs: &self.outputs,
                target: to_id,
            },
        );
        cache
            .get(&from_id)
            .with_context(|| format!("number of paths from {from} to {to} overflows"))
    }
}

/// Paths from each device to a fixed target, `None` once the count overflows
struct PathsTo<'g> {
    outputs: &'g [Vec<usize>],
    target: usize,
}

impl DpProblem<usize, Option<u64>> for PathsTo<'_> {
    fn deps(&self, node: &usize) -> Cow<'_, [usize]> {
        if *node == self.target {
            Cow::Borrowed(&[])
        } else {
            Cow::Borrowed(&self.outputs[*node])
        }
    }

    fn compute(&self, node: &usize, deps: &[Option<u64>]) -> Option<u64> {
        if *node == self.target {
            Some(1)
        } else {
            deps.iter().try_fold(0u64, |total, &ways| total.checked_add(ways?))
        }
    }
}

/// `aaa: you hhh`
fn parse_device(line: &str) -> anyhow::Result<(&str, Vec<&str>)> {
    let (name, outputs) = line
        .split_once(':')
        .with_context(|| format!("device {line:?} is missing ':'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("device {line:?} has no name"));
    }
    Ok((name, outputs.split_whitespace().collect()))
}

impl AocParser for Solver {
    type SharedData<'a> = DeviceGraph<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let devices = LineParser::new()
            .parse_with(input, parse_device)
            .map_err(invalid_format)?;

        let mut graph = DeviceGraph::default();
        let mut listed = HashSet::new();
        for (name, outputs) in devices {
            if !listed.insert(name) {
                return Err(ParseError::InvalidFormat(format!(
                    "device {name} is listed more than once"
                )));
            }
            let from = graph.intern(name);
            for output in outputs {
                let to = graph.intern(output);
                graph.outputs[from].push(to);
            }
        }

        if graph.has_cycle() {
            return Err(ParseError::InvalidFormat(
                "device connections contain a cycle".to_string(),
            ));
        }
        Ok(graph)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .paths("you", "out")
            .map(|ways| ways.to_string())
            .map_err(solve_failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        paths_through_fft_and_dac(shared)
            .map(|ways| ways.to_string())
            .map_err(solve_failed)
    }
}

fn paths_through_fft_and_dac(graph: &DeviceGraph<'_>) -> anyhow::Result<u64> {
    // In a DAG at most one of the two orders can have paths
    let (first, second, between) = match graph.paths("fft", "dac")? {
        0 => ("dac", "fft", graph.paths("dac", "fft")?),
        ways => ("fft", "dac", ways),
    };
    if between == 0 {
        bail!("no path between fft and dac");
    }

    let into_first = graph.paths("svr", first)?;
    let out_of_second = graph.paths(second, "out")?;
    into_first
        .checked_mul(between)
        .and_then(|ways| ways.checked_mul(out_of_second))
        .context("number of paths through fft and dac overflows")
}
