use std::collections::HashSet;

use anyhow::{Context, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 12, tags = ["packing", "backtracking"])]
pub struct Solver;

/// Cells of one orientation, relative to its first cell in reading order
type Orientation = Vec<(usize, isize)>;

#[derive(Debug)]
pub struct Shape {
    cells: usize,
    /// Side of the smallest square holding the shape
    extent: usize,
    orientations: Vec<Orientation>,
}

impl Shape {
    fn new(cells: &[(usize, usize)]) -> Self {
        let extent = cells
            .iter()
            .map(|&(r, c)| r.max(c) + 1)
            .max()
            .unwrap_or(0);

        let mut orientations: Vec<Orientation> = Vec::new();
        let mut seen = HashSet::new();
        let mut current: Vec<(isize, isize)> = cells
            .iter()
            .map(|&(r, c)| (r as isize, c as isize))
            .collect();
        for _ in 0..4 {
            let mirrored: Vec<_> = current.iter().map(|&(r, c)| (c, r)).collect();
            for variant in [current.clone(), mirrored] {
                let normalized = normalize(variant);
                if seen.insert(normalized.clone()) {
                    orientations.push(anchor(&normalized));
                }
            }
            current = current.iter().map(|&(r, c)| (c, -r)).collect();
        }

        Self {
            cells: cells.len(),
            extent,
            orientations,
        }
    }
}

/// Shift to non-negative coordinates and sort in reading order
fn normalize(mut cells: Vec<(isize, isize)>) -> Vec<(isize, isize)> {
    let min_r = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_c = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
    for cell in &mut cells {
        *cell = (cell.0 - min_r, cell.1 - min_c);
    }
    cells.sort_unstable();
    cells
}

fn anchor(normalized: &[(isize, isize)]) -> Orientation {
    let Some(&(first_r, first_c)) = normalized.first() else {
        return Vec::new();
    };
    normalized
        .iter()
        .map(|&(r, c)| ((r - first_r) as usize, c - first_c))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    counts: Vec<usize>,
}

#[derive(Debug)]
pub struct Farm {
    shapes: Vec<Shape>,
    regions: Vec<Region>,
}

impl AocParser for Solver {
    type SharedData<'a> = Farm;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_farm(input).map_err(invalid_format)
    }
}

fn parse_farm(input: &str) -> anyhow::Result<Farm> {
    let shape_header = Regex::new(r"^(\d+):$")?;
    let region_line = Regex::new(r"^(\d+)x(\d+):(.*)$")?;

    let mut shapes = Vec::new();
    let mut regions = Vec::new();
    let mut lines = input.trim().lines().map(str::trim);

    while let Some(line) = lines.next() {
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = shape_header.captures(line) {
            let id: usize = caps[1].parse()?;
            ensure!(
                id == shapes.len(),
                "shape {id} is out of order, expected {}",
                shapes.len()
            );

            let mut cells = Vec::new();
            for (r, row) in lines.by_ref().take_while(|row| !row.is_empty()).enumerate() {
                for (c, cell) in row.chars().enumerate() {
                    match cell {
                        '#' => cells.push((r, c)),
                        '.' => {}
                        other => bail!("unexpected {other:?} in shape {id}"),
                    }
                }
            }
            ensure!(!cells.is_empty(), "shape {id} has no cells");
            shapes.push(Shape::new(&cells));
        } else if let Some(caps) = region_line.captures(line) {
            let counts = caps[3]
                .split_whitespace()
                .map(|count| {
                    count
                        .parse()
                        .with_context(|| format!("invalid present count in {line:?}"))
                })
                .collect::<anyhow::Result<Vec<usize>>>()?;
            regions.push(Region {
                width: caps[1].parse()?,
                height: caps[2].parse()?,
                counts,
            });
        } else {
            bail!("unrecognized line {line:?}");
        }
    }

    if let Some(region) = regions.iter().find(|r| r.counts.len() > shapes.len()) {
        bail!(
            "region {}x{} lists {} present counts for {} shapes",
            region.width,
            region.height,
            region.counts.len(),
            shapes.len()
        );
    }

    Ok(Farm { shapes, regions })
}

impl Farm {
    /// Whether every present listed for `region` fits without overlap.
    ///
    /// Generous regions are accepted when each present gets its own square
    /// slot, and regions smaller than the presents' total area are rejected;
    /// anything in between goes to an exact packing search.
    fn fits(&self, region: &Region) -> bool {
        let wanted = || region.counts.iter().zip(&self.shapes).filter(|&(&n, _)| n > 0);

        let presents: usize = region.counts.iter().sum();
        if presents == 0 {
            return true;
        }

        let slot = wanted().map(|(_, shape)| shape.extent).max().unwrap_or(1);
        if (region.width / slot) * (region.height / slot) >= presents {
            return true;
        }

        let needed: usize = wanted().map(|(&n, shape)| n * shape.cells).sum();
        let area = region.width * region.height;
        if needed > area {
            return false;
        }

        // Orientations are closed under transposition, so scan along the
        // short side to keep the band of partly filled cells narrow
        let width = region.width.min(region.height);
        let height = region.width.max(region.height);
        let band = slot * width;

        let mut packing = Packing {
            width,
            height,
            shapes: &self.shapes,
            filled: vec![false; area],
            remaining: region.counts.clone(),
            holes: area - needed,
            band: (band <= u128::BITS as usize).then_some(band),
            dead_ends: HashSet::new(),
        };
        packing.search(0)
    }
}

/// Backtracking over the first empty cell: it either stays a hole or becomes
/// the first cell of some remaining present.
///
/// Every cell before the current one is filled, and a present anchored there
/// reaches at most `band` cells ahead, so `(cell, band bits, remaining)`
/// identifies a search state.
struct Packing<'s> {
    width: usize,
    height: usize,
    shapes: &'s [Shape],
    filled: Vec<bool>,
    remaining: Vec<usize>,
    holes: usize,
    /// `None` when the band does not fit a `u128`; states are then not memoized
    band: Option<usize>,
    dead_ends: HashSet<(usize, u128, Vec<usize>)>,
}

impl Packing<'_> {
    fn cells_at(&self, orientation: &Orientation, cell: usize) -> Option<Vec<usize>> {
        let (row, col) = (cell / self.width, cell % self.width);
        orientation
            .iter()
            .map(|&(dr, dc)| {
                let r = row + dr;
                let c = col.checked_add_signed(dc)?;
                (r < self.height && c < self.width)
                    .then(|| r * self.width + c)
                    .filter(|&index| !self.filled[index])
            })
            .collect()
    }

    fn search(&mut self, from: usize) -> bool {
        if self.remaining.iter().all(|&n| n == 0) {
            return true;
        }
        let Some(cell) = (from..self.filled.len()).find(|&i| !self.filled[i]) else {
            return false;
        };

        let state = self
            .band
            .map(|len| (cell, self.band_bits(cell, len), self.remaining.clone()));
        if state.as_ref().is_some_and(|state| self.dead_ends.contains(state)) {
            return false;
        }

        let shapes = self.shapes;
        for (index, shape) in shapes.iter().enumerate() {
            if self.remaining.get(index).is_none_or(|&n| n == 0) {
                continue;
            }
            for orientation in &shape.orientations {
                let Some(cells) = self.cells_at(orientation, cell) else {
                    continue;
                };
                self.set(&cells, true);
                self.remaining[index] -= 1;
                let found = self.search(cell + 1);
                self.remaining[index] += 1;
                self.set(&cells, false);
                if found {
                    return true;
                }
            }
        }

        if self.holes > 0 {
            self.holes -= 1;
            self.filled[cell] = true;
            let found = self.search(cell + 1);
            self.filled[cell] = false;
            self.holes += 1;
            if found {
                return true;
            }
        }

        if let Some(state) = state {
            self.dead_ends.insert(state);
        }
        false
    }

    /// Filled flags of `cell..cell + len` as bits, `cell` lowest
    fn band_bits(&self, cell: usize, len: usize) -> u128 {
        let end = (cell + len).min(self.filled.len());
        self.filled[cell..end]
            .iter()
            .rev()
            .fold(0, |bits, &filled| bits << 1 | u128::from(filled))
    }

    fn set(&mut self, cells: &[usize], value: bool) {
        for &index in cells {
            self.filled[index] = value;
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fitting = shared
            .regions
            .iter()
            .filter(|region| shared.fits(region))
            .count();
        Ok(fitting.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Err(SolveError::PartNotImplemented(2))
    }
}
