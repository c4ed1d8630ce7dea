//! Sequential runner: resolve input, parse once, solve each selected part

use crate::config::Config;
use crate::error::CliError;
use crate::input::InputProvider;
use crate::output::OutputFormatter;
use aoc_solver::{SolveError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use std::ops::RangeInclusive;
use tracing::{debug, info};

/// Result from a single solved (or unimplemented) part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolveError>,
    /// Set on the first part of each day only
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Filters applied when selecting registered solvers
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub year: Option<u16>,
    pub day: Option<u8>,
    pub part: Option<u8>,
}

impl From<&Config> for Selection {
    fn from(config: &Config) -> Self {
        Self {
            year: config.year_filter,
            day: config.day_filter,
            part: config.part_filter,
        }
    }
}

pub struct Runner {
    registry: SolverRegistry,
    provider: InputProvider,
    selection: Selection,
}

impl Runner {
    pub fn new(registry: SolverRegistry, provider: InputProvider, selection: Selection) -> Self {
        Self {
            registry,
            provider,
            selection,
        }
    }

    /// Collect work items by filtering from registry metadata, in year/day order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .storage()
            .iter_info()
            .filter(|info| self.selection.year.is_none_or(|y| info.year == y))
            .filter(|info| self.selection.day.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(self.selection.part, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Run every work item in order, printing results as they are produced.
    ///
    /// Input, parse and solve failures abort the run. A part the solver does
    /// not implement is reported and skipped.
    pub fn run(
        &self,
        work_items: &[WorkItem],
        formatter: &OutputFormatter,
    ) -> Result<Vec<SolverResult>, CliError> {
        let mut results = Vec::new();
        let with_headers = work_items.len() > 1;

        for work in work_items {
            if with_headers {
                formatter.print_header(work);
            }
            for result in self.run_item(work)? {
                formatter.print_result(&result);
                results.push(result);
            }
        }

        Ok(results)
    }

    fn run_item(&self, work: &WorkItem) -> Result<Vec<SolverResult>, CliError> {
        let (year, day) = (work.year, work.day);
        let puzzle_error = |source| CliError::Puzzle { year, day, source };

        let input = self.provider.get_input(year, day)?;

        info!(year, day, "running solver");
        let mut solver = self
            .registry
            .create_solver(year, day, &input)
            .map_err(|e| match e {
                e @ SolverError::ParseError(_) => puzzle_error(e),
                e => CliError::Solver(e),
            })?;
        let mut parse_duration = Some(solver.parse_duration());

        let mut results = Vec::new();
        for part in work.parts.clone() {
            let (answer, solve_duration) = match solver.solve(part) {
                Ok(solved) => {
                    let duration = solved.duration();
                    (Ok(solved.answer), duration)
                }
                Err(e @ SolveError::PartNotImplemented(_)) => (Err(e), TimeDelta::zero()),
                Err(e) => return Err(puzzle_error(e.into())),
            };
            debug!(year, day, part, ?solve_duration, "part finished");

            results.push(SolverResult {
                year,
                day,
                part,
                answer,
                parse_duration: parse_duration.take(),
                solve_duration,
            });
        }

        Ok(results)
    }
}

/// Filter parts based on the part filter and the solver's part count
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0, // Empty range - intentional
        None => 1..=max_parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InputCache;
    use aoc_http_client::AocClient;
    use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolverRegistryBuilder};
    use tempfile::TempDir;

    /// Sums the input in part 1; part 2 is left unimplemented
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Sum;

    impl AocParser for Sum {
        type SharedData<'a> = Vec<u64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| {
                    n.parse()
                        .map_err(|_| ParseError::InvalidFormat(format!("not a number: {n}")))
                })
                .collect()
        }
    }

    impl PartSolver<1> for Sum {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<u64>().to_string())
        }
    }

    impl PartSolver<2> for Sum {
        fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Err(SolveError::PartNotImplemented(2))
        }
    }

    fn runner(dir: &TempDir, selection: Selection) -> Runner {
        let registry = SolverRegistryBuilder::new()
            .register::<Sum>(2025, 1)
            .unwrap()
            .register::<Sum>(2025, 2)
            .unwrap()
            .register::<Sum>(2024, 3)
            .unwrap()
            .build();
        let client = AocClient::builder()
            .base_url("http://127.0.0.1:9")
            .unwrap()
            .build()
            .unwrap();
        let provider = InputProvider::new(InputCache::new(dir.path().to_path_buf()), None, client);
        Runner::new(registry, provider, selection)
    }

    #[test]
    fn test_work_items_follow_filters_in_order() {
        let dir = TempDir::new().unwrap();

        let all = runner(&dir, Selection::default()).collect_work_items();
        let keys: Vec<_> = all.iter().map(|w| (w.year, w.day)).collect();
        assert_eq!(keys, vec![(2024, 3), (2025, 1), (2025, 2)]);
        assert!(all.iter().all(|w| w.parts == (1..=2)));

        let selection = Selection {
            year: Some(2025),
            day: None,
            part: Some(2),
        };
        let filtered = runner(&dir, selection).collect_work_items();
        assert_eq!(
            filtered,
            vec![
                WorkItem {
                    year: 2025,
                    day: 1,
                    parts: 2..=2
                },
                WorkItem {
                    year: 2025,
                    day: 2,
                    parts: 2..=2
                },
            ]
        );
    }

    #[test]
    fn test_unimplemented_part_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("2025_day01.txt"), "1 2 3\n").unwrap();
        let selection = Selection {
            year: Some(2025),
            day: Some(1),
            part: None,
        };
        let runner = runner(&dir, selection);

        let items = runner.collect_work_items();
        let results = runner.run(&items, &OutputFormatter::new(false)).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].answer.as_deref().unwrap(), "6");
        assert!(results[0].parse_duration.is_some());
        assert!(matches!(
            results[1].answer,
            Err(SolveError::PartNotImplemented(2))
        ));
        assert!(results[1].parse_duration.is_none());
    }

    #[test]
    fn test_parse_failure_aborts_with_puzzle_context() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("2025_day02.txt"), "1 two 3").unwrap();
        let selection = Selection {
            year: Some(2025),
            day: Some(2),
            part: None,
        };
        let runner = runner(&dir, selection);

        let items = runner.collect_work_items();
        let err = runner
            .run(&items, &OutputFormatter::new(false))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            CliError::Puzzle {
                year: 2025,
                day: 2,
                source: SolverError::ParseError(_)
            }
        ));
    }

    #[test]
    fn test_uncached_input_without_session_aborts() {
        let dir = TempDir::new().unwrap();
        let runner = runner(&dir, Selection::default());

        let items = runner.collect_work_items();
        let err = runner
            .run(&items, &OutputFormatter::new(false))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            CliError::MissingSession {
                year: 2024,
                day: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(1), 2), 1..=1);
        assert!(filter_parts(Some(2), 1).is_empty());
    }
}
