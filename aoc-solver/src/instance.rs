//! Parsed puzzles ready to be solved, with wall-clock timing

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// UTC start and end of one parse or solve step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Span {
    /// Run `f`, recording when it started and finished
    pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Span) {
        let start = Utc::now();
        let value = f();
        let end = Utc::now();
        (value, Span { start, end })
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Answer to one part and how long it took
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub span: Span,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.span.duration()
    }
}

/// One puzzle's parsed input, owned by the solver `S` that parsed it.
///
/// The shared data may borrow from the input text, hence the lifetime.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parsed: Span,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` for `year`/`day`
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parsed) = Span::measure(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parsed,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], as handed out by the registry.
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn print_all(mut solver: Box<dyn DynSolver + '_>) -> Result<(), aoc_solver::SolveError> {
///     for part in 1..=solver.parts() {
///         println!("Part {}: {}", part, solver.solve(part)?.answer);
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve `part`; parts outside `1..=parts()` give `SolveError::PartOutOfRange`
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    /// When parsing ran
    fn parse_span(&self) -> Span;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_span().duration()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, span) = Span::measure(|| S::solve_part_checked_range(&mut self.shared, part));
        Ok(SolveResult {
            answer: answer?,
            span,
        })
    }

    fn parse_span(&self) -> Span {
        self.parsed
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
