//! Property-based tests for part dispatch and part bounds

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, Solver, SolverExt,
    SolverInstance,
};
use proptest::prelude::*;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Numbers;

#[derive(Debug)]
struct NumbersData {
    values: Vec<i64>,
    total: Option<i64>,
}

impl AocParser for Numbers {
    type SharedData<'a> = NumbersData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let values = input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat("bad int".into()))
            })
            .collect::<Result<_, _>>()?;
        Ok(NumbersData {
            values,
            total: None,
        })
    }
}

impl PartSolver<1> for Numbers {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared.values.iter().sum();
        shared.total = Some(total);
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Numbers {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared.total.unwrap_or_default();
        Ok((total * 2).to_string())
    }
}

fn to_input(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Dispatch through `Solver::solve_part` matches calling the part solver directly
    #[test]
    fn prop_part_dispatch(numbers in prop::collection::vec(-100i64..100, 1..8), part in 1u8..=2) {
        let input = to_input(&numbers);
        let mut via_solver = Numbers::parse(&input).unwrap();
        let mut direct = Numbers::parse(&input).unwrap();

        let dispatched = Numbers::solve_part(&mut via_solver, part).unwrap();
        let expected = match part {
            1 => <Numbers as PartSolver<1>>::solve(&mut direct).unwrap(),
            _ => <Numbers as PartSolver<2>>::solve(&mut direct).unwrap(),
        };
        prop_assert_eq!(dispatched, expected);
    }

    /// Parts outside 1..=PARTS are rejected before reaching the solver
    #[test]
    fn prop_out_of_range_rejection(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = Numbers::parse("1\n2").unwrap();
        match Numbers::solve_part_checked_range(&mut shared, part) {
            Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartOutOfRange, got {:?}", other),
        }
    }

    /// Part 2 sees what part 1 stored in the shared data
    #[test]
    fn prop_shared_data_carries_between_parts(numbers in prop::collection::vec(-100i64..100, 1..8)) {
        let input = to_input(&numbers);
        let expected: i64 = numbers.iter().sum();

        let mut instance = SolverInstance::<Numbers>::new(2025, 1, &input).unwrap();
        prop_assert_eq!(instance.solve(1).unwrap().answer, expected.to_string());
        prop_assert_eq!(instance.solve(2).unwrap().answer, (expected * 2).to_string());
    }
}

#[test]
fn test_instance_reports_metadata_and_timing() {
    let mut instance = SolverInstance::<Numbers>::new(2025, 4, "3\n4").unwrap();
    assert_eq!(instance.year(), 2025);
    assert_eq!(instance.day(), 4);
    assert_eq!(instance.parts(), 2);
    let parsed = instance.parse_span();
    assert!(parsed.end >= parsed.start);
    assert_eq!(instance.parse_duration(), parsed.duration());

    let result = instance.solve(1).unwrap();
    assert_eq!(result.answer, "7");
    assert!(result.duration() >= chrono::TimeDelta::zero());
}

#[test]
fn test_instance_propagates_parse_error() {
    let result = SolverInstance::<Numbers>::new(2025, 4, "3\nfour");
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}
