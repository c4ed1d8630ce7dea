use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, Solver,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2034, day = 25, tags = ["test", "macro"])]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                line.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not an integer: {line:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct Borrowing;

impl AocParser for Borrowing {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.split(',').collect())
    }
}

impl PartSolver<1> for Borrowing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.sort_unstable();
        Ok(shared.join(""))
    }
}

#[test]
fn test_parts_dispatch_to_part_solvers() {
    let mut shared = SumProduct::parse("2\n3\n4").unwrap();
    assert_eq!(SumProduct::PARTS, 2);
    assert_eq!(SumProduct::solve_part(&mut shared, 1).unwrap(), "9");
    assert_eq!(SumProduct::solve_part(&mut shared, 2).unwrap(), "24");
}

#[test]
fn test_unknown_part_is_not_implemented() {
    let mut shared = SumProduct::parse("1").unwrap();
    assert!(matches!(
        SumProduct::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
    assert!(matches!(
        SumProduct::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
}

#[test]
fn test_borrowed_shared_data() {
    let input = String::from("c,a,b");
    let mut shared = Borrowing::parse(&input).unwrap();
    assert_eq!(Borrowing::PARTS, 1);
    assert_eq!(Borrowing::solve_part(&mut shared, 1).unwrap(), "abc");
}

#[test]
fn test_auto_registered_plugin_is_discoverable() {
    let plugin = aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
        .find(|plugin| plugin.year == 2034 && plugin.day == 25)
        .expect("plugin was not submitted");
    assert_eq!(plugin.tags, &["test", "macro"]);

    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro"))
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2034, 25, "5\n6\n7").unwrap();
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "18");
    assert_eq!(solver.solve(2).unwrap().answer, "210");
}
