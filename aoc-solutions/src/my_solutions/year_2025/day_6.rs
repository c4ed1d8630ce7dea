use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::solve_failed;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["parsing", "grid"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
}

impl Operator {
    /// `None` if an operand or the result does not fit in a `u64`
    fn apply(self, numbers: impl IntoIterator<Item = Option<u64>>) -> Option<u64> {
        let mut numbers = numbers.into_iter();
        match self {
            Self::Add => numbers.try_fold(0u64, |acc, n| acc.checked_add(n?)),
            Self::Multiply => numbers.try_fold(1u64, |acc, n| acc.checked_mul(n?)),
        }
    }
}

impl TryFrom<u8> for Operator {
    type Error = ParseError;

    fn try_from(symbol: u8) -> Result<Self, Self::Error> {
        match symbol {
            b'+' => Ok(Self::Add),
            b'*' => Ok(Self::Multiply),
            other => Err(ParseError::InvalidFormat(format!(
                "unknown operator {:?}",
                char::from(other)
            ))),
        }
    }
}

/// One problem of the worksheet: the operator and the block of digit rows
/// above it, padded with spaces to the block width.
#[derive(Debug)]
pub struct Problem {
    operator: Operator,
    rows: Vec<Vec<u8>>,
}

impl Problem {
    fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Numbers written left to right, one per row
    fn row_numbers(&self) -> impl Iterator<Item = Option<u64>> + '_ {
        self.rows.iter().filter_map(|row| read_number(row.iter().copied()))
    }

    /// Numbers written top to bottom, one per column
    fn column_numbers(&self) -> impl Iterator<Item = Option<u64>> + '_ {
        (0..self.width())
            .filter_map(move |col| read_number(self.rows.iter().map(|row| row[col])))
    }
}

/// Concatenate the digits among `cells`, ignoring spaces.
///
/// `None` if there are no digits, `Some(None)` if the number overflows.
fn read_number(cells: impl Iterator<Item = u8>) -> Option<Option<u64>> {
    cells.filter(u8::is_ascii_digit).fold(None, |acc, digit| {
        let acc = acc.unwrap_or(Some(0));
        Some(acc.and_then(|n| n.checked_mul(10)?.checked_add(u64::from(digit - b'0'))))
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Problem>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&[u8]> = input
            .trim_matches(['\n', '\r'])
            .lines()
            .map(|line| line.trim_end_matches('\r').as_bytes())
            .collect();

        let (&operator_row, digit_rows) = lines
            .split_last()
            .ok_or_else(|| ParseError::MissingData("worksheet is empty".to_string()))?;
        if digit_rows.is_empty() {
            return Err(ParseError::MissingData(
                "worksheet has no number rows".to_string(),
            ));
        }

        for (index, row) in digit_rows.iter().enumerate() {
            if let Some(&bad) = row.iter().find(|&&c| c != b' ' && !c.is_ascii_digit()) {
                return Err(ParseError::InvalidFormat(format!(
                    "row {index} has unexpected {:?}",
                    char::from(bad)
                )));
            }
        }

        let width = lines.iter().map(|line| line.len()).max().unwrap_or(0);
        let cell = |row: &[u8], col: usize| row.get(col).copied().unwrap_or(b' ');
        let blank_column = |col: usize| lines.iter().all(|&row| cell(row, col) == b' ');

        let mut problems = Vec::new();
        let mut col = 0;
        while col < width {
            if blank_column(col) {
                col += 1;
                continue;
            }
            let start = col;
            while col < width && !blank_column(col) {
                col += 1;
            }

            let mut symbols = (start..col)
                .map(|c| cell(operator_row, c))
                .filter(|&c| c != b' ');
            let operator = match (symbols.next(), symbols.next()) {
                (Some(symbol), None) => Operator::try_from(symbol)?,
                (None, _) => {
                    return Err(ParseError::MissingData(format!(
                        "problem at column {start} has no operator"
                    )));
                }
                (Some(_), Some(_)) => {
                    return Err(ParseError::InvalidFormat(format!(
                        "problem at column {start} has more than one operator"
                    )));
                }
            };

            let rows = digit_rows
                .iter()
                .map(|&row| (start..col).map(|c| cell(row, c)).collect())
                .collect();
            problems.push(Problem { operator, rows });
        }

        Ok(problems)
    }
}

fn grand_total<'p, F, I>(problems: &'p [Problem], numbers: F) -> anyhow::Result<u64>
where
    F: Fn(&'p Problem) -> I,
    I: Iterator<Item = Option<u64>>,
{
    problems.iter().try_fold(0u64, |total, problem| {
        let Some(result) = problem.operator.apply(numbers(problem)) else {
            bail!("problem result overflows");
        };
        total
            .checked_add(result)
            .ok_or_else(|| anyhow!("grand total overflows"))
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        grand_total(shared, Problem::row_numbers)
            .map(|total| total.to_string())
            .map_err(solve_failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        grand_total(shared, Problem::column_numbers)
            .map(|total| total.to_string())
            .map_err(solve_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = concat!(
        "123 328  51 64 \n",
        " 45 64  387 23 \n",
        "  6 98  215 314\n",
        "*   +   *   +  \n",
    );

    fn solve(input: &str, part: u8) -> String {
        let mut shared = <Solver as AocParser>::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(solve(EXAMPLE, 1), "4277556");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(solve(EXAMPLE, 2), "3263827");
    }

    #[test]
    fn test_blocks_split_on_blank_columns() {
        let problems = <Solver as AocParser>::parse(EXAMPLE).unwrap();
        assert_eq!(problems.len(), 4);
        assert_eq!(problems[0].operator, Operator::Multiply);
        assert_eq!(problems[1].operator, Operator::Add);
        assert_eq!(
            problems[0].row_numbers().collect::<Vec<_>>(),
            vec![Some(123), Some(45), Some(6)]
        );
        assert_eq!(
            problems[0].column_numbers().collect::<Vec<_>>(),
            vec![Some(1), Some(24), Some(356)]
        );
    }

    #[test]
    fn test_number_wider_than_u64_fails_to_solve() {
        let input = "123456789012345678901\n+";
        let mut shared = <Solver as AocParser>::parse(input).unwrap();
        assert!(matches!(
            <Solver as aoc_solver::Solver>::solve_part(&mut shared, 1),
            Err(SolveError::SolveFailed(_))
        ));
        // Read column-wise the same row is 21 single digits
        assert_eq!(solve(input, 2), "91");
    }

    #[test]
    fn test_read_number() {
        assert_eq!(read_number(b"  ".iter().copied()), None);
        assert_eq!(read_number(b" 4 2".iter().copied()), Some(Some(42)));
        assert_eq!(read_number(b"18446744073709551615".iter().copied()), Some(Some(u64::MAX)));
        assert_eq!(read_number(b"18446744073709551616".iter().copied()), Some(None));
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        assert!(matches!(
            <Solver as AocParser>::parse("1 2\n3 4\n- +"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
