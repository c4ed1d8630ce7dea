//! Output formatting for solver results

use crate::runner::{SolverResult, WorkItem};
use aoc_solver::SolveError;
use chrono::TimeDelta;

/// Output formatter for solver results
///
/// Answers go to stdout as `Part N: <answer>`; parts without an
/// implementation are reported on stderr.
pub struct OutputFormatter {
    timings: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(timings: bool) -> Self {
        Self {
            timings,
            start_time: std::time::Instant::now(),
        }
    }

    /// Print the `<year> day <DD>` line preceding a day's answers
    pub fn print_header(&self, work: &WorkItem) {
        println!("{}", format_header(work));
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) => println!("{}", self.format_answer(result, answer)),
            Err(e) => eprintln!(
                "{} day {:02} part {}: {}",
                result.year, result.day, result.part, e
            ),
        }
    }

    fn format_answer(&self, result: &SolverResult, answer: &str) -> String {
        let part = result.part;
        if !self.timings {
            return format!("Part {}: {}", part, answer);
        }

        let parse_timing = result
            .parse_duration
            .map(|d| format!("parse: {}, ", format_duration(d)))
            .unwrap_or_default();
        format!(
            "Part {}: {} ({}solve: {})",
            part,
            answer,
            parse_timing,
            format_duration(result.solve_duration)
        )
    }

    /// Print a summary after all results (only with timings enabled)
    pub fn print_summary(&self, results: &[SolverResult]) {
        if !self.timings {
            return;
        }

        let solved = results.iter().filter(|r| r.answer.is_ok()).count();
        let not_implemented = results
            .iter()
            .filter(|r| matches!(r.answer, Err(SolveError::PartNotImplemented(_))))
            .count();

        let total_parse_time: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve_time: TimeDelta = results.iter().map(|r| r.solve_duration).sum();

        println!();
        println!("--- Summary ---");
        println!(
            "Parts: {} solved, {} not implemented",
            solved, not_implemented
        );
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(self.start_time.elapsed())
        );
    }
}

fn format_header(work: &WorkItem) -> String {
    format!("{} day {:02}", work.year, work.day)
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn result(part: u8, parse_micros: Option<i64>, solve_micros: i64) -> SolverResult {
        SolverResult {
            year: 2025,
            day: 1,
            part,
            answer: Ok("42".to_string()),
            parse_duration: parse_micros.map(TimeDelta::microseconds),
            solve_duration: TimeDelta::microseconds(solve_micros),
        }
    }

    #[test]
    fn test_plain_answer_line() {
        let formatter = OutputFormatter::new(false);
        assert_eq!(
            formatter.format_answer(&result(1, Some(5), 10), "42"),
            "Part 1: 42"
        );
    }

    #[test]
    fn test_answer_line_with_timings() {
        let formatter = OutputFormatter::new(true);
        assert_eq!(
            formatter.format_answer(&result(1, Some(5), 1500), "42"),
            "Part 1: 42 (parse: 5µs, solve: 1.50ms)"
        );
        assert_eq!(
            formatter.format_answer(&result(2, None, 2_500_000), "42"),
            "Part 2: 42 (solve: 2.50s)"
        );
    }

    #[test]
    fn test_header_pads_day() {
        let work = WorkItem {
            year: 2025,
            day: 7,
            parts: 1..=2,
        };
        assert_eq!(format_header(&work), "2025 day 07");
    }

    proptest! {
        #[test]
        fn prop_negative_durations_are_signed(micros in 1i64..10_000_000) {
            let positive = format_duration(TimeDelta::microseconds(micros));
            let negative = format_duration(TimeDelta::microseconds(-micros));
            prop_assert_eq!(negative, format!("-{}", positive));
        }
    }
}
