//! Splitting raw puzzle text into typed records

use std::str::FromStr;

/// Separator used when none is configured
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Splits puzzle text into records and transforms each one.
///
/// The whole text is trimmed first, then split on the separator. Empty
/// records (consecutive separators) are dropped. Records keep their order.
///
/// ```
/// use aoc_solutions::utils::line_parser::LineParser;
///
/// let ranges = LineParser::new()
///     .separator(",")
///     .parse_with("11-22,,95-115\n", |record| {
///         record
///             .split_once('-')
///             .ok_or("missing '-'")
///             .map(|(a, b)| (a.to_string(), b.to_string()))
///     })
///     .unwrap();
/// assert_eq!(ranges.len(), 2);
///
/// let numbers: Vec<i32> = LineParser::new().parse("\n1\n\n-2\n3\n").unwrap();
/// assert_eq!(numbers, vec![1, -2, 3]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LineParser<'s> {
    separator: &'s str,
}

impl<'s> LineParser<'s> {
    /// A parser splitting on newlines
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Use `separator` between records instead of a newline
    pub fn separator(self, separator: &'s str) -> Self {
        Self { separator }
    }

    /// The non-empty records of `text`, in order
    pub fn records<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> + use<'t, 's> {
        text.trim()
            .split(self.separator)
            .filter(|record| !record.is_empty())
    }

    /// Transform every record with `transform`, stopping at the first error
    ///
    /// Records borrow from `text`, so the output may hold slices of it.
    pub fn parse_with<'t, T, E, F>(&self, text: &'t str, transform: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&'t str) -> Result<T, E>,
    {
        self.records(text).map(transform).collect()
    }

    /// Parse every record with [`FromStr`] (integers by default)
    pub fn parse<T: FromStr>(&self, text: &str) -> Result<Vec<T>, T::Err> {
        self.parse_with(text, str::parse)
    }
}

impl Default for LineParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}
