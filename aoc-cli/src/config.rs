//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable holding the adventofcode.com session cookie
pub const SESSION_ENV_VAR: &str = "AOC_SESSION";

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Cache directory path
    pub cache_dir: PathBuf,
    /// Session key (zeroized on drop), only needed on a cache miss
    pub session: Option<Zeroizing<String>>,
    /// Whether to print timings
    pub timings: bool,
}

impl Config {
    /// Build config from CLI args and the process environment
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let session = std::env::var(SESSION_ENV_VAR).ok().map(Zeroizing::new);
        Self::with_session(args, session)
    }

    /// Build config from CLI args with an explicit session value
    pub fn with_session(
        args: Args,
        session: Option<Zeroizing<String>>,
    ) -> Result<Self, CliError> {
        let cache_dir = expand_tilde(&args.cache_dir, dirs::home_dir())?;
        let session = session.and_then(trim_session);

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            cache_dir,
            session,
            timings: args.timings,
        })
    }
}

/// Strip surrounding whitespace; a blank value counts as no session.
///
/// Trimming copies into a fresh `Zeroizing` buffer, so the raw value is
/// wiped when it drops.
fn trim_session(raw: Zeroizing<String>) -> Option<Zeroizing<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == raw.len() {
        Some(raw)
    } else {
        Some(Zeroizing::new(trimmed.to_string()))
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path, home: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = home.ok_or_else(|| {
        CliError::Config(format!(
            "cannot expand {}: home directory is unknown",
            path.display()
        ))
    })?;
    Ok(home.join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_expand_tilde() {
        let home = Some(PathBuf::from("/home/elf"));
        assert_eq!(
            expand_tilde(Path::new("~/.cache/aoc"), home.clone()).unwrap(),
            PathBuf::from("/home/elf/.cache/aoc")
        );
        assert_eq!(
            expand_tilde(Path::new("~"), home.clone()).unwrap(),
            PathBuf::from("/home/elf")
        );
        assert_eq!(
            expand_tilde(Path::new("/tmp/inputs"), home).unwrap(),
            PathBuf::from("/tmp/inputs")
        );
        assert!(expand_tilde(Path::new("~/x"), None).is_err());
        // not a tilde prefix
        assert_eq!(
            expand_tilde(Path::new("~elf/x"), None).unwrap(),
            PathBuf::from("~elf/x")
        );
    }

    #[test]
    fn test_blank_session_is_treated_as_missing() {
        let args = Args::try_parse_from(["aoc", "--cache-dir", "/tmp/aoc"]).unwrap();
        let config = Config::with_session(args, Some(Zeroizing::new("  \n".to_string()))).unwrap();
        assert!(config.session.is_none());

        let args = Args::try_parse_from(["aoc", "--cache-dir", "/tmp/aoc"]).unwrap();
        let config =
            Config::with_session(args, Some(Zeroizing::new("abc123\n".to_string()))).unwrap();
        assert_eq!(config.session.as_deref().map(String::as_str), Some("abc123"));
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/aoc"));
    }

    #[test]
    fn test_trim_session_keeps_untouched_buffer() {
        let raw = Zeroizing::new("abc123".to_string());
        let address = raw.as_ptr();
        let kept = trim_session(raw).unwrap();
        assert_eq!(kept.as_str(), "abc123");
        assert_eq!(kept.as_ptr(), address);

        let trimmed = trim_session(Zeroizing::new("\tabc123 \n".to_string())).unwrap();
        assert_eq!(trimmed.as_str(), "abc123");
        assert!(trim_session(Zeroizing::new(" \r\n".to_string())).is_none());
    }
}
