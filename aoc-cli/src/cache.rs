//! Input cache for storing puzzle inputs locally

use crate::error::CacheError;
use std::fs;
use std::path::PathBuf;

/// File-based cache for puzzle inputs
///
/// Directory structure: `{cache_dir}/{year}_day{day:02}.txt`. Cached files are
/// never re-validated or overwritten by a fetch.
pub struct InputCache {
    cache_dir: PathBuf,
}

impl InputCache {
    /// Create a cache rooted at `cache_dir` (created on first write)
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Get the cache path for a specific year/day
    pub fn cache_path(&self, year: u16, day: u8) -> PathBuf {
        self.cache_dir.join(format!("{}_day{:02}.txt", year, day))
    }

    /// Get cached input verbatim, or None if not cached
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(year, day);
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(Some(content))
        } else {
            Ok(None)
        }
    }

    /// Store input in cache
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), CacheError> {
        let path = self.cache_path(year, day);

        fs::create_dir_all(&self.cache_dir).map_err(|e| {
            CacheError::DirCreation(format!(
                "Failed to create {}: {}",
                self.cache_dir.display(),
                e
            ))
        })?;

        fs::write(&path, input)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_path_format() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf());

        assert_eq!(cache.cache_path(2025, 1), temp.path().join("2025_day01.txt"));
        assert_eq!(cache.cache_path(2023, 25), temp.path().join("2023_day25.txt"));
    }

    #[test]
    fn test_cache_roundtrip_creates_directory() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().join("nested").join("inputs"));

        assert!(cache.get(2025, 1).unwrap().is_none());

        let input = "  L68\nL30\n\n";
        cache.put(2025, 1, input).unwrap();

        // Contents come back verbatim, whitespace included
        assert_eq!(cache.get(2025, 1).unwrap(), Some(input.to_string()));
        assert!(cache.get(2025, 2).unwrap().is_none());
    }

    #[test]
    fn test_put_fails_when_directory_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let cache = InputCache::new(blocker);
        assert!(matches!(
            cache.put(2025, 1, "input"),
            Err(CacheError::DirCreation(_))
        ));
    }
}
