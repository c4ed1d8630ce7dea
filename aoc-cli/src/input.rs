//! Puzzle input resolution: local cache first, download on a miss

use crate::cache::InputCache;
use crate::config::SESSION_ENV_VAR;
use crate::error::CliError;
use aoc_http_client::AocClient;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Resolves puzzle inputs, downloading and caching the ones not seen before
pub struct InputProvider {
    cache: InputCache,
    session: Option<Zeroizing<String>>,
    client: AocClient,
}

impl InputProvider {
    pub fn new(cache: InputCache, session: Option<Zeroizing<String>>, client: AocClient) -> Self {
        Self {
            cache,
            session,
            client,
        }
    }

    /// Raw puzzle text for `year`/`day`.
    ///
    /// A cached copy is returned as is, without touching the network.
    /// Otherwise the input is downloaded with the session cookie and written
    /// to the cache; a failed write only logs a warning.
    ///
    /// # Errors
    ///
    /// * `CliError::MissingSession` - not cached and no session configured
    /// * `CliError::Http` - the download failed or returned a non-success status
    /// * `CliError::Cache` - the cached file exists but cannot be read
    pub fn get_input(&self, year: u16, day: u8) -> Result<String, CliError> {
        if let Some(input) = self.cache.get(year, day)? {
            debug!(year, day, "using cached input");
            return Ok(input);
        }

        warn!(
            year,
            day,
            "input not cached, downloading from {}",
            self.client.base_url()
        );
        let session = self.session.as_ref().ok_or(CliError::MissingSession {
            year,
            day,
            var: SESSION_ENV_VAR,
        })?;

        let input = self.client.get_input(year, day, session)?;

        if let Err(e) = self.cache.put(year, day, &input) {
            warn!(
                year,
                day,
                path = %self.cache.cache_path(year, day).display(),
                "failed to cache input: {e}"
            );
        }

        Ok(input)
    }
}
