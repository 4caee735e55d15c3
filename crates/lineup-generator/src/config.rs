// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Engine settings and generation requests.
//!
//! `EngineConfig` holds the search limits shared by every solve an engine
//! runs (node ceiling, wall-clock budget, progress log interval) together
//! with the diversity penalty, the injury policy applied when a roster
//! model is built from a contest config and the number of contests a batch
//! runs at once. Every field has a default, so an
//! empty TOML document is a valid config:
//!
//! ```rust
//! use lineup_generator::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     node_limit = 1000000
//!     time_limit_ms = 2500
//!     overlap_penalty = 0.9
//! "#).unwrap();
//!
//! assert_eq!(config.node_limit(), 1_000_000);
//! assert_eq!(config.time_limit(), Some(std::time::Duration::from_millis(2500)));
//! ```
//!
//! `GenerationRequest` describes one multi-lineup run: how many lineups,
//! how many players two of them may share and how often a single player
//! may appear.

use crate::error::GeneratorError;
use lineup_bnb::monitor::node_limit::DEFAULT_NODE_LIMIT;
use lineup_model::{error::ConfigLoadError, roster::InjuryPolicy};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Default wall-clock interval between progress log lines.
pub const DEFAULT_LOG_INTERVAL_MS: u64 = 1_000;

/// Default factor applied to a player's value density per accepted lineup
/// that already contains the player.
pub const DEFAULT_OVERLAP_PENALTY: f64 = 0.85;

/// Tolerance when turning an exposure fraction into a lineup count, so that
/// `0.3 * 10` counts as `3` and not `4`.
const EXPOSURE_EPSILON: f64 = 1e-9;

/// Search limits and diversity settings of a `LineupEngine`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    node_limit: u64,
    time_limit_ms: Option<u64>,
    log_interval_ms: u64,
    overlap_penalty: f64,
    injury_policy: InjuryPolicy,
    /// Contests a batch runs at once. `None` uses the available parallelism.
    batch_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            node_limit: DEFAULT_NODE_LIMIT,
            time_limit_ms: None,
            log_interval_ms: DEFAULT_LOG_INTERVAL_MS,
            overlap_penalty: DEFAULT_OVERLAP_PENALTY,
            injury_policy: InjuryPolicy::default(),
            batch_threads: None,
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a config from a TOML string and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the overlap penalty lies in `(0, 1]` and that a batch
    /// thread count, if set, is positive.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(self.overlap_penalty > 0.0 && self.overlap_penalty <= 1.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "overlap_penalty must be in (0, 1], got {}",
                self.overlap_penalty
            )));
        }
        if self.batch_threads == Some(0) {
            return Err(ConfigLoadError::Invalid(
                "batch_threads must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = limit;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    #[inline]
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit_ms = None;
        self
    }

    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log_interval_ms = interval.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    /// Sets the per-appearance density penalty.
    ///
    /// # Panics
    ///
    /// This function will panic if `penalty` is not in `(0, 1]`.
    #[inline]
    pub fn with_overlap_penalty(mut self, penalty: f64) -> Self {
        assert!(
            penalty > 0.0 && penalty <= 1.0,
            "called `EngineConfig::with_overlap_penalty` with {} outside (0, 1]",
            penalty
        );
        self.overlap_penalty = penalty;
        self
    }

    #[inline]
    pub fn with_injury_policy(mut self, policy: InjuryPolicy) -> Self {
        self.injury_policy = policy;
        self
    }

    /// Caps the number of contests a batch runs at once.
    ///
    /// # Panics
    ///
    /// This function will panic if `threads` is zero.
    #[inline]
    pub fn with_batch_threads(mut self, threads: usize) -> Self {
        assert!(
            threads > 0,
            "called `EngineConfig::with_batch_threads` with zero threads"
        );
        self.batch_threads = Some(threads);
        self
    }

    /// Node ceiling of a single solve.
    #[inline]
    pub fn node_limit(&self) -> u64 {
        self.node_limit
    }

    /// Wall-clock budget of one engine call.
    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    #[inline]
    pub fn log_interval(&self) -> Duration {
        Duration::from_millis(self.log_interval_ms)
    }

    #[inline]
    pub fn overlap_penalty(&self) -> f64 {
        self.overlap_penalty
    }

    #[inline]
    pub fn injury_policy(&self) -> InjuryPolicy {
        self.injury_policy
    }

    /// Number of worker threads for a batch of `jobs` contests: the
    /// configured count, or the available parallelism, never more than
    /// `jobs` and never less than one.
    pub fn batch_threads(&self, jobs: usize) -> usize {
        let threads = self.batch_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1)
        });
        threads.min(jobs).max(1)
    }
}

/// One multi-lineup run.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    num_lineups: usize,
    max_overlap: usize,
    #[serde(default = "default_max_exposure")]
    max_exposure: f64,
    #[serde(default)]
    initial_overlap: Option<usize>,
}

fn default_max_exposure() -> f64 {
    1.0
}

impl GenerationRequest {
    /// Creates a request with no exposure limit.
    pub fn new(num_lineups: usize, max_overlap: usize) -> Self {
        Self {
            num_lineups,
            max_overlap,
            max_exposure: default_max_exposure(),
            initial_overlap: None,
        }
    }

    #[inline]
    pub fn with_max_exposure(mut self, max_exposure: f64) -> Self {
        self.max_exposure = max_exposure;
        self
    }

    /// Starts the search at a stricter overlap limit that is relaxed
    /// towards `max_overlap` whenever a solve turns infeasible.
    #[inline]
    pub fn with_initial_overlap(mut self, initial_overlap: usize) -> Self {
        self.initial_overlap = Some(initial_overlap);
        self
    }

    /// Parses a request from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigLoadError> {
        Ok(toml::from_str(s)?)
    }

    #[inline]
    pub fn num_lineups(&self) -> usize {
        self.num_lineups
    }

    #[inline]
    pub fn max_overlap(&self) -> usize {
        self.max_overlap
    }

    #[inline]
    pub fn max_exposure(&self) -> f64 {
        self.max_exposure
    }

    /// Returns the overlap limit of the first solve.
    #[inline]
    pub fn initial_overlap(&self) -> usize {
        self.initial_overlap.unwrap_or(self.max_overlap)
    }

    /// Returns the maximum number of lineups any single player may appear
    /// in, `ceil(max_exposure * num_lineups)`.
    pub fn exposure_cap(&self) -> usize {
        let raw = self.max_exposure * self.num_lineups as f64;
        ((raw - EXPOSURE_EPSILON).ceil().max(1.0)) as usize
    }

    /// Rejects requests that cannot be run.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_lineups == 0 {
            return Err(GeneratorError::InvalidRequest(
                "num_lineups must be positive".to_string(),
            ));
        }

        if !(self.max_exposure > 0.0 && self.max_exposure <= 1.0) {
            return Err(GeneratorError::InvalidRequest(format!(
                "max_exposure must be in (0, 1], got {}",
                self.max_exposure
            )));
        }

        if let Some(initial) = self.initial_overlap {
            if initial > self.max_overlap {
                return Err(GeneratorError::InvalidRequest(format!(
                    "initial_overlap {} exceeds max_overlap {}",
                    initial, self.max_overlap
                )));
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GenerationRequest(lineups: {}, max_overlap: {}, max_exposure: {:.2})",
            self.num_lineups, self.max_overlap, self.max_exposure
        )
    }
}
