//! Admission loop configuration.

use serde::{Deserialize, Serialize};

/// Default tick interval between admission rounds.
const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
/// Default simulated work duration bounds, inclusive.
const DEFAULT_WORK_MIN_MS: u64 = 1000;
const DEFAULT_WORK_MAX_MS: u64 = 10_000;

/// Configuration for the admission loop and its slot pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Maximum concurrent task slots.
    pub capacity: usize,
    /// Interval between admission ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Lower bound of the simulated work duration, in milliseconds.
    pub work_min_ms: u64,
    /// Upper bound (inclusive) of the simulated work duration, in
    /// milliseconds.
    pub work_max_ms: u64,
}

impl AdmissionConfig {
    /// Create a configuration for `capacity` slots with default timings.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            work_min_ms: DEFAULT_WORK_MIN_MS,
            work_max_ms: DEFAULT_WORK_MAX_MS,
        }
    }

    /// Override the tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Override the simulated work duration range (inclusive bounds). A
    /// zero-width range pins the duration for deterministic tests.
    #[must_use]
    pub fn with_work_duration(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.work_min_ms = min_ms;
        self.work_max_ms = max_ms;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when any value is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("capacity must be greater than 0".into());
        }
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be greater than 0".into());
        }
        if self.work_min_ms > self.work_max_ms {
            return Err("work_min_ms must not exceed work_max_ms".into());
        }
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation failure reason.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: AdmissionConfig =
            serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
