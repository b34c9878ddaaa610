//! Grid configuration.
//!
//! The configuration file is a JSON object with camelCase keys; any key that
//! is missing falls back to its default:
//! ```json
//! { "gridStart": "08:00", "gridEnd": "22:00", "stepMinutes": 60, "days": 7 }
//! ```

use crate::time::ClockTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_STORAGE_KEY: &str = "timetable_events_v1";
pub const MAX_DAYS: u8 = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("stepMinutes must be greater than zero")]
    ZeroStep,
    #[error("grid start {start} must be earlier than grid end {end}")]
    EmptyGrid { start: ClockTime, end: ClockTime },
    #[error("grid {start}-{end} has no room for a {step_minutes}-minute slot")]
    NoRows {
        start: ClockTime,
        end: ClockTime,
        step_minutes: u16,
    },
    #[error("days must be between 1 and 7 (got {0})")]
    InvalidDays(u8),
    #[error("storageKey must not be empty")]
    EmptyStorageKey,
    #[error("cannot read configuration: {0}")]
    Io(#[from] io::Error),
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimetableConfig {
    pub grid_start: ClockTime,
    pub grid_end: ClockTime,
    pub step_minutes: u16,
    pub days: u8,
    pub storage_key: String,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            grid_start: ClockTime::from_minutes(8 * 60).unwrap_or(ClockTime::MIDNIGHT),
            grid_end: ClockTime::from_minutes(22 * 60).unwrap_or(ClockTime::MIDNIGHT),
            step_minutes: 60,
            days: MAX_DAYS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl TimetableConfig {
    pub fn new(grid_start: ClockTime, grid_end: ClockTime, step_minutes: u16) -> Self {
        Self {
            grid_start,
            grid_end,
            step_minutes,
            ..Self::default()
        }
    }

    pub fn with_days(mut self, days: u8) -> Self {
        self.days = days;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_minutes == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.grid_start >= self.grid_end {
            return Err(ConfigError::EmptyGrid {
                start: self.grid_start,
                end: self.grid_end,
            });
        }
        if self.grid_start.minutes_until(self.grid_end) < i32::from(self.step_minutes) {
            return Err(ConfigError::NoRows {
                start: self.grid_start,
                end: self.grid_end,
                step_minutes: self.step_minutes,
            });
        }
        if !(1..=MAX_DAYS).contains(&self.days) {
            return Err(ConfigError::InvalidDays(self.days));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if !self.is_aligned() {
            warn!(
                grid_start = %self.grid_start,
                grid_end = %self.grid_end,
                step_minutes = self.step_minutes,
                "grid span is not a multiple of the step; the trailing partial slot is not rendered"
            );
        }
        Ok(())
    }

    /// True when `grid_end` is reachable from `grid_start` in whole steps.
    pub fn is_aligned(&self) -> bool {
        self.step_minutes != 0
            && self.grid_start.minutes_until(self.grid_end) % i32::from(self.step_minutes) == 0
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading timetable configuration from: {}", path.display());
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
