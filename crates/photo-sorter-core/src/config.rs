use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do when a same-named file already sits in the target bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Replace the existing file
    #[default]
    Overwrite,

    /// Keep both files, suffixing the incoming one with " (n)"
    Rename,
}

/// What to do when a file has no readable capture date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingTimestampPolicy {
    /// Fail the whole grouping on the first unreadable file
    #[default]
    Abort,

    /// Record the file as skipped and keep going
    Skip,
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Configuration for a sorting run
#[derive(Debug, Clone)]
pub struct Config {
    /// How to treat name collisions inside a bucket
    pub collision_policy: CollisionPolicy,

    /// Whether a file without a capture date aborts grouping
    pub missing_timestamp: MissingTimestampPolicy,

    /// Whether to pick up files with extensions outside the supported list
    pub process_unsupported_formats: bool,

    /// Whether to draw a progress bar while moving files
    pub show_progress: bool,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::Overwrite,
            missing_timestamp: MissingTimestampPolicy::Abort,
            process_unsupported_formats: false,
            show_progress: false,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Reject combinations that cannot produce a sensible run
    pub fn validate(&self) -> Result<()> {
        if self.process_unsupported_formats
            && self.missing_timestamp == MissingTimestampPolicy::Abort
        {
            return Err(Error::Configuration(
                "processing unsupported formats requires skipping files without a capture date"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
