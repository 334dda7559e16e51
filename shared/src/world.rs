use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldVersion {
    pub sha: String,
    pub date: String,
}

/// World status as the API serves it. `remaining_seconds` is authoritative at
/// the instant the response was produced; the client extrapolates from there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldStatus {
    #[serde(default)]
    pub url: String,
    pub now: u64,
    pub remaining_seconds: f64,
    #[serde(default)]
    pub version: Option<WorldVersion>,
}

impl WorldStatus {
    /// Abbreviated build identifier for the footer display.
    pub fn short_sha(&self) -> Option<&str> {
        self.version
            .as_ref()
            .map(|version| &version.sha[..version.sha.len().min(7)])
    }
}

/// Client-side countdown to the next world tick.
///
/// Holds the wall-clock instant the status was fetched; every read
/// extrapolates from that reference instead of trusting local timers to fire
/// on schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct TickClock {
    pub tick: u64,
    reference: DateTime<Utc>,
    remaining_at_reference: f64,
}

impl TickClock {
    pub fn start(status: &WorldStatus, reference: DateTime<Utc>) -> Self {
        Self {
            tick: status.now,
            reference,
            remaining_at_reference: status.remaining_seconds,
        }
    }

    /// Seconds until the next tick, rounded up. Negative once the tick has
    /// passed, which is the caller's cue to reload the world.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - self.reference).num_milliseconds() as f64 / 1000.0;
        (self.remaining_at_reference - elapsed).ceil() as i64
    }

    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        self.remaining_at(now) < 0
    }
}

/// Coarsening countdown label: seconds up close, minutes within the hour,
/// hours beyond.
pub fn format_remaining(seconds: i64) -> String {
    if seconds <= 60 {
        format!("{seconds} seconds")
    } else if seconds <= 60 * 60 {
        format!("{} minutes", seconds / 60)
    } else {
        format!("{} hours", seconds / (60 * 60))
    }
}
