//! Block timestamps.
//!
//! Timestamps are fractional Unix epoch seconds (UTC), serialized as a JSON
//! float.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch, with sub-second precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const EPOCH: Self = Self(0.0);

    pub fn new(secs: f64) -> Self {
        Self(secs)
    }

    /// The current system time. A clock set before the epoch reads as the epoch.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Self(secs)
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }

    /// `self`, or `floor` if `self` is earlier. Keeps block timestamps
    /// non-decreasing when the wall clock steps backwards.
    pub fn at_least(self, floor: Timestamp) -> Self {
        if self.0 < floor.0 {
            floor
        } else {
            self
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
