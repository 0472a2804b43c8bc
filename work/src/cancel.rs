//! Cooperative cancellation for long-running proof searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::WorkError;

/// Shared stop flag plus an optional deadline.
///
/// Clones share the flag, so cancelling any clone stops every search that
/// holds one. [`CancelToken::with_timeout`] derives a token that shares the
/// flag but carries its own deadline.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token sharing this one's flag that also expires after `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(&self, deadline: Instant) -> Self {
        Self {
            flag: Arc::clone(&self.flag),
            deadline: Some(deadline),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `Err` once the token has been cancelled or its deadline has passed.
    pub fn check(&self) -> Result<(), WorkError> {
        if self.is_cancelled() {
            return Err(WorkError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(WorkError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
