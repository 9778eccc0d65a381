//! Simulated server latency.
//!
//! The catalog server waits on a [`Delay`] before answering every lookup.
//! Production wiring uses [`FixedDelay`]; tests use [`NoDelay`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{CatalogError, Result};

/// Longest single sleep between cancellation checks.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Latency strategy applied before each server lookup.
pub trait Delay: Send + Sync {
    /// Blocks for the simulated latency.
    ///
    /// Returns `DELAY_INTERRUPTED` if the wait was cancelled early.
    fn wait(&self) -> Result<()>;
}

/// Shared flag used to cancel in-flight delays.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to every delay holding a clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Blocking delay of a fixed duration, optionally cancellable.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    duration: Duration,
    cancel: Option<CancelToken>,
}

impl FixedDelay {
    /// Creates a delay that always runs to completion.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            cancel: None,
        }
    }

    /// Creates a delay of `millis` milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Attaches a cancel token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns the configured duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Delay for FixedDelay {
    fn wait(&self) -> Result<()> {
        let Some(token) = &self.cancel else {
            thread::sleep(self.duration);
            return Ok(());
        };

        let start = Instant::now();
        loop {
            if token.is_cancelled() {
                return Err(CatalogError::delay_interrupted(start.elapsed().as_millis()));
            }
            let remaining = self.duration.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Ok(());
            }
            thread::sleep(remaining.min(POLL_INTERVAL));
        }
    }
}

/// Delay that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn wait(&self) -> Result<()> {
        Ok(())
    }
}
