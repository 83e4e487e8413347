use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::foundation::error::{FramecraftError, FramecraftResult};

/// Cloneable cancellation flag with an optional deadline.
///
/// Long-running loops poll it between iterations, never mid-frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also reports cancellation once `timeout` has elapsed.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Same flag, with the deadline tightened to at most `timeout` from now.
    pub fn with_deadline(mut self, timeout: Duration) -> Self {
        if let Some(at) = Instant::now().checked_add(timeout) {
            self.deadline = Some(self.deadline.map_or(at, |d| d.min(at)));
        }
        self
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn check(&self) -> FramecraftResult<()> {
        if self.is_cancelled() {
            return Err(FramecraftError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compress/cancel.rs"]
mod tests;
