//! Per-call cancellation and deadline.
//!
//! A `Context` is passed to every API call. The transport reads the time
//! left before dispatch and uses it as the exchange timeout. Cancelling
//! through a [`CancelHandle`] also stops an exchange in flight when the
//! agent came from [`crate::cancellable_agent`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// A context without a deadline. It can still be cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancelled: Arc::default(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::default(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// A handle that cancels this context and every clone of it.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Time left for the exchange. `None` means unbounded. Custom
    /// transports call this before any I/O.
    pub fn remaining(&self) -> Result<Option<Duration>> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match self.deadline {
            None => Ok(None),
            Some(deadline) => {
                let left = deadline.saturating_duration_since(Instant::now());
                if left.is_zero() {
                    Err(Error::DeadlineExceeded)
                } else {
                    Ok(Some(left))
                }
            }
        }
    }

    /// Applies a client-wide default timeout when no deadline was given.
    pub(crate) fn or_timeout(&self, timeout: Option<Duration>) -> Context {
        match (self.deadline, timeout) {
            (None, Some(timeout)) => Context {
                deadline: Instant::now().checked_add(timeout),
                cancelled: Arc::clone(&self.cancelled),
            },
            _ => self.clone(),
        }
    }
}

/// Cancels the `Context` it was taken from.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
