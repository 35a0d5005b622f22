//! Single-flight refresh gate.
//!
//! DESIGN
//! ======
//! The first request to see a session-expiry 401 becomes the leader and
//! holds a [`RefreshLease`]; every request that fails while the lease is out
//! parks on a oneshot receiver in arrival order. Settling the lease clears
//! the flag and releases the queue with the refresh outcome.
//!
//! The flag and queue sit behind one `std::sync::Mutex` whose critical
//! sections never await, so check-then-set is atomic.

use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

use super::types::ApiError;

type Waiter = oneshot::Sender<Result<(), ApiError>>;

#[derive(Default)]
struct RefreshState {
    is_refreshing: bool,
    queue: Vec<Waiter>,
}

/// Outcome of trying to start a refresh.
pub enum Entry<'a> {
    /// No refresh was running; the caller must perform it and settle the lease.
    Leader(RefreshLease<'a>),
    /// A refresh is in flight; await the receiver for its outcome.
    Queued(oneshot::Receiver<Result<(), ApiError>>),
}

#[derive(Default)]
pub struct RefreshGate {
    state: Mutex<RefreshState>,
}

impl RefreshGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Become the refresh leader, or join the queue behind the current one.
    pub fn enter(&self) -> Entry<'_> {
        let mut state = self.lock();
        if state.is_refreshing {
            let (tx, rx) = oneshot::channel();
            state.queue.push(tx);
            Entry::Queued(rx)
        } else {
            state.is_refreshing = true;
            Entry::Leader(RefreshLease { gate: self, settled: false })
        }
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.lock().is_refreshing
    }

    #[must_use]
    pub fn queued(&self) -> usize {
        self.lock().queue.len()
    }

    fn release(&self, outcome: &Result<(), ApiError>) {
        let waiters = {
            let mut state = self.lock();
            state.is_refreshing = false;
            std::mem::take(&mut state.queue)
        };
        tracing::debug!(waiters = waiters.len(), ok = outcome.is_ok(), "releasing queued requests");
        for waiter in waiters {
            // A dropped receiver means its caller went away; nothing to deliver.
            let _ = waiter.send(outcome.clone());
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof of refresh leadership. Dropping it unsettled releases the queue
/// with [`ApiError::RefreshAbandoned`] so waiters never hang.
pub struct RefreshLease<'a> {
    gate: &'a RefreshGate,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Clear the in-flight flag and hand `outcome` to every queued request.
    pub fn settle(mut self, outcome: &Result<(), ApiError>) {
        self.settled = true;
        self.gate.release(outcome);
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.gate.release(&Err(ApiError::RefreshAbandoned));
        }
    }
}
