//! Single-flight token refresh
//!
//! The first request to see a 401 becomes the leader and performs the
//! refresh; every request that fails while it is in flight waits in a FIFO
//! queue and receives the leader's outcome.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::errors::ApiError;

/// New access token or the error that ended the refresh
pub type RefreshOutcome = Result<String, ApiError>;

#[derive(Default)]
struct QueueState {
    in_flight: bool,
    waiters: VecDeque<oneshot::Sender<RefreshOutcome>>,
}

/// In-flight flag plus the callers parked behind it.
///
/// The lock is never held across an `.await`.
#[derive(Default)]
pub struct RefreshQueue {
    state: Mutex<QueueState>,
}

/// Role handed out by [`RefreshQueue::join`]
pub enum Ticket<'a> {
    /// Caller must perform the refresh and settle the guard
    Leader(LeaderGuard<'a>),
    /// Caller waits for the leader's outcome
    Follower(oneshot::Receiver<RefreshOutcome>),
}

impl RefreshQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-set on the in-flight flag.
    pub fn join(&self) -> Ticket<'_> {
        let mut state = self.state.lock();
        if state.in_flight {
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            Ticket::Follower(rx)
        } else {
            state.in_flight = true;
            Ticket::Leader(LeaderGuard { queue: self, settled: false })
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.lock().in_flight
    }

    /// Number of callers parked behind the current refresh
    pub fn waiting(&self) -> usize {
        self.state.lock().waiters.len()
    }

    fn drain(&self, outcome: &RefreshOutcome) -> usize {
        let waiters = {
            let mut state = self.state.lock();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };

        let count = waiters.len();
        for waiter in waiters {
            // A follower that gave up has dropped its receiver.
            let _ = waiter.send(outcome.clone());
        }
        count
    }
}

/// Leadership of one refresh. Dropping it unsettled (leader future
/// cancelled or panicked) releases the followers with
/// [`ApiError::Cancelled`].
pub struct LeaderGuard<'a> {
    queue: &'a RefreshQueue,
    settled: bool,
}

impl LeaderGuard<'_> {
    /// Release every queued caller, in arrival order, with `outcome`.
    /// Returns how many were waiting.
    pub fn settle(mut self, outcome: &RefreshOutcome) -> usize {
        self.settled = true;
        self.queue.drain(outcome)
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.queue.drain(&Err(ApiError::Cancelled));
        }
    }
}

/// Await the leader's outcome as a follower.
pub async fn wait(rx: oneshot::Receiver<RefreshOutcome>) -> RefreshOutcome {
    rx.await.unwrap_or(Err(ApiError::Cancelled))
}
