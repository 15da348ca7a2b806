//! Pending presence request queue.

use crate::wire::PresenceRequest;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// FIFO of pending requests.
///
/// Clones share the same queue, so any number of producers can push while
/// the resolver drains. A drain takes everything queued at that instant in
/// one step.
#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    pending: Arc<Mutex<VecDeque<PresenceRequest>>>,
}

impl RequestQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request.
    pub fn push(&self, request: PresenceRequest) {
        self.pending.lock().push_back(request);
    }

    /// Append several requests, keeping their order.
    pub fn extend(&self, requests: impl IntoIterator<Item = PresenceRequest>) {
        self.pending.lock().extend(requests);
    }

    /// Take every pending request, leaving the queue empty.
    pub fn drain_all(&self) -> VecDeque<PresenceRequest> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether no requests are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
