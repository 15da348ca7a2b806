//! Presence resolver
//!
//! Drains the request queue once per cycle, gates each request on its origin,
//! selects the queried state and answers with an announcement routed from
//! the configured local node.

use crate::config::PresenceConfig;
use crate::peers::{self, PeerRegistry};
use crate::queue::RequestQueue;
use crate::sink::EventSink;
use crate::snapshot;
use crate::state::{self, PresenceState};
use crate::store::PresenceView;
use crate::wire::{PresenceEvent, PresenceRequest};

/// Outcome of one scheduling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Requests taken off the queue
    pub drained: usize,
    /// Announcements accepted by the sink
    pub emitted: usize,
    /// Requests answered with no announcement
    pub dropped: usize,
    /// Announcements the sink refused
    pub failed: usize,
}

impl std::ops::AddAssign for CycleReport {
    fn add_assign(&mut self, other: Self) {
        self.drained += other.drained;
        self.emitted += other.emitted;
        self.dropped += other.dropped;
        self.failed += other.failed;
    }
}

/// Resolves presence queries into announcements.
///
/// Each cycle drains every pending request and answers them in queue order.
/// Requests from unknown origins are dropped without an announcement; every
/// other request produces exactly one, with no coalescing across requests.
#[derive(Debug, Clone, Default)]
pub struct PresenceResolver {
    config: PresenceConfig,
}

impl PresenceResolver {
    /// Resolver for `config`. Announcements are routed from
    /// `config.local_name`.
    pub fn new(config: PresenceConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &PresenceConfig {
        &self.config
    }

    /// Answer a single request, or `None` when it must be dropped.
    pub fn resolve<V, P>(
        &self,
        request: &PresenceRequest,
        store: &V,
        peers: &P,
    ) -> Option<PresenceEvent>
    where
        V: PresenceView + ?Sized,
        P: PeerRegistry + ?Sized,
    {
        if !peers::validate(request, peers) {
            return None;
        }

        let state = state::select(request.data.as_ref());
        if let PresenceState::Unrecognized(raw) = &state {
            tracing::warn!(
                state = %raw,
                origin = ?request.origin(),
                rejected = self.config.reject_unrecognized_states,
                "Unrecognized presence state requested"
            );
            if self.config.reject_unrecognized_states {
                return None;
            }
        }

        let (key, snapshot) = snapshot::build(&state, store);
        Some(PresenceEvent::announcement(
            &self.config.local_name,
            &self.config.broadcast_action,
            &self.config.event_tag,
            key,
            snapshot,
        ))
    }

    /// Drain the queue and return the announcements in queue order.
    pub fn run_cycle<V, P>(&self, queue: &RequestQueue, store: &V, peers: &P) -> Vec<PresenceEvent>
    where
        V: PresenceView + ?Sized,
        P: PeerRegistry + ?Sized,
    {
        let mut events = Vec::new();
        self.run_cycle_into(queue, store, peers, &mut events);
        events
    }

    /// Drain the queue and publish each announcement to `sink`.
    ///
    /// A sink failure is counted and logged; the rest of the batch is still
    /// processed.
    pub fn run_cycle_into<V, P, S>(
        &self,
        queue: &RequestQueue,
        store: &V,
        peers: &P,
        sink: &mut S,
    ) -> CycleReport
    where
        V: PresenceView + ?Sized,
        P: PeerRegistry + ?Sized,
        S: EventSink + ?Sized,
    {
        let batch = queue.drain_all();
        let mut report = CycleReport {
            drained: batch.len(),
            ..CycleReport::default()
        };

        for request in &batch {
            let Some(event) = self.resolve(request, store, peers) else {
                report.dropped += 1;
                continue;
            };
            match sink.publish(event) {
                Ok(()) => report.emitted += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to publish presence announcement");
                    report.failed += 1;
                }
            }
        }

        if report.drained > 0 {
            tracing::debug!(
                drained = report.drained,
                emitted = report.emitted,
                dropped = report.dropped,
                failed = report.failed,
                "Presence cycle complete"
            );
        }
        report
    }
}
