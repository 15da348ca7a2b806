//! Presence service driver
//!
//! Bundles the request queue, the shared presence tables, the peer registry,
//! the resolver and an event sink. [`PresenceService::tick`] runs one
//! synchronous cycle; [`PresenceService::run`] drives cycles from a tokio
//! interval until shutdown is signalled.

use crate::config::PresenceConfig;
use crate::error::{PresenceError, PresenceResult};
use crate::peers::{KnownPeers, PeerRegistry};
use crate::queue::RequestQueue;
use crate::resolver::{CycleReport, PresenceResolver};
use crate::sink::EventSink;
use crate::store::SharedPresenceStore;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Tick-driven presence resolution service.
pub struct PresenceService<P, S> {
    resolver: PresenceResolver,
    queue: RequestQueue,
    store: SharedPresenceStore,
    peers: P,
    sink: S,
}

impl<S: EventSink> PresenceService<KnownPeers, S> {
    /// Service for a validated configuration, with an empty peer registry
    /// named after `config.local_name`.
    pub fn from_config(config: PresenceConfig, sink: S) -> PresenceResult<Self> {
        config.validate()?;
        let peers = KnownPeers::new(config.local_name.clone());
        Self::new(PresenceResolver::new(config), peers, sink)
    }
}

impl<P, S> PresenceService<P, S>
where
    P: PeerRegistry,
    S: EventSink,
{
    /// Service over an existing registry.
    ///
    /// Fails with a config error when the registry's local name differs from
    /// the resolver's `local_name`.
    pub fn new(resolver: PresenceResolver, peers: P, sink: S) -> PresenceResult<Self> {
        let configured = &resolver.config().local_name;
        if peers.local_name() != configured {
            return Err(PresenceError::config(format!(
                "peer registry local name '{}' does not match configured local name '{}'",
                peers.local_name(),
                configured
            )));
        }
        Ok(Self {
            resolver,
            queue: RequestQueue::new(),
            store: SharedPresenceStore::default(),
            peers,
            sink,
        })
    }

    /// Use an existing shared store instead of a fresh one.
    pub fn with_store(mut self, store: SharedPresenceStore) -> Self {
        self.store = store;
        self
    }

    /// Use an existing request queue instead of a fresh one.
    pub fn with_queue(mut self, queue: RequestQueue) -> Self {
        self.queue = queue;
        self
    }

    /// Producer handle for the request queue.
    pub fn queue(&self) -> RequestQueue {
        self.queue.clone()
    }

    /// Shared handle to the presence tables.
    pub fn store(&self) -> SharedPresenceStore {
        self.store.clone()
    }

    /// Peer registry used for origin gating.
    pub fn peers(&self) -> &P {
        &self.peers
    }

    /// Mutable registry, for attaching and detaching remotes.
    pub fn peers_mut(&mut self) -> &mut P {
        &mut self.peers
    }

    /// Event sink announcements are published to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one scheduling cycle.
    pub fn tick(&mut self) -> CycleReport {
        let store = self.store.read();
        self.resolver
            .run_cycle_into(&self.queue, &*store, &self.peers, &mut self.sink)
    }

    /// Run cycles on the configured interval until `shutdown` becomes true
    /// or its sender is dropped. Returns the totals across all cycles.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> CycleReport {
        let mut interval = tokio::time::interval(self.resolver.config().tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut totals = CycleReport::default();

        tracing::info!(
            local = %self.peers.local_name(),
            interval_ms = self.resolver.config().tick_interval_ms,
            "Presence service started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = interval.tick() => {
                    totals += self.tick();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!(
            drained = totals.drained,
            emitted = totals.emitted,
            dropped = totals.dropped,
            "Presence service stopped"
        );
        totals
    }
}
