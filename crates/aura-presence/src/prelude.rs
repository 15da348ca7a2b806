//! Aura presence prelude.
//!
//! Curated re-exports for wiring presence resolution.

pub use crate::{
    ChannelSink, CycleReport, EventSink, KnownPeers, PeerAddress, PeerRegistry, PresenceConfig,
    PresenceError, PresenceEvent, PresenceRequest, PresenceResolver, PresenceResult,
    PresenceService, PresenceState, PresenceStore, PresenceView, RequestQueue,
    SharedPresenceStore, Snapshot,
};
