#![deny(clippy::dbg_macro)]
#![deny(clippy::todo)]
//! # Aura Presence - Presence Query Resolution
//!
//! Answers presence queries about tracked fleet peers from in-memory tables
//! and turns each answer into a routed announcement:
//! - Request origin validation against the peers the transport knows
//! - State selection with fallback and alias rules
//! - Snapshot construction from the allowed, alive, reaped and available tables
//! - Batch resolution of the pending request queue once per scheduling cycle
//!
//! ## Design Principles
//!
//! - **Read-Only Tables**: Liveness, authorization and reaping logic own the
//!   tables; resolution only reads them through [`PresenceView`]
//! - **No Coalescing**: Every accepted request gets its own announcement, in
//!   queue order
//! - **Silent Drops**: Requests from unknown origins get no reply at all
//! - **Sink Seam**: Announcements go to an [`EventSink`], never straight to a
//!   transport
//!
//! ## Example
//!
//! ```ignore
//! use aura_presence::prelude::*;
//!
//! let store = PresenceStore::new()
//!     .with_available("alpha")
//!     .with_alive("alpha", PeerAddress::new("1.1.1.1", 4510));
//! let peers = KnownPeers::new("manor");
//! let queue = RequestQueue::new();
//! queue.push(PresenceRequest::new("manor", "manor").with_state("available"));
//!
//! let events = PresenceResolver::default().run_cycle(&queue, &store, &peers);
//! assert_eq!(events[0].key(), Some("present"));
//! ```

pub mod config;
pub mod error;
pub mod peers;
pub mod prelude;
pub mod queue;
pub mod resolver;
pub mod service;
pub mod sink;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod wire;

pub use config::PresenceConfig;
pub use error::{PresenceError, PresenceResult};
pub use peers::{validate, KnownPeers, PeerRegistry};
pub use queue::RequestQueue;
pub use resolver::{CycleReport, PresenceResolver};
pub use service::PresenceService;
pub use sink::{ChannelSink, EventSink};
pub use snapshot::{build, Snapshot};
pub use state::{select, PresenceState};
pub use store::{PeerAddress, PeerTable, PresenceStore, PresenceView, SharedPresenceStore};
pub use wire::{
    PresenceEvent, PresenceRequest, RequestData, Route, RouteAddr, EVENT_BROADCAST_ACTION,
    PRESENCE_EVENT_TAG, PRESENCE_REQUEST_ACTION,
};
