//! Presence tables
//!
//! The presence store holds the four peer tables that liveness, authorization
//! and reaping logic maintain. Resolution only reads them, through the
//! [`PresenceView`] trait, so fixtures and shared stores plug in the same way.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Network address last recorded for a peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerAddress {
    /// Host (usually an IP literal)
    pub host: String,
    /// Port the peer's transport listens on
    pub port: u16,
}

impl PeerAddress {
    /// Create a new peer address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Name to address table.
pub type PeerTable = BTreeMap<String, PeerAddress>;

/// Read access to the presence tables.
pub trait PresenceView {
    /// Peers that completed authorization.
    fn alloweds(&self) -> &PeerTable;

    /// Peers currently passing liveness checks.
    fn aliveds(&self) -> &PeerTable;

    /// Peers recently removed for staleness.
    fn reapeds(&self) -> &PeerTable;

    /// Names marked responsive right now.
    fn availables(&self) -> &BTreeSet<String>;
}

/// In-memory presence tables.
///
/// An uninitialized table is an empty table; `Default` gives four empty
/// containers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceStore {
    #[serde(default)]
    alloweds: PeerTable,
    #[serde(default)]
    aliveds: PeerTable,
    #[serde(default)]
    reapeds: PeerTable,
    #[serde(default)]
    availables: BTreeSet<String>,
}

impl PresenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an authorized peer.
    pub fn allow(&mut self, name: impl Into<String>, address: PeerAddress) {
        self.alloweds.insert(name.into(), address);
    }

    /// Record a live peer.
    pub fn mark_alive(&mut self, name: impl Into<String>, address: PeerAddress) {
        self.aliveds.insert(name.into(), address);
    }

    /// Record a reaped peer.
    pub fn mark_reaped(&mut self, name: impl Into<String>, address: PeerAddress) {
        self.reapeds.insert(name.into(), address);
    }

    /// Mark a peer name as available.
    pub fn mark_available(&mut self, name: impl Into<String>) {
        self.availables.insert(name.into());
    }

    /// Forget an authorized peer.
    pub fn remove_allowed(&mut self, name: &str) -> Option<PeerAddress> {
        self.alloweds.remove(name)
    }

    /// Forget a live peer.
    pub fn remove_alive(&mut self, name: &str) -> Option<PeerAddress> {
        self.aliveds.remove(name)
    }

    /// Forget a reaped peer.
    pub fn remove_reaped(&mut self, name: &str) -> Option<PeerAddress> {
        self.reapeds.remove(name)
    }

    /// Clear a peer's availability mark.
    pub fn remove_available(&mut self, name: &str) -> bool {
        self.availables.remove(name)
    }

    /// Builder-style [`allow`](Self::allow).
    pub fn with_allowed(mut self, name: impl Into<String>, address: PeerAddress) -> Self {
        self.allow(name, address);
        self
    }

    /// Builder-style [`mark_alive`](Self::mark_alive).
    pub fn with_alive(mut self, name: impl Into<String>, address: PeerAddress) -> Self {
        self.mark_alive(name, address);
        self
    }

    /// Builder-style [`mark_reaped`](Self::mark_reaped).
    pub fn with_reaped(mut self, name: impl Into<String>, address: PeerAddress) -> Self {
        self.mark_reaped(name, address);
        self
    }

    /// Builder-style [`mark_available`](Self::mark_available).
    pub fn with_available(mut self, name: impl Into<String>) -> Self {
        self.mark_available(name);
        self
    }
}

impl PresenceView for PresenceStore {
    fn alloweds(&self) -> &PeerTable {
        &self.alloweds
    }

    fn aliveds(&self) -> &PeerTable {
        &self.aliveds
    }

    fn reapeds(&self) -> &PeerTable {
        &self.reapeds
    }

    fn availables(&self) -> &BTreeSet<String> {
        &self.availables
    }
}

/// Presence store shared between the collaborators that write it and the
/// resolver that reads it.
#[derive(Debug, Clone, Default)]
pub struct SharedPresenceStore {
    inner: Arc<RwLock<PresenceStore>>,
}

impl SharedPresenceStore {
    /// Wrap an existing store.
    pub fn new(store: PresenceStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Take a read guard; the guard implements [`PresenceView`] through deref.
    pub fn read(&self) -> RwLockReadGuard<'_, PresenceStore> {
        self.inner.read()
    }

    /// Take a write guard.
    pub fn write(&self) -> RwLockWriteGuard<'_, PresenceStore> {
        self.inner.write()
    }

    /// Apply a mutation under the write lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut PresenceStore) -> R) -> R {
        let mut store = self.inner.write();
        f(&mut store)
    }

    /// Copy the current tables out.
    pub fn snapshot(&self) -> PresenceStore {
        self.inner.read().clone()
    }
}
