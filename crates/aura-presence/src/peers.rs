//! Known-peer registry and request origin validation.

use crate::wire::PresenceRequest;
use std::collections::BTreeSet;

/// Peers the local transport currently recognizes.
pub trait PeerRegistry {
    /// Name of the local node.
    fn local_name(&self) -> &str;

    /// Whether `name` is a currently attached remote.
    fn is_remote(&self, name: &str) -> bool;

    /// Whether `name` is the local node or an attached remote.
    fn is_known(&self, name: &str) -> bool {
        name == self.local_name() || self.is_remote(name)
    }
}

/// In-memory registry of attached remotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownPeers {
    local_name: String,
    remotes: BTreeSet<String>,
}

impl KnownPeers {
    /// Registry with no attached remotes.
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            remotes: BTreeSet::new(),
        }
    }

    /// Attach a remote. Returns false if it was already attached.
    pub fn attach(&mut self, name: impl Into<String>) -> bool {
        self.remotes.insert(name.into())
    }

    /// Detach a remote. Returns false if it was not attached.
    pub fn detach(&mut self, name: &str) -> bool {
        self.remotes.remove(name)
    }

    /// Builder-style [`attach`](Self::attach).
    pub fn with_remote(mut self, name: impl Into<String>) -> Self {
        self.attach(name);
        self
    }

    /// Attached remotes in name order.
    pub fn remotes(&self) -> impl Iterator<Item = &str> {
        self.remotes.iter().map(String::as_str)
    }
}

impl PeerRegistry for KnownPeers {
    fn local_name(&self) -> &str {
        &self.local_name
    }

    fn is_remote(&self, name: &str) -> bool {
        self.remotes.contains(name)
    }
}

/// Whether a request may be answered.
///
/// Only requests whose origin is the local node or an attached remote pass;
/// a request without an origin name never does.
pub fn validate<P>(request: &PresenceRequest, peers: &P) -> bool
where
    P: PeerRegistry + ?Sized,
{
    request
        .origin()
        .is_some_and(|origin| peers.is_known(origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{Route, RouteAddr};

    #[test]
    fn test_local_origin_is_accepted() {
        let peers = KnownPeers::new("manor");
        assert!(validate(&PresenceRequest::new("manor", "manor"), &peers));
    }

    #[test]
    fn test_attached_remote_is_accepted() {
        let peers = KnownPeers::new("manor").with_remote("minion1");
        assert!(validate(&PresenceRequest::new("minion1", "manor"), &peers));
    }

    #[test]
    fn test_unknown_origin_is_rejected() {
        let peers = KnownPeers::new("manor").with_remote("minion1");
        assert!(!validate(&PresenceRequest::new("unknown_name", "manor"), &peers));
    }

    #[test]
    fn test_detached_remote_is_rejected() {
        let mut peers = KnownPeers::new("manor").with_remote("minion1");
        assert!(peers.detach("minion1"));
        assert!(!validate(&PresenceRequest::new("minion1", "manor"), &peers));
    }

    #[test]
    fn test_missing_origin_is_rejected() {
        let peers = KnownPeers::new("manor");
        let request = PresenceRequest {
            route: Route {
                src: RouteAddr::default(),
                dst: RouteAddr::action("presence_req"),
            },
            data: None,
        };
        assert!(!validate(&request, &peers));
    }
}
