//! Snapshot construction from presence tables.

use crate::state::PresenceState;
use crate::store::{PeerTable, PresenceView};
use std::collections::BTreeMap;

/// Point-in-time mapping from peer name to host, or `None` when the host is
/// unknown.
pub type Snapshot = BTreeMap<String, Option<String>>;

/// Build the snapshot answering `state` from the current tables.
///
/// Returns the output key together with the snapshot. The store is only read;
/// calling this twice against unchanged tables gives identical results.
pub fn build<V>(state: &PresenceState, store: &V) -> (String, Snapshot)
where
    V: PresenceView + ?Sized,
{
    let snapshot = match state {
        PresenceState::Available => available_snapshot(store),
        PresenceState::Joined | PresenceState::Allowed => table_snapshot(store.alloweds()),
        PresenceState::Alived => table_snapshot(store.aliveds()),
        PresenceState::Reaped => table_snapshot(store.reapeds()),
        PresenceState::Unrecognized(_) => Snapshot::new(),
    };
    (state.output_key().to_string(), snapshot)
}

// Every available name is reported, even without a live address.
fn available_snapshot<V>(store: &V) -> Snapshot
where
    V: PresenceView + ?Sized,
{
    let aliveds = store.aliveds();
    store
        .availables()
        .iter()
        .map(|name| {
            let host = aliveds.get(name).map(|addr| addr.host.clone());
            (name.clone(), host)
        })
        .collect()
}

fn table_snapshot(table: &PeerTable) -> Snapshot {
    table
        .iter()
        .map(|(name, addr)| (name.clone(), Some(addr.host.clone())))
        .collect()
}
