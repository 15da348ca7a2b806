//! Property tests for presence resolution
//!
//! - Alias correctness: missing, null and "present" states resolve to `present`
//! - Available merge: every available name appears, addresses come from aliveds
//! - Batch independence: N accepted requests give N announcements in order
//! - Idempotent reads: building twice from unchanged tables is identical

#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]

use aura_presence::prelude::*;
use aura_presence::{build, select, RequestData};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

const LOCAL: &str = "manor";

fn peer_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn host() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
}

fn table() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(peer_name(), host(), 0..8)
}

fn store_strategy() -> impl Strategy<Value = PresenceStore> {
    (
        table(),
        table(),
        table(),
        prop::collection::btree_set(peer_name(), 0..8),
    )
        .prop_map(|(alloweds, aliveds, reapeds, availables)| {
            let mut store = PresenceStore::new();
            for (name, host) in alloweds {
                store.allow(name, PeerAddress::new(host, 4510));
            }
            for (name, host) in aliveds {
                store.mark_alive(name, PeerAddress::new(host, 4510));
            }
            for (name, host) in reapeds {
                store.mark_reaped(name, PeerAddress::new(host, 4510));
            }
            for name in availables {
                store.mark_available(name);
            }
            store
        })
}

fn state_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("available".to_string())),
        Just(Some("present".to_string())),
        Just(Some("joined".to_string())),
        Just(Some("allowed".to_string())),
        Just(Some("alived".to_string())),
        Just(Some("reaped".to_string())),
    ]
}

proptest! {
    /// Property: absent, null and "present" all select `available` and
    /// report under `present`.
    #[test]
    fn fallback_states_resolve_to_present(
        store in store_strategy(),
        shape in 0u8..4,
    ) {
        let data = match shape {
            0 => None,
            1 => Some(RequestData { state: None }),
            2 => Some(RequestData { state: Some("present".into()) }),
            _ => Some(RequestData { state: Some("available".into()) }),
        };
        let state = select(data.as_ref());
        prop_assert_eq!(&state, &PresenceState::Available);

        let (key, _) = build(&state, &store);
        prop_assert_eq!(key, "present");
    }

    /// Property: the available snapshot covers exactly the available names,
    /// with hosts from aliveds where known.
    #[test]
    fn available_snapshot_merges_aliveds(store in store_strategy()) {
        let (_, snapshot) = build(&PresenceState::Available, &store);

        let names: BTreeSet<_> = snapshot.keys().cloned().collect();
        prop_assert_eq!(&names, store.availables());

        for (name, host) in &snapshot {
            let expected = store.aliveds().get(name).map(|a| a.host.clone());
            prop_assert_eq!(host, &expected);
        }
    }

    /// Property: table categories copy their table verbatim.
    #[test]
    fn table_snapshots_copy_tables(store in store_strategy()) {
        let hosts = |table: &aura_presence::PeerTable| -> Snapshot {
            table.iter().map(|(n, a)| (n.clone(), Some(a.host.clone()))).collect()
        };

        prop_assert_eq!(build(&PresenceState::Joined, &store).1, hosts(store.alloweds()));
        prop_assert_eq!(build(&PresenceState::Allowed, &store).1, hosts(store.alloweds()));
        prop_assert_eq!(build(&PresenceState::Alived, &store).1, hosts(store.aliveds()));
        prop_assert_eq!(build(&PresenceState::Reaped, &store).1, hosts(store.reapeds()));
    }

    /// Property: every accepted request yields its own announcement, in order.
    #[test]
    fn batch_yields_one_event_per_request(
        store in store_strategy(),
        states in prop::collection::vec(state_strategy(), 0..12),
    ) {
        let queue = RequestQueue::new();
        for state in &states {
            let request = PresenceRequest::new(LOCAL, LOCAL);
            let request = match state {
                Some(s) => request.with_state(s.clone()),
                None => request,
            };
            queue.push(request);
        }

        let resolver = PresenceResolver::default();
        let events = resolver.run_cycle(&queue, &store, &KnownPeers::new(LOCAL));

        prop_assert_eq!(events.len(), states.len());
        for (event, state) in events.iter().zip(&states) {
            let selected = select(
                state
                    .as_ref()
                    .map(|s| RequestData { state: Some(s.clone()) })
                    .as_ref(),
            );
            let (key, snapshot) = build(&selected, &store);
            prop_assert_eq!(event.key(), Some(key.as_str()));
            prop_assert_eq!(event.snapshot(), Some(&snapshot));
        }
        prop_assert!(queue.is_empty());
    }

    /// Property: building from unchanged tables is deterministic.
    #[test]
    fn snapshot_build_is_idempotent(
        store in store_strategy(),
        state in state_strategy(),
    ) {
        let before = store.clone();
        let selected = select(state.map(|s| RequestData { state: Some(s) }).as_ref());

        let first = build(&selected, &store);
        let second = build(&selected, &store);

        prop_assert_eq!(first, second);
        prop_assert_eq!(store, before);
    }
}
