//! Presence wire format helpers.
//!
//! Requests arrive as loosely shaped records; [`PresenceRequest::from_json_value`]
//! decodes them once at the boundary and treats anything missing or ill-typed
//! as absent. Announcements serialize to
//!
//! ```text
//! { "route": { "src": [null, "<local>", null], "dst": [null, null, "event_fire"] },
//!   "tag": "presence/present",
//!   "data": { "<key>": { "<peer>": "<host-or-null>" } } }
//! ```

use crate::error::{PresenceError, PresenceResult};
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Action naming the presence request handler.
pub const PRESENCE_REQUEST_ACTION: &str = "presence_req";

/// Action naming the event broadcast handler.
pub const EVENT_BROADCAST_ACTION: &str = "event_fire";

/// Tag carried by every presence announcement.
pub const PRESENCE_EVENT_TAG: &str = "presence/present";

/// Addressing triple: (reserved, name, action).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAddr(pub Option<String>, pub Option<String>, pub Option<String>);

impl RouteAddr {
    /// Address naming a peer.
    pub fn named(name: impl Into<String>) -> Self {
        Self(None, Some(name.into()), None)
    }

    /// Address naming a handler action.
    pub fn action(action: impl Into<String>) -> Self {
        Self(None, None, Some(action.into()))
    }

    /// Peer name element.
    pub fn name(&self) -> Option<&str> {
        self.1.as_deref()
    }

    /// Action element.
    pub fn action_name(&self) -> Option<&str> {
        self.2.as_deref()
    }

    fn from_value(value: Option<&Value>) -> Self {
        let Some(items) = value.and_then(Value::as_array) else {
            return Self::default();
        };
        let part = |idx: usize| {
            items
                .get(idx)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self(part(0), part(1), part(2))
    }
}

/// Source and destination of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Origin of the message
    pub src: RouteAddr,
    /// Handler the message is addressed to
    pub dst: RouteAddr,
}

/// Optional request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    /// Requested category; `None` when absent or null
    #[serde(default)]
    pub state: Option<String>,
}

/// A pending presence query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRequest {
    /// Routing of the request
    #[serde(default)]
    pub route: Route,
    /// Payload; `None` when the request carried no data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RequestData>,
}

impl PresenceRequest {
    /// Request from `origin` addressed to the presence handler of `target`.
    pub fn new(origin: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            route: Route {
                src: RouteAddr::named(origin),
                dst: RouteAddr(
                    None,
                    Some(target.into()),
                    Some(PRESENCE_REQUEST_ACTION.to_string()),
                ),
            },
            data: None,
        }
    }

    /// Attach a data record with the given state.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.data = Some(RequestData {
            state: Some(state.into()),
        });
        self
    }

    /// Attach an explicit data record.
    pub fn with_data(mut self, data: RequestData) -> Self {
        self.data = Some(data);
        self
    }

    /// Name of the requesting peer.
    pub fn origin(&self) -> Option<&str> {
        self.route.src.name()
    }

    /// Decode a request from an arbitrary JSON value.
    ///
    /// Never fails: a non-object `data`, a non-string `state` and missing
    /// route elements all decode as absent.
    pub fn from_json_value(value: &Value) -> Self {
        let route = value.get("route");
        let data = value
            .get("data")
            .and_then(Value::as_object)
            .map(|obj| RequestData {
                state: obj.get("state").and_then(Value::as_str).map(str::to_string),
            });
        Self {
            route: Route {
                src: RouteAddr::from_value(route.and_then(|r| r.get("src"))),
                dst: RouteAddr::from_value(route.and_then(|r| r.get("dst"))),
            },
            data,
        }
    }

    /// Decode a request from JSON bytes. Fails only on invalid JSON.
    pub fn from_json_slice(bytes: &[u8]) -> PresenceResult<Self> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| PresenceError::decode(e.to_string()))?;
        Ok(Self::from_json_value(&value))
    }
}

/// Presence announcement emitted for an accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEvent {
    /// Routing of the announcement
    pub route: Route,
    /// Fixed announcement tag
    pub tag: String,
    /// Single entry: output key to snapshot
    pub data: BTreeMap<String, Snapshot>,
}

impl PresenceEvent {
    /// Announcement from `local_name` to the `action` broadcast handler.
    pub fn announcement(
        local_name: &str,
        action: &str,
        tag: &str,
        key: String,
        snapshot: Snapshot,
    ) -> Self {
        let mut data = BTreeMap::new();
        data.insert(key, snapshot);
        Self {
            route: Route {
                src: RouteAddr::named(local_name),
                dst: RouteAddr::action(action),
            },
            tag: tag.to_string(),
            data,
        }
    }

    /// Output key of the carried snapshot.
    pub fn key(&self) -> Option<&str> {
        self.data.keys().next().map(String::as_str)
    }

    /// Carried snapshot.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.data.values().next()
    }

    /// Serialize to a JSON value.
    pub fn to_json_value(&self) -> PresenceResult<Value> {
        serde_json::to_value(self).map_err(|e| PresenceError::encode(e.to_string()))
    }

    /// Serialize to JSON bytes.
    pub fn to_json_bytes(&self) -> PresenceResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| PresenceError::encode(e.to_string()))
    }
}
