//! Presence state categories and request state selection.

use crate::wire::RequestData;
use std::fmt;

/// Alias accepted for [`PresenceState::Available`].
pub const PRESENT_ALIAS: &str = "present";

/// Category a presence query asks about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PresenceState {
    /// Names marked responsive right now, with addresses where alive
    #[default]
    Available,
    /// Joined peers (answered from the allowed table)
    Joined,
    /// Peers that completed authorization
    Allowed,
    /// Peers passing liveness checks
    Alived,
    /// Peers recently reaped
    Reaped,
    /// A state string outside the known set, carried through verbatim
    Unrecognized(String),
}

impl PresenceState {
    /// Parse a raw state string. `"present"` is an alias for `available`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "available" | PRESENT_ALIAS => Self::Available,
            "joined" => Self::Joined,
            "allowed" => Self::Allowed,
            "alived" => Self::Alived,
            "reaped" => Self::Reaped,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Canonical category name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Joined => "joined",
            Self::Allowed => "allowed",
            Self::Alived => "alived",
            Self::Reaped => "reaped",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Key the snapshot is reported under in the announcement payload.
    ///
    /// `joined` is reported under `allowed`; `available` under `present`.
    pub fn output_key(&self) -> &str {
        match self {
            Self::Available => PRESENT_ALIAS,
            Self::Joined | Self::Allowed => "allowed",
            Self::Alived => "alived",
            Self::Reaped => "reaped",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether this is one of the known categories.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select the category a request asks about.
///
/// Missing data, a missing state and a null state all fall back to
/// `available`. Unknown strings pass through as
/// [`PresenceState::Unrecognized`].
pub fn select(data: Option<&RequestData>) -> PresenceState {
    match data.and_then(|d| d.state.as_deref()) {
        Some(raw) => PresenceState::parse(raw),
        None => PresenceState::Available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(state: Option<&str>) -> RequestData {
        RequestData {
            state: state.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_data_falls_back_to_available() {
        assert_eq!(select(None), PresenceState::Available);
    }

    #[test]
    fn test_missing_state_falls_back_to_available() {
        assert_eq!(select(Some(&data(None))), PresenceState::Available);
    }

    #[test]
    fn test_present_is_alias_for_available() {
        assert_eq!(select(Some(&data(Some("present")))), PresenceState::Available);
    }

    #[test]
    fn test_known_states_map_verbatim() {
        let cases = [
            ("available", PresenceState::Available),
            ("joined", PresenceState::Joined),
            ("allowed", PresenceState::Allowed),
            ("alived", PresenceState::Alived),
            ("reaped", PresenceState::Reaped),
        ];
        for (raw, expected) in cases {
            let selected = select(Some(&data(Some(raw))));
            assert_eq!(selected, expected);
            assert_eq!(selected.as_str(), raw);
        }
    }

    #[test]
    fn test_unknown_state_passes_through() {
        let selected = select(Some(&data(Some("departed"))));
        assert_eq!(selected, PresenceState::Unrecognized("departed".to_string()));
        assert!(!selected.is_recognized());
        assert_eq!(selected.output_key(), "departed");
    }

    #[test]
    fn test_output_keys() {
        assert_eq!(PresenceState::Available.output_key(), "present");
        assert_eq!(PresenceState::Joined.output_key(), "allowed");
        assert_eq!(PresenceState::Allowed.output_key(), "allowed");
        assert_eq!(PresenceState::Alived.output_key(), "alived");
        assert_eq!(PresenceState::Reaped.output_key(), "reaped");
    }

    #[test]
    fn test_state_matching_is_case_sensitive() {
        assert!(!PresenceState::parse("Available").is_recognized());
    }
}
