//! Presence runtime configuration.

use crate::error::{PresenceError, PresenceResult};
use crate::wire::{EVENT_BROADCAST_ACTION, PRESENCE_EVENT_TAG};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "AURA_PRESENCE_";

/// Runtime configuration for presence resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Name of the local node; announcements originate here
    pub local_name: String,
    /// Tag carried by every announcement
    pub event_tag: String,
    /// Action announcements are routed to
    pub broadcast_action: String,
    /// Drop requests for unrecognized states instead of answering them
    pub reject_unrecognized_states: bool,
    /// Scheduling period of the service loop in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            local_name: "manor".to_string(),
            event_tag: PRESENCE_EVENT_TAG.to_string(),
            broadcast_action: EVENT_BROADCAST_ACTION.to_string(),
            reject_unrecognized_states: false,
            tick_interval_ms: 100,
        }
    }
}

impl PresenceConfig {
    /// Defaults with a different local name.
    pub fn with_local_name(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a `.toml` or `.json` file.
    pub fn load_from_file(path: &Path) -> PresenceResult<Self> {
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| PresenceError::config(format!("Invalid TOML: {e}"))),
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| PresenceError::config(format!("Invalid JSON: {e}"))),
            _ => Err(PresenceError::config(format!(
                "Unsupported config file format: {}",
                path.display()
            ))),
        }
    }

    /// Apply `AURA_PRESENCE_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> PresenceResult<()> {
        self.merge_with_env_from(std::env::vars())
    }

    /// Apply `AURA_PRESENCE_*` overrides from the given variables.
    pub fn merge_with_env_from<I, K, V>(&mut self, vars: I) -> PresenceResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(field) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.into();
            match field {
                "LOCAL_NAME" => self.local_name = value,
                "EVENT_TAG" => self.event_tag = value,
                "BROADCAST_ACTION" => self.broadcast_action = value,
                "REJECT_UNRECOGNIZED_STATES" => {
                    self.reject_unrecognized_states = value.parse().map_err(|_| {
                        PresenceError::config(format!(
                            "Invalid boolean in {ENV_PREFIX}REJECT_UNRECOGNIZED_STATES: {value}"
                        ))
                    })?;
                }
                "TICK_INTERVAL_MS" => {
                    self.tick_interval_ms = value.parse().map_err(|_| {
                        PresenceError::config(format!(
                            "Invalid interval in {ENV_PREFIX}TICK_INTERVAL_MS: {value}"
                        ))
                    })?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> PresenceResult<()> {
        if self.local_name.trim().is_empty() {
            return Err(PresenceError::config("local_name must not be empty"));
        }
        if self.event_tag.is_empty() {
            return Err(PresenceError::config("event_tag must not be empty"));
        }
        if self.broadcast_action.is_empty() {
            return Err(PresenceError::config("broadcast_action must not be empty"));
        }
        if self.tick_interval_ms == 0 {
            return Err(PresenceError::config("tick_interval_ms must be positive"));
        }
        Ok(())
    }

    /// Scheduling period of the service loop.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
