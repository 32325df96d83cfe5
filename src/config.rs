//! # Bridge Configuration
//!
//! Runtime knobs for the message-passing side. Values come from
//! [`BridgeConfig::default`], can be overridden from the environment with
//! [`BridgeConfig::from_env`], or deserialized from any serde format.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `JOINT_BRIDGE_ACTOR_BUFFER` | `actor_buffer` | `32` |
//! | `JOINT_BRIDGE_LOG` | `log_filter` | `info` |
//!
//! A malformed value keeps the default and is recorded in
//! [`BridgeConfig::warnings`] so the caller can log it once tracing is up.

use serde::{Deserialize, Serialize};

pub const ACTOR_BUFFER_VAR: &str = "JOINT_BRIDGE_ACTOR_BUFFER";
pub const LOG_FILTER_VAR: &str = "JOINT_BRIDGE_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Capacity of the joint actor's request channel. Must be non-zero.
    pub actor_buffer: usize,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub log_filter: String,
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            actor_buffer: 32,
            log_filter: "info".to_string(),
            warnings: Vec::new(),
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ACTOR_BUFFER_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(buffer) if buffer > 0 => config.actor_buffer = buffer,
                _ => config.warnings.push(format!(
                    "{ACTOR_BUFFER_VAR}={raw:?} is not a positive integer, using {}",
                    config.actor_buffer
                )),
            }
        }

        if let Some(raw) = lookup(LOG_FILTER_VAR) {
            let filter = raw.trim();
            if filter.is_empty() {
                config
                    .warnings
                    .push(format!("{LOG_FILTER_VAR} is empty, using {:?}", config.log_filter));
            } else {
                config.log_filter = filter.to_string();
            }
        }

        config
    }
}
