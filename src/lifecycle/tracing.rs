//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber: compact format,
//! no module prefix (`with_target(false)`), filtered by `RUST_LOG` when it is
//! set and by [`BridgeConfig::log_filter`] otherwise.
//!
//! The libraries never install a subscriber themselves. In particular the C
//! ABI only emits events; a host process that wants them calls
//! [`setup_tracing`] (or installs its own subscriber) once at startup.
//!
//! ## What Gets Traced
//!
//! - **Handle lifetime**: `Allocated joint handle` / `Released joint handle`
//!   with the live count (debug), `Acquired` / `Released` with the token
//!   (info, actor side)
//! - **Boundary failures**: safe defaults returned and panics caught (debug/warn)
//! - **Client calls**: one span per [`JointClient`](crate::clients::JointClient) method
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! JOINT_BRIDGE_LOG=joint_ffi=debug,info cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Handle actor started resource="HostedJoint"
//! INFO Acquired resource="HostedJoint" token=#1 live=1
//! INFO Released resource="HostedJoint" token=#1 live=0
//! ```

use crate::config::BridgeConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls are no-ops.
///
/// Configuration warnings collected before logging was available are
/// emitted here.
pub fn setup_tracing(config: &BridgeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        for warning in &config.warnings {
            tracing::warn!(%warning, "Configuration fallback");
        }
    }
}
