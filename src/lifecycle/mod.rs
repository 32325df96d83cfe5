//! Runtime orchestration and lifecycle management.
//!
//! - [`JointSystem`] starts the joint actor and shuts it down cleanly
//! - [`setup_tracing`] initializes logging from a [`BridgeConfig`](crate::config::BridgeConfig)

pub mod joint_system;
pub mod tracing;

pub use joint_system::*;
pub use tracing::*;
