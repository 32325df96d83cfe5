//! Joint-specific resource logic for the message-passing style.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::clients::JointClient;
use crate::config::BridgeConfig;
use joint_actor::HandleActor;

/// Creates a new joint actor and its client.
pub fn new(config: &BridgeConfig) -> (HandleActor<HostedJoint>, JointClient) {
    let (actor, generic_client) = HandleActor::new(config.actor_buffer.max(1));
    (actor, JointClient::new(generic_client))
}
