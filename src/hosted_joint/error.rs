//! Error types for the joint actor.

use joint_actor::ActorError;
use thiserror::Error;

/// Errors that can occur during joint operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum JointError {
    /// The token does not name a live joint.
    #[error("Joint not found: {0}")]
    NotFound(String),

    /// The joint refused the request (invalid configuration or variables).
    #[error("Joint rejected request: {0}")]
    Rejected(String),

    /// The joint panicked while answering; the actor survived.
    #[error("Joint panicked: {0}")]
    Panicked(String),

    /// The actor answered with a reply of the wrong kind.
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<ActorError> for JointError {
    fn from(error: ActorError) -> Self {
        match error {
            ActorError::NotFound(token) => JointError::NotFound(token.to_string()),
            ActorError::Resource(e) => JointError::Rejected(e.to_string()),
            ActorError::Panicked(message) => JointError::Panicked(message),
            other => JointError::ActorCommunicationError(other.to_string()),
        }
    }
}
