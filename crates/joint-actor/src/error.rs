//! # Actor Errors
//!
//! Failures a message-passing boundary call can report to its caller.

use crate::token::Token;

#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    #[error("Actor closed")]
    Closed,
    #[error("Actor dropped response channel")]
    Dropped,
    #[error("Unknown handle token: {0}")]
    NotFound(Token),
    #[error("Handle already released")]
    Released,
    #[error("Resource error: {0}")]
    Resource(Box<dyn std::error::Error + Send + Sync>),
    #[error("Panic inside hosted resource: {0}")]
    Panicked(String),
    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
