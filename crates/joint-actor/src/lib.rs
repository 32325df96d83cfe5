//! # Joint Actor
//!
//! The message-passing way to share a resource across a boundary. The
//! resource lives inside an actor task (Side B); callers (Side A) hold only a
//! [`Token`] and a cloneable [`HandleClient`], and every operation is a
//! message answered over a oneshot channel.
//!
//! Compared with a raw opaque pointer:
//!
//! - a stale or forged token is an [`ActorError::NotFound`], never undefined
//!   behavior;
//! - a panic inside the resource is caught by the actor and returned as
//!   [`ActorError::Panicked`];
//! - [`RemoteHandle`] releases its token exactly once, on `release()` or on
//!   drop.
//!
//! Blocking callers can drive clients through the lazily shared runtime in
//! [`runtime::SharedRuntime`].
//!
//! ## Modules
//!
//! - [`resource`]: the [`HostedResource`] trait a domain type implements
//! - [`actor`]: [`HandleActor`], the server loop owning every instance
//! - [`client`]: [`HandleClient`], the async caller interface
//! - [`owner`]: [`RemoteHandle`], the ownership wrapper
//! - [`mock`]: scripted clients for tests
//! - [`runtime`]: weak-checkout shared tokio runtime

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod owner;
pub mod resource;
pub mod runtime;
pub mod token;

pub use actor::HandleActor;
pub use client::HandleClient;
pub use error::ActorError;
pub use message::{HandleRequest, HandleStats, Response};
pub use owner::RemoteHandle;
pub use resource::HostedResource;
pub use runtime::SharedRuntime;
pub use token::Token;
