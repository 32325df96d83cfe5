//! # HostedResource Trait
//!
//! The contract a domain object implements to live inside a [`HandleActor`].
//! The actor owns every instance; callers only ever see a [`Token`].
//!
//! Construction and queries are synchronous and must not block: the actor
//! runs them under a panic guard, one message at a time. Releasing is the
//! only lifecycle hook and may be async.
//!
//! [`HandleActor`]: crate::HandleActor

use crate::token::Token;
use async_trait::async_trait;
use std::fmt::Debug;

#[async_trait]
pub trait HostedResource: Send + Sync + Sized + 'static {
    /// Parameters for constructing an instance.
    type Create: Send + Debug;

    /// Read-only request against one instance.
    type Query: Send + Debug;

    /// Answer to a [`HostedResource::Query`].
    type Reply: Send + Debug;

    /// One error type per resource, converted to
    /// [`ActorError::Resource`](crate::ActorError::Resource) at the boundary.
    type Error: std::error::Error + Send + Sync + 'static;

    fn create(params: Self::Create) -> Result<Self, Self::Error>;

    fn query(&self, query: Self::Query) -> Result<Self::Reply, Self::Error>;

    /// Called once, right before the instance is dropped by the actor.
    async fn on_release(&self, _token: Token) {}
}
