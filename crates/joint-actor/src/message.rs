//! # Handle Messages
//!
//! Requests sent from a [`HandleClient`](crate::HandleClient) to a
//! [`HandleActor`](crate::HandleActor). Each carries a oneshot sender for the
//! reply, except a detached release, which nobody waits on.

use crate::error::ActorError;
use crate::resource::HostedResource;
use crate::token::Token;
use tokio::sync::oneshot;

pub type Response<T> = oneshot::Sender<Result<T, ActorError>>;

/// Counters reported by [`HandleRequest::Stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandleStats {
    /// Resources currently hosted.
    pub live: usize,
    pub acquired: u64,
    pub released: u64,
}

pub enum HandleRequest<T: HostedResource> {
    Acquire {
        params: T::Create,
        respond_to: Response<Token>,
    },
    Query {
        token: Token,
        query: T::Query,
        respond_to: Response<T::Reply>,
    },
    Release {
        token: Token,
        respond_to: Option<Response<()>>,
    },
    Stats {
        respond_to: Response<HandleStats>,
    },
}
