//! # Handle Client
//!
//! The Side A interface to a [`HandleActor`](crate::HandleActor). Cloning is
//! cheap: a client is just a channel sender.

use crate::error::ActorError;
use crate::message::{HandleRequest, HandleStats};
use crate::resource::HostedResource;
use crate::token::Token;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

pub struct HandleClient<T: HostedResource> {
    sender: mpsc::Sender<HandleRequest<T>>,
}

impl<T: HostedResource> Clone for HandleClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: HostedResource> HandleClient<T> {
    pub fn new(sender: mpsc::Sender<HandleRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn acquire(&self, params: T::Create) -> Result<Token, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HandleRequest::Acquire { params, respond_to })
            .await
            .map_err(|_| ActorError::Closed)?;
        response.await.map_err(|_| ActorError::Dropped)?
    }

    pub async fn query(&self, token: Token, query: T::Query) -> Result<T::Reply, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HandleRequest::Query {
                token,
                query,
                respond_to,
            })
            .await
            .map_err(|_| ActorError::Closed)?;
        response.await.map_err(|_| ActorError::Dropped)?
    }

    pub async fn release(&self, token: Token) -> Result<(), ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HandleRequest::Release {
                token,
                respond_to: Some(respond_to),
            })
            .await
            .map_err(|_| ActorError::Closed)?;
        response.await.map_err(|_| ActorError::Dropped)?
    }

    pub async fn stats(&self) -> Result<HandleStats, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HandleRequest::Stats { respond_to })
            .await
            .map_err(|_| ActorError::Closed)?;
        response.await.map_err(|_| ActorError::Dropped)?
    }

    /// Queue a release without waiting for it. Usable from `Drop`.
    ///
    /// When the channel is full the send is handed to the current tokio
    /// runtime, or made blocking when there is none. Returns `false` only
    /// if the actor had already closed, in which case it has dropped every
    /// resource itself.
    pub fn release_detached(&self, token: Token) -> bool {
        let request = HandleRequest::Release {
            token,
            respond_to: None,
        };
        match self.sender.try_send(request) {
            Ok(()) => {
                debug!(%token, "Queued detached release");
                true
            }
            Err(TrySendError::Closed(_)) => {
                debug!(%token, "Actor closed before detached release");
                false
            }
            Err(TrySendError::Full(request)) => match tokio::runtime::Handle::try_current() {
                Ok(runtime) => {
                    let sender = self.sender.clone();
                    runtime.spawn(async move {
                        if sender.send(request).await.is_err() {
                            debug!(%token, "Actor closed before detached release");
                        }
                    });
                    true
                }
                Err(_) => match self.sender.blocking_send(request) {
                    Ok(()) => {
                        debug!(%token, "Queued detached release after waiting for capacity");
                        true
                    }
                    Err(_) => {
                        warn!(%token, "Actor closed while waiting to queue release");
                        false
                    }
                },
            },
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
