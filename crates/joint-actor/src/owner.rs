//! # Remote Handle
//!
//! [`RemoteHandle`] is the ownership wrapper for the message-passing style:
//! it holds one [`Token`] plus the client that can release it. It cannot be
//! cloned. [`RemoteHandle::release`] consumes it and waits for the actor's
//! answer; dropping it without that queues a detached release. Either way the
//! token is released once.

use crate::client::HandleClient;
use crate::error::ActorError;
use crate::resource::HostedResource;
use crate::token::Token;
use std::fmt;

pub struct RemoteHandle<T: HostedResource> {
    token: Option<Token>,
    client: HandleClient<T>,
}

impl<T: HostedResource> RemoteHandle<T> {
    pub async fn acquire(client: &HandleClient<T>, params: T::Create) -> Result<Self, ActorError> {
        let token = client.acquire(params).await?;
        Ok(Self {
            token: Some(token),
            client: client.clone(),
        })
    }

    /// Wrap a token obtained elsewhere. The handle becomes its sole owner.
    pub fn adopt(client: HandleClient<T>, token: Token) -> Self {
        Self {
            token: Some(token),
            client,
        }
    }

    pub fn token(&self) -> Option<Token> {
        self.token
    }

    pub async fn query(&self, query: T::Query) -> Result<T::Reply, ActorError> {
        let token = self.token.ok_or(ActorError::Released)?;
        self.client.query(token, query).await
    }

    /// Release now and report the actor's answer.
    pub async fn release(mut self) -> Result<(), ActorError> {
        match self.token.take() {
            Some(token) => self.client.release(token).await,
            None => Err(ActorError::Released),
        }
    }

    /// Give up ownership without releasing. The caller must release the token.
    pub fn into_token(mut self) -> Option<Token> {
        self.token.take()
    }
}

impl<T: HostedResource> Drop for RemoteHandle<T> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.client.release_detached(token);
        }
    }
}

impl<T: HostedResource> fmt::Debug for RemoteHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("token", &self.token)
            .finish()
    }
}
