//! # Handle Actor
//!
//! `HandleActor` is the Side B half of the message-passing boundary. It owns
//! every hosted resource in a plain `HashMap` and processes requests one at a
//! time, so the store needs no lock.
//!
//! Lifecycle of one resource:
//!
//! 1. **Acquire**: build it with [`HostedResource::create`], mint a fresh
//!    [`Token`], insert it, reply with the token.
//! 2. **Query**: look the token up and run [`HostedResource::query`].
//! 3. **Release**: remove it, run [`HostedResource::on_release`], drop it.
//!
//! `create` and `query` run under `catch_unwind`. A panic inside the resource
//! becomes [`ActorError::Panicked`] for that caller and the actor keeps
//! serving everyone else.
//!
//! ```rust
//! use joint_actor::{HandleActor, HostedResource};
//!
//! #[derive(Debug)]
//! struct Counter(u32);
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("counter error")]
//! struct CounterError;
//!
//! impl HostedResource for Counter {
//!     type Create = u32;
//!     type Query = ();
//!     type Reply = u32;
//!     type Error = CounterError;
//!
//!     fn create(start: u32) -> Result<Self, CounterError> { Ok(Counter(start)) }
//!     fn query(&self, _: ()) -> Result<u32, CounterError> { Ok(self.0) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = HandleActor::<Counter>::new(8);
//!     tokio::spawn(actor.run());
//!
//!     let token = client.acquire(41).await.unwrap();
//!     assert_eq!(client.query(token, ()).await.unwrap(), 41);
//!     client.release(token).await.unwrap();
//! }
//! ```

use crate::client::HandleClient;
use crate::error::ActorError;
use crate::message::{HandleRequest, HandleStats};
use crate::resource::HostedResource;
use crate::token::Token;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct HandleActor<T: HostedResource> {
    receiver: mpsc::Receiver<HandleRequest<T>>,
    store: HashMap<Token, T>,
    next_token: u64,
    stats: HandleStats,
}

impl<T: HostedResource> HandleActor<T> {
    /// Create the actor and the first client. `buffer_size` bounds the
    /// request channel; senders wait while it is full.
    pub fn new(buffer_size: usize) -> (Self, HandleClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_token: 1,
            stats: HandleStats::default(),
        };
        (actor, HandleClient::new(sender))
    }

    /// Serve requests until every client has been dropped. Resources still
    /// hosted at that point are released in token order.
    pub async fn run(mut self) {
        let resource = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(resource, "Handle actor started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                HandleRequest::Acquire { params, respond_to } => {
                    debug!(resource, ?params, "Acquire");
                    match guarded(|| T::create(params)) {
                        Ok(item) => {
                            let token = Token::new(self.next_token);
                            self.next_token += 1;
                            self.store.insert(token, item);
                            self.stats.acquired += 1;
                            info!(resource, %token, live = self.store.len(), "Acquired");
                            let _ = respond_to.send(Ok(token));
                        }
                        Err(e) => {
                            warn!(resource, error = %e, "Acquire failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                HandleRequest::Query {
                    token,
                    query,
                    respond_to,
                } => {
                    debug!(resource, %token, ?query, "Query");
                    let result = match self.store.get(&token) {
                        Some(item) => guarded(|| item.query(query)),
                        None => Err(ActorError::NotFound(token)),
                    };
                    if let Err(e) = &result {
                        warn!(resource, %token, error = %e, "Query failed");
                    }
                    let _ = respond_to.send(result);
                }
                HandleRequest::Release { token, respond_to } => {
                    let result = self.release(resource, token).await;
                    if let Some(respond_to) = respond_to {
                        let _ = respond_to.send(result);
                    }
                }
                HandleRequest::Stats { respond_to } => {
                    let stats = HandleStats {
                        live: self.store.len(),
                        ..self.stats
                    };
                    let _ = respond_to.send(Ok(stats));
                }
            }
        }

        let mut remaining: Vec<Token> = self.store.keys().copied().collect();
        remaining.sort();
        if !remaining.is_empty() {
            warn!(resource, count = remaining.len(), "Releasing leaked handles on shutdown");
        }
        for token in remaining {
            let _ = self.release(resource, token).await;
        }
        info!(resource, released = self.stats.released, "Shutdown");
    }

    async fn release(&mut self, resource: &str, token: Token) -> Result<(), ActorError> {
        match self.store.remove(&token) {
            Some(item) => {
                item.on_release(token).await;
                self.stats.released += 1;
                info!(resource, %token, live = self.store.len(), "Released");
                Ok(())
            }
            None => {
                warn!(resource, %token, "Release of unknown token");
                Err(ActorError::NotFound(token))
            }
        }
    }
}

/// Run a resource call, mapping its error and any panic to [`ActorError`].
fn guarded<R, E, F>(f: F) -> Result<R, ActorError>
where
    E: std::error::Error + Send + Sync + 'static,
    F: FnOnce() -> Result<R, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.map_err(|e| ActorError::Resource(Box::new(e))),
        Err(payload) => Err(ActorError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
