//! # Mock Client
//!
//! [`MockClient`] answers [`HandleClient`] calls from a queue of scripted
//! expectations instead of a real actor, which makes failures such as a
//! closed actor or a stale token trivial to inject.
//!
//! ```rust
//! use joint_actor::mock::MockClient;
//! use joint_actor::{ActorError, HostedResource, Token};
//!
//! #[derive(Debug)] struct Lamp;
//! #[derive(Debug, thiserror::Error)] #[error("lamp")] struct LampError;
//!
//! impl HostedResource for Lamp {
//!     type Create = (); type Query = (); type Reply = bool; type Error = LampError;
//!     fn create(_: ()) -> Result<Self, LampError> { Ok(Lamp) }
//!     fn query(&self, _: ()) -> Result<bool, LampError> { Ok(true) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Lamp>::new();
//!     mock.expect_acquire().return_ok(Token::new(7));
//!     mock.expect_query(Token::new(7)).return_err(ActorError::Closed);
//!
//!     let client = mock.client();
//!     let token = client.acquire(()).await.unwrap();
//!     assert!(matches!(client.query(token, ()).await, Err(ActorError::Closed)));
//!     mock.verify();
//! }
//! ```
//!
//! For tests that want to inspect the raw requests, [`create_mock_client`]
//! returns a client plus the receiving end of its channel, and the
//! `expect_*` helpers pull the next request of a given kind.

use crate::client::HandleClient;
use crate::error::ActorError;
use crate::message::{HandleRequest, HandleStats, Response};
use crate::resource::HostedResource;
use crate::token::Token;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

enum Expectation<T: HostedResource> {
    Acquire {
        response: Result<Token, ActorError>,
    },
    Query {
        token: Token,
        response: Result<T::Reply, ActorError>,
    },
    Release {
        token: Token,
        response: Result<(), ActorError>,
    },
    Stats {
        response: Result<HandleStats, ActorError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: HostedResource>(expectations: &Expectations<T>, expectation: Expectation<T>) {
    expectations
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push_back(expectation);
}

/// A scripted stand-in for a [`HandleActor`](crate::HandleActor).
///
/// Requests are matched against expectations in order. A request that does
/// not match the next expectation (kind or token) panics the mock task, which
/// surfaces in the test as [`ActorError::Dropped`].
pub struct MockClient<T: HostedResource> {
    client: HandleClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: HostedResource> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HostedResource> MockClient<T> {
    /// Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<HandleRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let script = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = script
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();

                match (request, expectation) {
                    (HandleRequest::Acquire { respond_to, .. }, Some(Expectation::Acquire { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HandleRequest::Query {
                            token, respond_to, ..
                        },
                        Some(Expectation::Query {
                            token: expected,
                            response,
                        }),
                    ) if token == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HandleRequest::Release { token, respond_to },
                        Some(Expectation::Release {
                            token: expected,
                            response,
                        }),
                    ) if token == expected => {
                        if let Some(respond_to) = respond_to {
                            let _ = respond_to.send(response);
                        }
                    }
                    (HandleRequest::Stats { respond_to }, Some(Expectation::Stats { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: HandleClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> HandleClient<T> {
        self.client.clone()
    }

    pub fn expect_acquire(&mut self) -> AcquireExpectationBuilder<T> {
        AcquireExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_query(&mut self, token: Token) -> QueryExpectationBuilder<T> {
        QueryExpectationBuilder {
            token,
            expectations: self.expectations.clone(),
        }
    }

    /// Matches both awaited and detached releases.
    pub fn expect_release(&mut self, token: Token) -> ReleaseExpectationBuilder<T> {
        ReleaseExpectationBuilder {
            token,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_stats(&mut self) -> StatsExpectationBuilder<T> {
        StatsExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

pub struct AcquireExpectationBuilder<T: HostedResource> {
    expectations: Expectations<T>,
}

impl<T: HostedResource> AcquireExpectationBuilder<T> {
    pub fn return_ok(self, token: Token) {
        push(&self.expectations, Expectation::Acquire { response: Ok(token) });
    }

    pub fn return_err(self, error: ActorError) {
        push(&self.expectations, Expectation::Acquire { response: Err(error) });
    }
}

pub struct QueryExpectationBuilder<T: HostedResource> {
    token: Token,
    expectations: Expectations<T>,
}

impl<T: HostedResource> QueryExpectationBuilder<T> {
    pub fn return_ok(self, reply: T::Reply) {
        push(
            &self.expectations,
            Expectation::Query {
                token: self.token,
                response: Ok(reply),
            },
        );
    }

    pub fn return_err(self, error: ActorError) {
        push(
            &self.expectations,
            Expectation::Query {
                token: self.token,
                response: Err(error),
            },
        );
    }
}

pub struct ReleaseExpectationBuilder<T: HostedResource> {
    token: Token,
    expectations: Expectations<T>,
}

impl<T: HostedResource> ReleaseExpectationBuilder<T> {
    pub fn return_ok(self) {
        push(
            &self.expectations,
            Expectation::Release {
                token: self.token,
                response: Ok(()),
            },
        );
    }

    pub fn return_err(self, error: ActorError) {
        push(
            &self.expectations,
            Expectation::Release {
                token: self.token,
                response: Err(error),
            },
        );
    }
}

pub struct StatsExpectationBuilder<T: HostedResource> {
    expectations: Expectations<T>,
}

impl<T: HostedResource> StatsExpectationBuilder<T> {
    pub fn return_ok(self, stats: HandleStats) {
        push(&self.expectations, Expectation::Stats { response: Ok(stats) });
    }
}

/// A client whose requests land on the returned receiver.
pub fn create_mock_client<T: HostedResource>(
    buffer_size: usize,
) -> (HandleClient<T>, mpsc::Receiver<HandleRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (HandleClient::new(sender), receiver)
}

/// Next request, if it is an acquire.
pub async fn expect_acquire<T: HostedResource>(
    receiver: &mut mpsc::Receiver<HandleRequest<T>>,
) -> Option<(T::Create, Response<Token>)> {
    match receiver.recv().await {
        Some(HandleRequest::Acquire { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a query.
pub async fn expect_query<T: HostedResource>(
    receiver: &mut mpsc::Receiver<HandleRequest<T>>,
) -> Option<(Token, T::Query, Response<T::Reply>)> {
    match receiver.recv().await {
        Some(HandleRequest::Query {
            token,
            query,
            respond_to,
        }) => Some((token, query, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a release. The responder is `None` for a detached release.
pub async fn expect_release<T: HostedResource>(
    receiver: &mut mpsc::Receiver<HandleRequest<T>>,
) -> Option<(Token, Option<Response<()>>)> {
    match receiver.recv().await {
        Some(HandleRequest::Release { token, respond_to }) => Some((token, respond_to)),
        _ => None,
    }
}
