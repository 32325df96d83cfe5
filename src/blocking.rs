//! # Blocking Client
//!
//! [`BlockingJointClient`] lets synchronous code (a C++ host thread, a plain
//! `main`) use the message-passing boundary. Each instance runs its own joint
//! actor on the process-wide [`SharedRuntime`], so several blocking clients
//! share one set of worker threads and the runtime shuts down when the last
//! of them is dropped.
//!
//! Do not create or drop a `BlockingJointClient` from async code: blocking on
//! the runtime there panics.

use crate::clients::{ActorClient, JointClient};
use crate::config::BridgeConfig;
use crate::hosted_joint::{JointError, JointIndices};
use joint_actor::{HandleStats, SharedRuntime, Token};
use robot_joint::{JointConfig, Matrix4};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

pub struct BlockingJointClient {
    client: JointClient,
    runtime: Arc<Runtime>,
}

impl BlockingJointClient {
    pub fn new(config: &BridgeConfig) -> Result<Self, JointError> {
        Self::with_runtime(SharedRuntime::global(), config)
    }

    pub fn with_runtime(shared: &SharedRuntime, config: &BridgeConfig) -> Result<Self, JointError> {
        let runtime = shared.acquire()?;
        let (actor, client) = crate::hosted_joint::new(config);
        runtime.spawn(actor.run());
        debug!("Blocking joint client ready");
        Ok(Self { client, runtime })
    }

    pub fn create_joint(&self, name: &str) -> Result<Token, JointError> {
        self.runtime.block_on(self.client.create_joint(name))
    }

    pub fn create_configured(&self, config: JointConfig) -> Result<Token, JointError> {
        self.runtime.block_on(self.client.create_configured(config))
    }

    pub fn name(&self, token: Token) -> Result<String, JointError> {
        self.runtime.block_on(self.client.name(token))
    }

    pub fn indices(&self, token: Token) -> Result<JointIndices, JointError> {
        self.runtime.block_on(self.client.indices(token))
    }

    pub fn calculate_transform(&self, token: Token, variables: &[f64]) -> Result<Matrix4<f64>, JointError> {
        self.runtime
            .block_on(self.client.calculate_transform(token, variables))
    }

    pub fn is_within_limits(&self, token: Token, position: f64) -> Result<bool, JointError> {
        self.runtime
            .block_on(self.client.is_within_limits(token, position))
    }

    pub fn limits(&self, token: Token) -> Result<(f64, f64), JointError> {
        self.runtime.block_on(self.client.limits(token))
    }

    pub fn release(&self, token: Token) -> Result<(), JointError> {
        self.runtime.block_on(self.client.release(token))
    }

    pub fn stats(&self) -> Result<HandleStats, JointError> {
        self.runtime.block_on(self.client.stats())
    }

    pub fn client(&self) -> &JointClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_blocking_round_trip() {
        let shared = SharedRuntime::new("blocking-test");
        let client = BlockingJointClient::with_runtime(&shared, &BridgeConfig::default()).unwrap();

        let token = client.create_joint("sync_joint").unwrap();
        assert_eq!(client.name(token).unwrap(), "sync_joint");
        assert_eq!(client.limits(token).unwrap(), (-PI, PI));
        assert!(client.is_within_limits(token, PI).unwrap());
        assert_eq!(client.calculate_transform(token, &[]).unwrap(), Matrix4::identity());

        client.release(token).unwrap();
        assert!(matches!(client.name(token), Err(JointError::NotFound(_))));
        assert_eq!(client.stats().unwrap().live, 0);
    }

    #[test]
    fn test_clients_share_one_runtime() {
        let shared = SharedRuntime::new("shared-test");
        let first = BlockingJointClient::with_runtime(&shared, &BridgeConfig::default()).unwrap();
        let second = BlockingJointClient::with_runtime(&shared, &BridgeConfig::default()).unwrap();
        assert!(Arc::ptr_eq(&first.runtime, &second.runtime));

        drop(first);
        assert!(shared.is_running());
        drop(second);
        assert!(!shared.is_running());
    }
}
