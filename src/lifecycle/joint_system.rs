use crate::clients::JointClient;
use crate::config::BridgeConfig;
use tracing::{error, info};

/// The runtime orchestrator for the message-passing joint boundary.
///
/// Owns the task running the joint actor and hands out [`JointClient`]s.
/// Must be created inside a tokio runtime.
///
/// # Example
///
/// ```ignore
/// let system = JointSystem::new(&BridgeConfig::default());
///
/// let token = system.joint_client.create_joint("elbow").await?;
/// let transform = system.joint_client.calculate_transform(token, &[0.5]).await?;
/// system.joint_client.release(token).await?;
///
/// system.shutdown().await?;
/// ```
pub struct JointSystem {
    /// Client for interacting with the joint actor
    pub joint_client: JointClient,

    /// Task handle for the running actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl JointSystem {
    pub fn new(config: &BridgeConfig) -> Self {
        let (joint_actor, joint_client) = crate::hosted_joint::new(config);
        let handle = tokio::spawn(joint_actor.run());
        info!(buffer = config.actor_buffer, "Joint system started");

        Self {
            joint_client,
            handle,
        }
    }

    /// Drop the system's client and wait for the actor to exit.
    ///
    /// The actor only stops once every clone of the client (including those
    /// held by live `RemoteHandle`s) is gone; joints still hosted then are
    /// released by the actor itself.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down joint system...");

        drop(self.joint_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Joint system shutdown complete.");
        Ok(())
    }
}
