use joint_actor::{ActorError, HandleClient, HandleStats, HostedResource, Token};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the lifecycle operations
/// every hosted resource shares.
#[async_trait]
pub trait ActorClient<T: HostedResource>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<ActorError> + Send + Sync;

    /// Access the inner generic HandleClient.
    fn inner(&self) -> &HandleClient<T>;

    /// Release a token. Releasing twice reports a not-found error.
    #[tracing::instrument(skip(self))]
    async fn release(&self, token: Token) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().release(token).await.map_err(Self::Error::from)
    }

    /// Live and lifetime counters of the actor.
    #[tracing::instrument(skip(self))]
    async fn stats(&self) -> Result<HandleStats, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().stats().await.map_err(Self::Error::from)
    }
}
