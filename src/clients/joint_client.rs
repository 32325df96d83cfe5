use crate::clients::actor_client::ActorClient;
use crate::hosted_joint::{HostedJoint, JointCreate, JointError, JointIndices, JointQuery, JointReply};
use joint_actor::{HandleClient, RemoteHandle, Token};
use joint_ffi::Mat4d;
use robot_joint::{JointConfig, Matrix4, Vector3};
use tracing::{debug, instrument};

/// Client for interacting with the joint actor.
#[derive(Clone)]
pub struct JointClient {
    inner: HandleClient<HostedJoint>,
}

impl JointClient {
    pub fn new(inner: HandleClient<HostedJoint>) -> Self {
        Self { inner }
    }
}

impl ActorClient<HostedJoint> for JointClient {
    type Error = JointError;

    fn inner(&self) -> &HandleClient<HostedJoint> {
        &self.inner
    }
}

impl JointClient {
    #[instrument(skip(self))]
    pub async fn create_joint(&self, name: &str) -> Result<Token, JointError> {
        debug!("Sending request");
        Ok(self.inner.acquire(JointCreate::Named(name.to_string())).await?)
    }

    #[instrument(skip(self, config), fields(name = %config.name))]
    pub async fn create_configured(&self, config: JointConfig) -> Result<Token, JointError> {
        debug!(?config, "Sending request");
        Ok(self.inner.acquire(JointCreate::Config(config)).await?)
    }

    /// Create a joint owned by a [`RemoteHandle`], released on drop.
    #[instrument(skip(self))]
    pub async fn create_owned(
        &self,
        params: JointCreate,
    ) -> Result<RemoteHandle<HostedJoint>, JointError> {
        debug!("Sending request");
        Ok(RemoteHandle::acquire(&self.inner, params).await?)
    }

    async fn ask(&self, token: Token, query: JointQuery) -> Result<JointReply, JointError> {
        Ok(self.inner.query(token, query).await?)
    }

    #[instrument(skip(self))]
    pub async fn name(&self, token: Token) -> Result<String, JointError> {
        match self.ask(token, JointQuery::Name).await? {
            JointReply::Name(name) => Ok(name),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn indices(&self, token: Token) -> Result<JointIndices, JointError> {
        match self.ask(token, JointQuery::Indices).await? {
            JointReply::Indices(indices) => Ok(indices),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn axis(&self, token: Token) -> Result<Vector3<f64>, JointError> {
        match self.ask(token, JointQuery::Axis).await? {
            JointReply::Axis(axis) => Ok(Vector3::from(axis)),
            other => Err(unexpected(other)),
        }
    }

    /// Only the first variable is used; an empty slice yields the identity.
    #[instrument(skip(self))]
    pub async fn calculate_transform(
        &self,
        token: Token,
        variables: &[f64],
    ) -> Result<Matrix4<f64>, JointError> {
        let reply = self
            .ask(token, JointQuery::Transform(variables.to_vec()))
            .await?;
        transform(reply)
    }

    /// Requires exactly one finite variable.
    #[instrument(skip(self))]
    pub async fn calculate_transform_strict(
        &self,
        token: Token,
        variables: &[f64],
    ) -> Result<Matrix4<f64>, JointError> {
        let reply = self
            .ask(token, JointQuery::StrictTransform(variables.to_vec()))
            .await?;
        transform(reply)
    }

    #[instrument(skip(self))]
    pub async fn parent_link_to_joint_origin(&self, token: Token) -> Result<Matrix4<f64>, JointError> {
        transform(self.ask(token, JointQuery::ParentLinkToJointOrigin).await?)
    }

    #[instrument(skip(self))]
    pub async fn is_within_limits(&self, token: Token, position: f64) -> Result<bool, JointError> {
        match self.ask(token, JointQuery::WithinLimits(position)).await? {
            JointReply::WithinLimits(within) => Ok(within),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn limits(&self, token: Token) -> Result<(f64, f64), JointError> {
        match self.ask(token, JointQuery::Limits).await? {
            JointReply::Limits(min, max) => Ok((min, max)),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn describe(&self, token: Token) -> Result<String, JointError> {
        match self.ask(token, JointQuery::Describe).await? {
            JointReply::Description(text) => Ok(text),
            other => Err(unexpected(other)),
        }
    }
}

fn transform(reply: JointReply) -> Result<Matrix4<f64>, JointError> {
    match reply {
        JointReply::Transform(matrix) => Ok(Mat4d::as_matrix(&matrix)),
        other => Err(unexpected(other)),
    }
}

fn unexpected(reply: JointReply) -> JointError {
    JointError::UnexpectedReply(format!("{:?}", reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use joint_actor::mock::MockClient;
    use joint_actor::ActorError;

    #[tokio::test]
    async fn test_client_maps_replies() {
        let mut mock = MockClient::<HostedJoint>::new();
        let token = Token::new(1);
        mock.expect_acquire().return_ok(token);
        mock.expect_query(token)
            .return_ok(JointReply::Name("mocked".to_string()));
        mock.expect_query(token).return_ok(JointReply::Limits(-1.0, 1.0));

        let client = JointClient::new(mock.client());
        assert_eq!(client.create_joint("mocked").await.unwrap(), token);
        assert_eq!(client.name(token).await.unwrap(), "mocked");
        assert_eq!(client.limits(token).await.unwrap(), (-1.0, 1.0));
        mock.verify();
    }

    #[tokio::test]
    async fn test_client_maps_errors() {
        let mut mock = MockClient::<HostedJoint>::new();
        let token = Token::new(5);
        mock.expect_query(token)
            .return_err(ActorError::NotFound(token));
        mock.expect_query(token)
            .return_err(ActorError::Panicked("boom".to_string()));
        mock.expect_query(token).return_ok(JointReply::WithinLimits(true));
        mock.expect_release(token).return_err(ActorError::Closed);

        let client = JointClient::new(mock.client());
        assert_eq!(
            client.name(token).await,
            Err(JointError::NotFound("#5".to_string()))
        );
        assert_eq!(
            client.describe(token).await,
            Err(JointError::Panicked("boom".to_string()))
        );
        assert!(matches!(
            client.limits(token).await,
            Err(JointError::UnexpectedReply(_))
        ));
        assert_eq!(
            client.release(token).await,
            Err(JointError::ActorCommunicationError("Actor closed".to_string()))
        );
        mock.verify();
    }
}
