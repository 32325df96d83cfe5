use joint_actor::{HostedResource, Token};
use joint_ffi::Mat4d;
use robot_joint::{Joint, JointConfig};
use async_trait::async_trait;
use tracing::debug;

/// A [`Joint`] living inside the joint actor.
#[derive(Debug, Clone)]
pub struct HostedJoint(Joint);

impl HostedJoint {
    pub fn joint(&self) -> &Joint {
        &self.0
    }
}

/// How a joint is created inside the actor.
#[derive(Debug, Clone)]
pub enum JointCreate {
    /// Default properties with the given name.
    Named(String),
    /// Fully specified and validated.
    Config(JointConfig),
}

/// Read-only requests against a hosted joint.
#[derive(Debug, Clone)]
pub enum JointQuery {
    Name,
    Indices,
    Axis,
    /// Only the first variable is used; empty yields the identity.
    Transform(Vec<f64>),
    /// Exactly one finite variable.
    StrictTransform(Vec<f64>),
    ParentLinkToJointOrigin,
    WithinLimits(f64),
    Limits,
    Describe,
}

/// Link and degree-of-freedom indices of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointIndices {
    pub index: usize,
    pub parent_link_index: usize,
    pub child_link_index: usize,
    pub dof_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JointReply {
    Name(String),
    Indices(JointIndices),
    Axis([f64; 3]),
    /// Column-major, same layout as the C ABI.
    Transform(Mat4d),
    WithinLimits(bool),
    Limits(f64, f64),
    Description(String),
}

#[async_trait]
impl HostedResource for HostedJoint {
    type Create = JointCreate;
    type Query = JointQuery;
    type Reply = JointReply;
    type Error = robot_joint::Error;

    fn create(params: JointCreate) -> Result<Self, Self::Error> {
        let joint = match params {
            JointCreate::Named(name) => Joint::new(name),
            JointCreate::Config(config) => Joint::from_config(config)?,
        };
        Ok(Self(joint))
    }

    fn query(&self, query: JointQuery) -> Result<JointReply, Self::Error> {
        let joint = &self.0;
        let reply = match query {
            JointQuery::Name => JointReply::Name(joint.name().to_string()),
            JointQuery::Indices => JointReply::Indices(JointIndices {
                index: joint.index(),
                parent_link_index: joint.parent_link_index(),
                child_link_index: joint.child_link_index(),
                dof_index: joint.dof_index(),
            }),
            JointQuery::Axis => {
                let axis = joint.axis();
                JointReply::Axis([axis.x, axis.y, axis.z])
            }
            JointQuery::Transform(variables) => {
                JointReply::Transform(Mat4d::from_isometry(&joint.calculate_transform(&variables)))
            }
            JointQuery::StrictTransform(variables) => JointReply::Transform(Mat4d::from_isometry(
                &joint.calculate_transform_strict(&variables)?,
            )),
            JointQuery::ParentLinkToJointOrigin => {
                JointReply::Transform(Mat4d::from_isometry(joint.parent_link_to_joint_origin()))
            }
            JointQuery::WithinLimits(position) => {
                JointReply::WithinLimits(joint.is_within_limits(position))
            }
            JointQuery::Limits => {
                let (min, max) = joint.limits();
                JointReply::Limits(min, max)
            }
            JointQuery::Describe => JointReply::Description(joint.to_string()),
        };
        Ok(reply)
    }

    async fn on_release(&self, token: Token) {
        debug!(%token, name = self.0.name(), "Dropping hosted joint");
    }
}
