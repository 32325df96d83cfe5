//! # Safe Bridge
//!
//! The alternative to the hand-written C ABI: a surface restricted to types a
//! bridge generator can map on its own (a boxed opaque type, `&str`, `&[f64]`,
//! `String`, `Vec<f64>`, primitives, and `Result`). A generator such as `cxx`
//! turns the `Err` side into a C++ exception carrying the error's message.
//!
//! Every call that evaluates the joint's kinematics runs through the
//! [`Translate`](crate::translate::Translate) policy, so a panic inside the
//! joint becomes [`BridgeError::Panicked`] rather than an unwind into the
//! foreign runtime. Plain field getters need no guard. This module never
//! returns sentinel values.

use crate::codec::Mat4d;
use crate::translate::{translated, BridgeError};
use robot_joint::{Joint, JointConfig};
use std::fmt;

/// Newtype over the core joint so the bridge owns the exported type.
#[derive(Clone, Debug)]
pub struct BridgedJoint(Joint);

/// Create a joint with default properties. Never fails.
pub fn new_joint(name: &str) -> Box<BridgedJoint> {
    Box::new(BridgedJoint(Joint::new(name)))
}

/// Create a fully configured joint.
pub fn try_new_joint(config: JointConfig) -> Result<Box<BridgedJoint>, BridgeError> {
    translated(|| Ok(Box::new(BridgedJoint(Joint::from_config(config)?))))
}

impl BridgedJoint {
    pub fn name(&self) -> String {
        self.0.name().to_string()
    }

    pub fn parent_link_index(&self) -> usize {
        self.0.parent_link_index()
    }

    pub fn child_link_index(&self) -> usize {
        self.0.child_link_index()
    }

    pub fn index(&self) -> usize {
        self.0.index()
    }

    pub fn dof_index(&self) -> usize {
        self.0.dof_index()
    }

    /// `[x, y, z]` of the unit rotation axis.
    pub fn axis(&self) -> Vec<f64> {
        self.0.axis().iter().copied().collect()
    }

    /// Transform as 16 column-major elements. Only the first variable is read.
    pub fn calculate_transform(&self, variables: &[f64]) -> Result<Vec<f64>, BridgeError> {
        translated(|| Ok(Mat4d::from_isometry(&self.0.calculate_transform(variables)).to_vec()))
    }

    /// Transform requiring exactly one finite variable.
    pub fn checked_transform(&self, variables: &[f64]) -> Result<Vec<f64>, BridgeError> {
        translated(|| {
            let transform = self.0.calculate_transform_strict(variables)?;
            Ok(Mat4d::from_isometry(&transform).to_vec())
        })
    }

    pub fn parent_link_to_joint_origin(&self) -> Result<Vec<f64>, BridgeError> {
        translated(|| Ok(Mat4d::from_isometry(self.0.parent_link_to_joint_origin()).to_vec()))
    }

    pub fn is_within_limits(&self, position: f64) -> bool {
        self.0.is_within_limits(position)
    }

    /// `[min, max]`.
    pub fn get_limits(&self) -> Vec<f64> {
        crate::codec::limits_to_array(self.0.limits()).to_vec()
    }

    pub fn joint(&self) -> &Joint {
        &self.0
    }
}

impl fmt::Display for BridgedJoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
