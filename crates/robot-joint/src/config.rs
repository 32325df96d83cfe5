//! # Joint Configuration
//!
//! [`JointConfig`] is the full set of attributes a caller may supply when
//! constructing a [`Joint`](crate::Joint). It is a plain DTO: it can be
//! serialized, stored, and shipped around freely, and it is only checked when
//! [`Joint::from_config`](crate::Joint::from_config) turns it into a live joint.

use crate::error::{Error, Result};
use nalgebra::{Isometry3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Closed motion interval `[min, max]` for a joint position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    /// Builds a limit pair, rejecting NaN bounds and inverted intervals.
    ///
    /// Infinite bounds are accepted so that continuous joints can be modelled.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(Error::invalid("limits must not be NaN"));
        }
        if min > max {
            return Err(Error::invalid(format!(
                "minimum limit {min} exceeds maximum limit {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Endpoints are included. NaN positions are never within limits.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.min && position <= self.max
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self { min: -PI, max: PI }
    }
}

/// Payload for constructing a fully configured joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    pub name: String,
    pub parent_link_to_joint_origin: Isometry3<f64>,
    pub parent_link_index: usize,
    pub child_link_index: usize,
    pub index: usize,
    pub dof_index: usize,
    /// Rotation axis; normalized on construction.
    pub axis: Vector3<f64>,
    pub limits: Limits,
}

impl JointConfig {
    /// A configuration with every attribute at its default and the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for JointConfig {
    fn default() -> Self {
        Self {
            name: "unnamed_joint".to_string(),
            parent_link_to_joint_origin: Isometry3::identity(),
            parent_link_index: 0,
            child_link_index: 1,
            index: 0,
            dof_index: 0,
            axis: Vector3::z(),
            limits: Limits::default(),
        }
    }
}
