//! # Joint
//!
//! A revolute joint. Once built, a [`Joint`] is never mutated in place: the
//! `with_*` methods consume the joint and hand back a replacement, so a value
//! that has been shared (behind a boundary handle, inside an actor) always
//! describes the configuration it was created with.

use crate::config::{JointConfig, Limits};
use crate::error::{Error, Result};
use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};
use std::fmt;

/// Axes shorter than this cannot be normalized.
const MIN_AXIS_NORM: f64 = 1e-12;

/// Largest accepted deviation of the origin rotation from unit length.
const ROTATION_NORM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    name: String,
    /// Always rigid: an `Isometry3` cannot carry scale or shear.
    parent_link_to_joint_origin: Isometry3<f64>,
    parent_link_index: usize,
    child_link_index: usize,
    index: usize,
    dof_index: usize,
    axis: Unit<Vector3<f64>>,
    limits: Limits,
}

impl Joint {
    /// Create a joint with the given name and default kinematic properties.
    ///
    /// The joint sits at its parent's origin, links parent 0 to child 1,
    /// rotates about +Z, and is limited to `[-π, π]`.
    ///
    /// ```rust
    /// use robot_joint::Joint;
    ///
    /// let joint = Joint::new("shoulder_joint");
    /// assert_eq!(joint.name(), "shoulder_joint");
    /// assert_eq!(joint.child_link_index(), 1);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        let defaults = JointConfig::default();
        Self {
            name: name.into(),
            parent_link_to_joint_origin: defaults.parent_link_to_joint_origin,
            parent_link_index: defaults.parent_link_index,
            child_link_index: defaults.child_link_index,
            index: defaults.index,
            dof_index: defaults.dof_index,
            axis: Vector3::z_axis(),
            limits: defaults.limits,
        }
    }

    /// Create a joint from a full configuration.
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`] if the axis is zero or non-finite, the
    /// origin transform holds non-finite values or a non-unit rotation, or
    /// the limits are inverted.
    pub fn from_config(config: JointConfig) -> Result<Self> {
        let origin = config.parent_link_to_joint_origin;
        let finite_origin = origin
            .translation
            .vector
            .iter()
            .chain(origin.rotation.coords.iter())
            .all(|v| v.is_finite());
        if !finite_origin {
            return Err(Error::invalid("origin transform is not finite"));
        }
        // Deserialized `Unit` values are taken as-is, so the norm is checked here.
        let rotation_norm = origin.rotation.norm();
        if (rotation_norm - 1.0).abs() > ROTATION_NORM_TOLERANCE {
            return Err(Error::invalid(format!(
                "origin rotation is not a unit quaternion (norm {rotation_norm})"
            )));
        }

        let axis = normalize_axis(config.axis)?;
        let limits = Limits::new(config.limits.min, config.limits.max)?;

        Ok(Self {
            name: config.name,
            parent_link_to_joint_origin: origin,
            parent_link_index: config.parent_link_index,
            child_link_index: config.child_link_index,
            index: config.index,
            dof_index: config.dof_index,
            axis,
            limits,
        })
    }

    /// Snapshot of this joint as a configuration DTO.
    pub fn to_config(&self) -> JointConfig {
        JointConfig {
            name: self.name.clone(),
            parent_link_to_joint_origin: self.parent_link_to_joint_origin,
            parent_link_index: self.parent_link_index,
            child_link_index: self.child_link_index,
            index: self.index,
            dof_index: self.dof_index,
            axis: self.axis.into_inner(),
            limits: self.limits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_link_to_joint_origin(&self) -> &Isometry3<f64> {
        &self.parent_link_to_joint_origin
    }

    pub fn parent_link_index(&self) -> usize {
        self.parent_link_index
    }

    pub fn child_link_index(&self) -> usize {
        self.child_link_index
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dof_index(&self) -> usize {
        self.dof_index
    }

    /// Unit rotation axis.
    pub fn axis(&self) -> &Unit<Vector3<f64>> {
        &self.axis
    }

    /// `(min, max)` of the closed motion interval.
    pub fn limits(&self) -> (f64, f64) {
        self.limits.as_tuple()
    }

    pub fn is_within_limits(&self, position: f64) -> bool {
        self.limits.contains(position)
    }

    /// Calculate the joint transform for the given joint variables.
    ///
    /// Only the first variable is read; a revolute joint has one degree of
    /// freedom and any trailing values are ignored. An empty slice yields the
    /// identity transform.
    ///
    /// Use [`Joint::calculate_transform_strict`] to reject wrong counts instead.
    ///
    /// ```rust
    /// use robot_joint::{Isometry3, Joint};
    ///
    /// let joint = Joint::new("elbow_joint");
    /// assert_eq!(joint.calculate_transform(&[]), Isometry3::identity());
    /// assert_eq!(
    ///     joint.calculate_transform(&[0.5, 9.0, 9.0]),
    ///     joint.calculate_transform(&[0.5]),
    /// );
    /// ```
    pub fn calculate_transform(&self, variables: &[f64]) -> Isometry3<f64> {
        match variables.first() {
            Some(&angle) => self.transform_at(angle),
            None => Isometry3::identity(),
        }
    }

    /// Like [`Joint::calculate_transform`], but requires exactly one finite variable.
    pub fn calculate_transform_strict(&self, variables: &[f64]) -> Result<Isometry3<f64>> {
        let [angle] = variables else {
            return Err(Error::InvalidVariableCount {
                expected: 1,
                actual: variables.len(),
            });
        };
        if !angle.is_finite() {
            return Err(Error::NonFiniteVariable { value: *angle });
        }
        Ok(self.transform_at(*angle))
    }

    fn transform_at(&self, angle: f64) -> Isometry3<f64> {
        let rotation = UnitQuaternion::from_axis_angle(&self.axis, angle);
        let joint_motion = Isometry3::from_parts(Translation3::identity(), rotation);
        self.parent_link_to_joint_origin * joint_motion
    }

    /// Replace the rotation axis. The axis is normalized.
    pub fn with_axis(mut self, axis: Vector3<f64>) -> Result<Self> {
        self.axis = normalize_axis(axis)?;
        Ok(self)
    }

    pub fn with_origin(mut self, origin: Isometry3<f64>) -> Self {
        self.parent_link_to_joint_origin = origin;
        self
    }

    pub fn with_limits(mut self, min: f64, max: f64) -> Result<Self> {
        self.limits = Limits::new(min, max)?;
        Ok(self)
    }
}

fn normalize_axis(axis: Vector3<f64>) -> Result<Unit<Vector3<f64>>> {
    if !axis.iter().all(|v| v.is_finite()) {
        return Err(Error::invalid("axis is not finite"));
    }
    Unit::try_new(axis, MIN_AXIS_NORM)
        .ok_or_else(|| Error::invalid("axis must have non-zero length"))
}

impl Default for Joint {
    fn default() -> Self {
        Self::new("unnamed_joint")
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Joint '{}' (index: {}, dof: {}, parent: {} -> child: {})",
            self.name, self.index, self.dof_index, self.parent_link_index, self.child_link_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_identity(transform: &Isometry3<f64>) {
        let diff = (transform.to_homogeneous() - nalgebra::Matrix4::identity()).norm();
        assert!(diff < 1e-10, "expected identity, diff = {}", diff);
    }

    #[test]
    fn test_joint_creation() {
        let joint = Joint::new("test_joint");
        assert_eq!(joint.name(), "test_joint");
        assert_eq!(joint.index(), 0);
        assert_eq!(joint.dof_index(), 0);
        assert_eq!(joint.parent_link_index(), 0);
        assert_eq!(joint.child_link_index(), 1);
        assert_eq!(joint.axis().into_inner(), Vector3::z());
    }

    #[test]
    fn test_joint_from_config() {
        let config = JointConfig {
            name: "configured_joint".to_string(),
            parent_link_to_joint_origin: Isometry3::from_parts(
                Translation3::new(1.0, 2.0, 3.0),
                UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_4),
            ),
            parent_link_index: 5,
            child_link_index: 6,
            index: 10,
            dof_index: 15,
            axis: Vector3::new(1.0, 1.0, 0.0),
            limits: Limits { min: -1.0, max: 2.0 },
        };

        let joint = Joint::from_config(config).unwrap();
        assert_eq!(joint.name(), "configured_joint");
        assert_eq!(joint.parent_link_index(), 5);
        assert_eq!(joint.child_link_index(), 6);
        assert_eq!(joint.index(), 10);
        assert_eq!(joint.dof_index(), 15);
        assert_eq!(joint.limits(), (-1.0, 2.0));
        assert!((joint.axis().norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_config_rejects_zero_axis() {
        let config = JointConfig {
            axis: Vector3::zeros(),
            ..JointConfig::named("bad_axis")
        };
        assert!(matches!(
            Joint::from_config(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_config_rejects_inverted_limits() {
        let config = JointConfig {
            limits: Limits { min: 1.0, max: 0.0 },
            ..JointConfig::named("bad_limits")
        };
        assert!(Joint::from_config(config).is_err());
    }

    #[test]
    fn test_from_config_rejects_non_finite_origin() {
        let config = JointConfig {
            parent_link_to_joint_origin: Isometry3::translation(f64::NAN, 0.0, 0.0),
            ..JointConfig::named("bad_origin")
        };
        assert!(Joint::from_config(config).is_err());
    }

    #[test]
    fn test_from_config_rejects_non_unit_rotation() {
        let mut value = serde_json::to_value(JointConfig::named("sheared")).unwrap();
        value["parent_link_to_joint_origin"]["rotation"] = serde_json::json!([0.0, 0.0, 1.0, 1.0]);
        let config: JointConfig = serde_json::from_value(value).unwrap();
        assert!((config.parent_link_to_joint_origin.rotation.norm() - 1.0).abs() > 0.1);

        assert!(matches!(
            Joint::from_config(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_config_accepts_rotation_within_tolerance() {
        let nearly_unit = nalgebra::Quaternion::new(1.0 + 1e-12, 0.0, 0.0, 0.0);
        let config = JointConfig {
            parent_link_to_joint_origin: Isometry3::from_parts(
                Translation3::identity(),
                Unit::new_unchecked(nearly_unit),
            ),
            ..JointConfig::named("nearly_unit")
        };
        assert!(Joint::from_config(config).is_ok());
    }

    #[test]
    fn test_config_round_trip() {
        let joint = Joint::new("wrist").with_limits(-0.5, 0.5).unwrap();
        let rebuilt = Joint::from_config(joint.to_config()).unwrap();
        assert_eq!(rebuilt, joint);
    }

    #[test]
    fn test_empty_variables_yield_identity() {
        let joint = Joint::new("empty").with_origin(Isometry3::translation(1.0, 0.0, 0.0));
        assert_identity(&joint.calculate_transform(&[]));
    }

    #[test]
    fn test_zero_angle_is_identity() {
        assert_identity(&Joint::new("zero").calculate_transform(&[0.0]));
    }

    #[test]
    fn test_full_rotation_is_identity() {
        assert_identity(&Joint::new("full_turn").calculate_transform(&[2.0 * PI]));
    }

    #[test]
    fn test_trailing_variables_ignored() {
        let joint = Joint::new("trailing");
        assert_eq!(
            joint.calculate_transform(&[0.3, 1.0, -7.0]),
            joint.calculate_transform(&[0.3])
        );
    }

    #[test]
    fn test_calculate_transform_90_degrees() {
        let transform = Joint::new("rotation_joint").calculate_transform(&[FRAC_PI_2]);
        assert!((transform.rotation.angle() - FRAC_PI_2).abs() < 1e-10);

        // +X maps onto +Y for a right-handed rotation about +Z.
        let rotated = transform * nalgebra::Point3::new(1.0, 0.0, 0.0);
        assert!((rotated - nalgebra::Point3::new(0.0, 1.0, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_transform_with_offset() {
        let joint = Joint::new("offset_joint").with_origin(Isometry3::translation(1.0, 2.0, 3.0));
        let translation = joint.calculate_transform(&[0.0]).translation.vector;
        assert!((translation - Vector3::new(1.0, 2.0, 3.0)).norm() < 1e-10);
    }

    #[test]
    fn test_strict_transform_counts_variables() {
        let joint = Joint::new("strict");
        assert_eq!(
            joint.calculate_transform_strict(&[]),
            Err(Error::InvalidVariableCount {
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            joint.calculate_transform_strict(&[0.1, 0.2]),
            Err(Error::InvalidVariableCount {
                expected: 1,
                actual: 2
            })
        );
        assert!(matches!(
            joint.calculate_transform_strict(&[f64::INFINITY]),
            Err(Error::NonFiniteVariable { .. })
        ));
        assert_eq!(
            joint.calculate_transform_strict(&[0.4]).unwrap(),
            joint.calculate_transform(&[0.4])
        );
    }

    #[test]
    fn test_limits() {
        let joint = Joint::new("limited_joint");
        let (min, max) = joint.limits();
        assert!((min + PI).abs() < 1e-10);
        assert!((max - PI).abs() < 1e-10);

        assert!(joint.is_within_limits(PI));
        assert!(joint.is_within_limits(-PI));
        assert!(!joint.is_within_limits(PI + 0.1));
        assert!(!joint.is_within_limits(-PI - 0.1));
    }

    #[test]
    fn test_axis_normalization() {
        let joint = Joint::new("axis_joint")
            .with_axis(Vector3::new(3.0, 4.0, 0.0))
            .unwrap();
        let diff = (joint.axis().into_inner() - Vector3::new(0.6, 0.8, 0.0)).norm();
        assert!(diff < 1e-10);
    }

    #[test]
    fn test_display() {
        let display_str = Joint::new("display_joint").to_string();
        assert!(display_str.contains("display_joint"));
        assert!(display_str.contains("index: 0"));
    }
}
