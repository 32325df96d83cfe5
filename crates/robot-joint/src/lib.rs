//! # Robot Joint
//!
//! The resource core shared by every integration style in this workspace: a
//! single revolute joint with a rigid parent-to-origin transform, link and
//! degree-of-freedom indices, a rotation axis, and a closed pair of motion
//! limits.
//!
//! Nothing in this crate knows about a boundary. The C ABI (`joint-ffi`) and
//! the message-passing host (`joint-actor`) both wrap the same [`Joint`].
//!
//! ## Example
//!
//! ```rust
//! use robot_joint::Joint;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let joint = Joint::new("shoulder_joint");
//! let transform = joint.calculate_transform(&[FRAC_PI_2]);
//! assert!((transform.rotation.angle() - FRAC_PI_2).abs() < 1e-10);
//! ```

pub mod config;
pub mod error;
pub mod joint;

pub use config::{JointConfig, Limits};
pub use error::{Error, Result};
pub use joint::Joint;
pub use nalgebra::{Isometry3, Matrix4, Quaternion, Translation3, Unit, UnitQuaternion, Vector3};
