//! # Joint FFI
//!
//! Exposes [`robot_joint::Joint`] to foreign runtimes through an opaque
//! handle protocol. The joint is allocated on the Rust heap, the caller only
//! ever holds a token for it, and the token goes back to Rust exactly once to
//! be freed.
//!
//! ## Layers
//!
//! 1. [`codec`] converts transforms, names and limits into boundary-safe
//!    primitives and back.
//! 2. [`handle`] mints and retires the opaque [`RobotJointHandle`] tokens.
//! 3. [`ffi`] is the `extern "C"` surface (sentinel style); [`bridge`] is the
//!    generator-friendly surface (translated errors).
//! 4. [`translate`] holds both error policies and the fault guard.
//! 5. [`owner`] is the caller-side RAII wrapper over the C surface.
//!
//! The C declarations live in `include/robot_joint.h`.
//!
//! ## Example
//!
//! ```rust
//! use joint_ffi::JointOwner;
//!
//! let mut joint = JointOwner::new("elbow_joint");
//! assert_eq!(joint.name(), "elbow_joint");
//! assert!(joint.is_within_limits(std::f64::consts::PI));
//!
//! joint.release();
//! assert_eq!(joint.name(), "");
//! ```

pub mod bridge;
pub mod codec;
pub mod ffi;
pub mod handle;
pub mod owner;
pub mod translate;

pub use bridge::{new_joint, try_new_joint, BridgedJoint};
pub use codec::{CodecError, LimitsPair, Mat4d, Vec3d};
pub use handle::{live_handles, RobotJointHandle};
pub use owner::JointOwner;
pub use translate::{BoundaryStatus, BridgeError, ErrorTranslation, Sentinel, Translate};
