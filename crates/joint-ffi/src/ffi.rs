//! # C ABI
//!
//! The flat set of `extern "C"` entry points foreign code links against.
//! This is the only module that accepts raw boundary inputs. Every entry point
//! checks its pointers before touching them and runs under the [`Sentinel`]
//! policy, so a null handle, a malformed string, or a panic inside the joint
//! produces the documented safe default instead of a crash:
//!
//! | Returns | Safe default |
//! |---------|--------------|
//! | handle, string | null |
//! | index | `0` |
//! | bool | `false` |
//! | transform | identity |
//! | axis, limits | zeros |
//!
//! Status-code entry points (`*_try_*`) report a [`BoundaryStatus`] instead.
//!
//! Lifetime contract: every handle from [`robot_joint_new`] or
//! [`robot_joint_new_with_config`] is passed to [`robot_joint_free`] exactly
//! once, and every string from [`robot_joint_get_name`] to
//! [`robot_joint_free_string`] exactly once.

use crate::codec::{self, LimitsPair, Mat4d, Vec3d};
use crate::handle::{self, RobotJointHandle};
use crate::translate::{sentinel, BoundaryStatus, BridgeError, Sentinel};
use robot_joint::{Joint, JointConfig, Limits};
use std::ffi::{c_char, c_double, c_uint};
use tracing::{debug, warn};

/// Full joint configuration for [`robot_joint_new_with_config`].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct JointConfigFfi {
    /// NUL-terminated UTF-8, borrowed for the duration of the call.
    pub name: *const c_char,
    pub parent_link_to_joint_origin: Mat4d,
    pub parent_link_index: c_uint,
    pub child_link_index: c_uint,
    pub index: c_uint,
    pub dof_index: c_uint,
    pub axis: Vec3d,
    pub limits: LimitsPair,
}

impl JointConfigFfi {
    /// # Safety
    /// `self.name` must satisfy [`codec::decode_str`].
    unsafe fn decode(&self) -> Result<JointConfig, BridgeError> {
        // SAFETY: forwarded caller contract.
        let name = unsafe { codec::decode_str(self.name) }?;
        Ok(JointConfig {
            name: name.to_string(),
            parent_link_to_joint_origin: self.parent_link_to_joint_origin.to_isometry()?,
            parent_link_index: self.parent_link_index as usize,
            child_link_index: self.child_link_index as usize,
            index: self.index as usize,
            dof_index: self.dof_index as usize,
            axis: self.axis.into(),
            limits: Limits {
                min: self.limits.min,
                max: self.limits.max,
            },
        })
    }
}

/// # Safety
/// `joint` must be null or a live handle.
unsafe fn joint_ref<'a>(joint: *const RobotJointHandle) -> Result<&'a Joint, BridgeError> {
    // SAFETY: forwarded caller contract.
    unsafe { handle::borrow(joint) }.ok_or(BridgeError::NullHandle)
}

/// Create a new robot joint with the given name.
///
/// Returns null if `name` is null or not valid UTF-8.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string. The returned handle
/// must be released with [`robot_joint_free`].
#[no_mangle]
pub unsafe extern "C" fn robot_joint_new(name: *const c_char) -> *mut RobotJointHandle {
    sentinel(|| {
        // SAFETY: caller contract.
        let name = unsafe { codec::decode_str(name) }?;
        Ok(handle::into_raw(Joint::new(name)))
    })
}

/// Create a fully configured joint. Returns null for any invalid field.
///
/// # Safety
/// `config` must be null or point to a valid [`JointConfigFfi`] whose `name`
/// is null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_new_with_config(
    config: *const JointConfigFfi,
) -> *mut RobotJointHandle {
    sentinel(|| {
        // SAFETY: caller contract.
        let config = unsafe { config.as_ref() }.ok_or(codec::CodecError::NullPointer)?;
        // SAFETY: caller contract on config.name.
        let config = unsafe { config.decode() }?;
        Ok(handle::into_raw(Joint::from_config(config)?))
    })
}

/// Free a robot joint handle. Null is ignored.
///
/// # Safety
/// `joint` must be null or a live handle that is not used after this call.
/// Freeing the same handle twice is undefined behavior.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_free(joint: *mut RobotJointHandle) {
    sentinel(|| {
        // SAFETY: caller contract.
        if !unsafe { handle::release(joint) } {
            warn!("robot_joint_free called with a null handle");
        }
        Ok(())
    })
}

/// Get the name of a joint as a newly allocated string.
///
/// The string belongs to the caller and must be released with
/// [`robot_joint_free_string`].
///
/// A null handle has the empty name, but it is reported as a null pointer
/// rather than an allocated `""` so the caller has nothing to free. Wrappers
/// such as [`JointOwner::name`](crate::JointOwner::name) turn it into `""`.
///
/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_name(joint: *const RobotJointHandle) -> *mut c_char {
    sentinel(|| {
        // SAFETY: caller contract.
        let joint = unsafe { joint_ref(joint) }?;
        Ok(codec::encode_string(joint.name())?)
    })
}

/// Free a string returned by [`robot_joint_get_name`]. Null is ignored.
///
/// # Safety
/// `name` must be null or a string from [`robot_joint_get_name`] that has not
/// been freed yet.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_free_string(name: *mut c_char) {
    sentinel(|| {
        // SAFETY: caller contract.
        unsafe { codec::free_string(name) };
        Ok(())
    })
}

/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_index(joint: *const RobotJointHandle) -> c_uint {
    // SAFETY: caller contract.
    sentinel(|| Ok(codec::index_to_c_uint(unsafe { joint_ref(joint) }?.index())?))
}

/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_parent_link_index(joint: *const RobotJointHandle) -> c_uint {
    // SAFETY: caller contract.
    sentinel(|| Ok(codec::index_to_c_uint(unsafe { joint_ref(joint) }?.parent_link_index())?))
}

/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_child_link_index(joint: *const RobotJointHandle) -> c_uint {
    // SAFETY: caller contract.
    sentinel(|| Ok(codec::index_to_c_uint(unsafe { joint_ref(joint) }?.child_link_index())?))
}

/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_dof_index(joint: *const RobotJointHandle) -> c_uint {
    // SAFETY: caller contract.
    sentinel(|| Ok(codec::index_to_c_uint(unsafe { joint_ref(joint) }?.dof_index())?))
}

/// Unit rotation axis; zeros for a null handle.
///
/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_axis(joint: *const RobotJointHandle) -> Vec3d {
    // SAFETY: caller contract.
    sentinel(|| Ok(Vec3d::from(&unsafe { joint_ref(joint) }?.axis().into_inner())))
}

/// Calculate the joint transform for `size` variables at `variables`.
///
/// Only the first variable is used and an empty array yields the identity.
/// A null handle or null `variables` also yields the identity.
///
/// # Safety
/// `joint` must be null or a live handle; `variables` must be null or valid
/// for reads of `size` doubles.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_calculate_transform(
    joint: *const RobotJointHandle,
    variables: *const c_double,
    size: c_uint,
) -> Mat4d {
    sentinel(|| {
        // SAFETY: caller contract.
        let joint = unsafe { joint_ref(joint) }?;
        // SAFETY: caller contract.
        let variables = unsafe { codec::decode_f64_slice(variables, size as usize) }?;
        Ok(Mat4d::from_isometry(&joint.calculate_transform(variables)))
    })
}

/// Status-code variant of [`robot_joint_calculate_transform`].
///
/// Requires exactly one finite variable. On success the transform is written
/// to `out`; on failure `out` is left untouched.
///
/// # Safety
/// As [`robot_joint_calculate_transform`]; `out` must be null or valid for a
/// write of one [`Mat4d`].
#[no_mangle]
pub unsafe extern "C" fn robot_joint_try_calculate_transform(
    joint: *const RobotJointHandle,
    variables: *const c_double,
    size: c_uint,
    out: *mut Mat4d,
) -> BoundaryStatus {
    Sentinel::status(|| {
        // SAFETY: caller contract.
        let out = unsafe { out.as_mut() }.ok_or(codec::CodecError::NullPointer)?;
        // SAFETY: caller contract.
        let joint = unsafe { joint_ref(joint) }?;
        // SAFETY: caller contract.
        let variables = unsafe { codec::decode_f64_slice(variables, size as usize) }?;
        *out = Mat4d::from_isometry(&joint.calculate_transform_strict(variables)?);
        Ok(())
    })
}

/// Parent link to joint origin transform; identity for a null handle.
///
/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_parent_link_to_joint_origin(
    joint: *const RobotJointHandle,
) -> Mat4d {
    sentinel(|| {
        // SAFETY: caller contract.
        let joint = unsafe { joint_ref(joint) }?;
        Ok(Mat4d::from_isometry(joint.parent_link_to_joint_origin()))
    })
}

/// Check a position against the closed limit interval; `false` for a null handle.
///
/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_is_within_limits(
    joint: *const RobotJointHandle,
    position: c_double,
) -> bool {
    // SAFETY: caller contract.
    sentinel(|| Ok(unsafe { joint_ref(joint) }?.is_within_limits(position)))
}

/// Write the joint limits to `min_limit` and `max_limit`.
///
/// A null handle writes `(0, 0)`. Nothing is written if either output
/// pointer is null.
///
/// # Safety
/// `joint` must be null or a live handle; each output must be null or valid
/// for a write of one double.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_limits(
    joint: *const RobotJointHandle,
    min_limit: *mut c_double,
    max_limit: *mut c_double,
) {
    if min_limit.is_null() || max_limit.is_null() {
        debug!("robot_joint_get_limits called with a null output");
        return;
    }
    // SAFETY: caller contract.
    let limits = unsafe { robot_joint_get_limits_pair(joint) };
    // SAFETY: both outputs checked non-null, validity per caller contract.
    unsafe {
        *min_limit = limits.min;
        *max_limit = limits.max;
    }
}

/// Joint limits by value; `(0, 0)` for a null handle.
///
/// # Safety
/// `joint` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn robot_joint_get_limits_pair(joint: *const RobotJointHandle) -> LimitsPair {
    // SAFETY: caller contract.
    sentinel(|| Ok(LimitsPair::from(unsafe { joint_ref(joint) }?.limits())))
}

/// Number of joint handles currently allocated.
#[no_mangle]
pub extern "C" fn robot_joint_live_handles() -> usize {
    handle::live_handles()
}
