//! # Ownership Wrapper
//!
//! [`JointOwner`] is the foreign-side view of a joint: it holds one opaque
//! handle and talks to it only through the C ABI in [`crate::ffi`], exactly as
//! a C++ `unique_ptr` with a custom deleter would. It is the reference client
//! for the ABI and the piece that makes double-free impossible for callers
//! who use it:
//!
//! - it cannot be cloned;
//! - [`JointOwner::take`], [`JointOwner::into_raw`] and [`JointOwner::release`]
//!   null the stored handle before anything else can observe it;
//! - `Drop` frees a non-null handle once.
//!
//! An empty owner (construction failed, or already released) answers every
//! query with the same safe defaults as the ABI.

use crate::codec::{Mat4d, Vec3d};
use crate::ffi::{self, JointConfigFfi};
use crate::handle::RobotJointHandle;
use crate::translate::BridgeError;
use robot_joint::{JointConfig, Matrix4, Vector3};
use std::ffi::{c_uint, CStr, CString};
use std::{mem, ptr};
use tracing::debug;

/// Move-only owner of one joint handle.
#[derive(Debug)]
pub struct JointOwner {
    raw: *mut RobotJointHandle,
}

// SAFETY: the joint behind the handle is immutable and owned exclusively by
// this value, so moving the owner to another thread moves sole access with it.
unsafe impl Send for JointOwner {}

impl JointOwner {
    /// An owner that holds nothing.
    pub const fn empty() -> Self {
        Self {
            raw: ptr::null_mut(),
        }
    }

    /// Create a joint; the owner is empty if the boundary refused the name.
    pub fn new(name: &str) -> Self {
        Self::try_new(name).unwrap_or_else(|error| {
            debug!(%error, "Joint construction failed, owner is empty");
            Self::empty()
        })
    }

    pub fn try_new(name: &str) -> Result<Self, BridgeError> {
        let name = CString::new(name).map_err(|_| crate::codec::CodecError::InteriorNul)?;
        // SAFETY: `name` is a valid NUL-terminated string for the whole call.
        let raw = unsafe { ffi::robot_joint_new(name.as_ptr()) };
        Self::adopt(raw)
    }

    /// Create a fully configured joint through the ABI.
    pub fn from_config(config: &JointConfig) -> Result<Self, BridgeError> {
        let name = CString::new(config.name.as_str())
            .map_err(|_| crate::codec::CodecError::InteriorNul)?;
        let raw_config = JointConfigFfi {
            name: name.as_ptr(),
            parent_link_to_joint_origin: Mat4d::from_isometry(&config.parent_link_to_joint_origin),
            parent_link_index: crate::codec::index_to_c_uint(config.parent_link_index)?,
            child_link_index: crate::codec::index_to_c_uint(config.child_link_index)?,
            index: crate::codec::index_to_c_uint(config.index)?,
            dof_index: crate::codec::index_to_c_uint(config.dof_index)?,
            axis: Vec3d::from(&config.axis),
            limits: config.limits.as_tuple().into(),
        };
        // SAFETY: `raw_config` and the name it borrows outlive the call.
        let raw = unsafe { ffi::robot_joint_new_with_config(&raw_config) };
        Self::adopt(raw)
    }

    fn adopt(raw: *mut RobotJointHandle) -> Result<Self, BridgeError> {
        if raw.is_null() {
            Err(BridgeError::ConstructionFailed)
        } else {
            Ok(Self { raw })
        }
    }

    /// Take ownership of a handle produced by the ABI.
    ///
    /// # Safety
    /// `raw` must be null or a live handle that nothing else will free.
    pub unsafe fn from_raw(raw: *mut RobotJointHandle) -> Self {
        Self { raw }
    }

    /// Give up ownership without freeing. The caller must free the handle.
    pub fn into_raw(mut self) -> *mut RobotJointHandle {
        mem::replace(&mut self.raw, ptr::null_mut())
    }

    /// Move the handle into a new owner, leaving this one empty.
    pub fn take(&mut self) -> JointOwner {
        JointOwner {
            raw: mem::replace(&mut self.raw, ptr::null_mut()),
        }
    }

    /// Free the handle now. Later calls, and the eventual drop, do nothing.
    pub fn release(&mut self) {
        let raw = mem::replace(&mut self.raw, ptr::null_mut());
        if !raw.is_null() {
            // SAFETY: `raw` was live and is no longer reachable from `self`.
            unsafe { ffi::robot_joint_free(raw) };
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_null()
    }

    pub fn as_ptr(&self) -> *const RobotJointHandle {
        self.raw
    }

    /// Joint name; empty for an empty owner.
    pub fn name(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        // SAFETY: live handle owned by self.
        let raw_name = unsafe { ffi::robot_joint_get_name(self.raw) };
        if raw_name.is_null() {
            return String::new();
        }
        // SAFETY: non-null strings from the ABI are NUL-terminated UTF-8.
        let name = unsafe { CStr::from_ptr(raw_name) }.to_string_lossy().into_owned();
        // SAFETY: the string came from robot_joint_get_name and is freed once.
        unsafe { ffi::robot_joint_free_string(raw_name) };
        name
    }

    pub fn index(&self) -> c_uint {
        // SAFETY: null or live handle owned by self.
        unsafe { ffi::robot_joint_get_index(self.raw) }
    }

    pub fn parent_link_index(&self) -> c_uint {
        // SAFETY: null or live handle owned by self.
        unsafe { ffi::robot_joint_get_parent_link_index(self.raw) }
    }

    pub fn child_link_index(&self) -> c_uint {
        // SAFETY: null or live handle owned by self.
        unsafe { ffi::robot_joint_get_child_link_index(self.raw) }
    }

    pub fn dof_index(&self) -> c_uint {
        // SAFETY: null or live handle owned by self.
        unsafe { ffi::robot_joint_get_dof_index(self.raw) }
    }

    pub fn axis(&self) -> Vector3<f64> {
        // SAFETY: null or live handle owned by self.
        unsafe { ffi::robot_joint_get_axis(self.raw) }.into()
    }

    /// Joint transform for the given variables; identity when empty.
    pub fn calculate_transform(&self, variables: &[f64]) -> Matrix4<f64> {
        // Only the first variable is read, so clamping the length is harmless.
        let size = c_uint::try_from(variables.len()).unwrap_or(c_uint::MAX);
        // SAFETY: `variables` is valid for `size` reads; handle is null or live.
        unsafe { ffi::robot_joint_calculate_transform(self.raw, variables.as_ptr(), size) }
            .as_matrix()
    }

    pub fn parent_link_to_joint_origin(&self) -> Matrix4<f64> {
        // SAFETY: null or live handle owned by self.
        unsafe { ffi::robot_joint_get_parent_link_to_joint_origin(self.raw) }.as_matrix()
    }

    pub fn is_within_limits(&self, position: f64) -> bool {
        // SAFETY: null or live handle owned by self.
        unsafe { ffi::robot_joint_is_within_limits(self.raw, position) }
    }

    /// `(min, max)`; `(0, 0)` when empty.
    pub fn limits(&self) -> (f64, f64) {
        // SAFETY: null or live handle owned by self.
        let pair = unsafe { ffi::robot_joint_get_limits_pair(self.raw) };
        (pair.min, pair.max)
    }
}

impl Default for JointOwner {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for JointOwner {
    fn drop(&mut self) {
        self.release();
    }
}
