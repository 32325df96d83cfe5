//! # Opaque Handle Registry
//!
//! A [`RobotJointHandle`] is allocated on the Rust heap and handed out as a
//! raw pointer. The foreign side only stores that pointer and passes it back;
//! it never looks inside. Every handle produced by [`into_raw`] must be given
//! to [`release`] exactly once.
//!
//! The registry keeps a live-handle count so tests can verify that every
//! allocation is paired with a release.

use robot_joint::Joint;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

static LIVE_HANDLES: AtomicUsize = AtomicUsize::new(0);

/// Opaque handle to a Rust [`Joint`]. Only ever seen behind a pointer.
pub struct RobotJointHandle {
    joint: Joint,
}

impl RobotJointHandle {
    pub fn joint(&self) -> &Joint {
        &self.joint
    }
}

/// Move a joint onto the heap and mint its token.
pub fn into_raw(joint: Joint) -> *mut RobotJointHandle {
    let live = LIVE_HANDLES.fetch_add(1, Ordering::SeqCst) + 1;
    debug!(name = joint.name(), live, "Allocated joint handle");
    Box::into_raw(Box::new(RobotJointHandle { joint }))
}

/// Destroy the joint behind `handle`. Returns `false` for a null handle.
///
/// # Safety
/// `handle` must be null or a pointer returned by [`into_raw`] that has not
/// been released yet. It must not be used afterwards.
pub unsafe fn release(handle: *mut RobotJointHandle) -> bool {
    if handle.is_null() {
        return false;
    }
    // SAFETY: produced by Box::into_raw in into_raw and not yet released.
    let boxed = unsafe { Box::from_raw(handle) };
    let live = LIVE_HANDLES.fetch_sub(1, Ordering::SeqCst) - 1;
    debug!(name = boxed.joint.name(), live, "Released joint handle");
    true
}

/// Borrow the joint behind a live handle. `None` for null.
///
/// # Safety
/// `handle` must be null or a live pointer from [`into_raw`], and must stay
/// live for `'a`.
pub unsafe fn borrow<'a>(handle: *const RobotJointHandle) -> Option<&'a Joint> {
    trace!(?handle, "Borrowing joint handle");
    // SAFETY: live per the caller contract.
    unsafe { handle.as_ref() }.map(RobotJointHandle::joint)
}

/// Number of handles allocated and not yet released.
pub fn live_handles() -> usize {
    LIVE_HANDLES.load(Ordering::SeqCst)
}
