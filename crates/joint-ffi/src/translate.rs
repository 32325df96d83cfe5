//! # Error Translation Layer
//!
//! A failure on the Rust side must never reach the foreign caller as an
//! unwinding panic. Every boundary call runs through [`catch_faults`], and
//! the result is then translated by exactly one of two policies:
//!
//! | Policy | Output | Used by |
//! |--------|--------|---------|
//! | [`Sentinel`] | the value, or its [`SafeDefault`] on failure | the C ABI in [`crate::ffi`] |
//! | [`Translate`] | `Result<T, BridgeError>` carrying the message | the safe bridge in [`crate::bridge`] |
//!
//! A boundary picks one policy for all of its entry points. The C ABI also
//! offers status-code entry points through [`Sentinel::status`], which report
//! a [`BoundaryStatus`] instead of a default value.

use crate::codec::{CodecError, LimitsPair, Mat4d, Vec3d};
use std::any::Any;
use std::ffi::c_uint;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use thiserror::Error;
use tracing::{debug, warn};

/// Every failure a boundary call can produce.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("null joint handle")]
    NullHandle,

    #[error("joint construction failed at the boundary")]
    ConstructionFailed,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Joint(#[from] robot_joint::Error),

    #[error("panic inside joint call: {0}")]
    Panicked(String),
}

/// Discriminant codes for the status-code entry points.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryStatus {
    Success = 0,
    NullInput = 1,
    InvalidEncoding = 2,
    OutOfRange = 3,
    InvalidConfiguration = 4,
    Panicked = 5,
}

impl From<&BridgeError> for BoundaryStatus {
    fn from(error: &BridgeError) -> Self {
        match error {
            BridgeError::NullHandle | BridgeError::Codec(CodecError::NullPointer) => {
                BoundaryStatus::NullInput
            }
            BridgeError::Codec(CodecError::InvalidUtf8(_) | CodecError::InteriorNul) => {
                BoundaryStatus::InvalidEncoding
            }
            BridgeError::Codec(CodecError::WrongLength { .. } | CodecError::OutOfRange(_))
            | BridgeError::Joint(robot_joint::Error::InvalidVariableCount { .. }) => {
                BoundaryStatus::OutOfRange
            }
            BridgeError::ConstructionFailed
            | BridgeError::Codec(CodecError::NotRigid(_))
            | BridgeError::Joint(
                robot_joint::Error::InvalidConfiguration { .. }
                | robot_joint::Error::NonFiniteVariable { .. },
            ) => BoundaryStatus::InvalidConfiguration,
            BridgeError::Panicked(_) => BoundaryStatus::Panicked,
        }
    }
}

/// Run `f`, converting a panic into [`BridgeError::Panicked`].
///
/// The joint behind a handle is immutable, so a panic cannot leave it in a
/// torn state; asserting unwind safety is sound here.
pub fn catch_faults<T, F>(f: F) -> Result<T, BridgeError>
where
    F: FnOnce() -> Result<T, BridgeError>,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(%message, "Caught panic at joint boundary");
        Err(BridgeError::Panicked(message))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// How a boundary reports failures to its foreign caller.
pub trait ErrorTranslation<T> {
    type Output;

    fn translate(result: Result<T, BridgeError>) -> Self::Output;

    /// Run a boundary call under the fault guard and translate its result.
    fn call<F>(f: F) -> Self::Output
    where
        F: FnOnce() -> Result<T, BridgeError>,
    {
        Self::translate(catch_faults(f))
    }
}

/// Defensive-primitives policy: failures become documented safe defaults.
pub struct Sentinel;

/// Automatic fault translation policy: failures become catchable errors.
pub struct Translate;

impl<T: SafeDefault> ErrorTranslation<T> for Sentinel {
    type Output = T;

    fn translate(result: Result<T, BridgeError>) -> T {
        result.unwrap_or_else(|error| {
            debug!(%error, "Boundary call failed, returning safe default");
            T::safe_default()
        })
    }
}

impl<T> ErrorTranslation<T> for Translate {
    type Output = Result<T, BridgeError>;

    fn translate(result: Result<T, BridgeError>) -> Result<T, BridgeError> {
        result
    }
}

/// Run a sentinel-style boundary call; the return type picks the default.
pub fn sentinel<T, F>(f: F) -> T
where
    T: SafeDefault,
    F: FnOnce() -> Result<T, BridgeError>,
{
    <Sentinel as ErrorTranslation<T>>::call(f)
}

/// Run a translated boundary call.
pub fn translated<T, F>(f: F) -> Result<T, BridgeError>
where
    F: FnOnce() -> Result<T, BridgeError>,
{
    <Translate as ErrorTranslation<T>>::call(f)
}

impl Sentinel {
    /// Status-code flavour of the sentinel policy.
    pub fn status<F>(f: F) -> BoundaryStatus
    where
        F: FnOnce() -> Result<(), BridgeError>,
    {
        match catch_faults(f) {
            Ok(()) => BoundaryStatus::Success,
            Err(error) => {
                debug!(%error, "Boundary call failed");
                BoundaryStatus::from(&error)
            }
        }
    }
}

/// The value a sentinel-style entry point returns when it cannot answer.
pub trait SafeDefault {
    fn safe_default() -> Self;
}

impl SafeDefault for () {
    fn safe_default() -> Self {}
}

impl SafeDefault for bool {
    fn safe_default() -> Self {
        false
    }
}

impl SafeDefault for c_uint {
    fn safe_default() -> Self {
        0
    }
}

impl SafeDefault for usize {
    fn safe_default() -> Self {
        0
    }
}

impl SafeDefault for Mat4d {
    fn safe_default() -> Self {
        Mat4d::IDENTITY
    }
}

impl SafeDefault for Vec3d {
    fn safe_default() -> Self {
        Vec3d::default()
    }
}

impl SafeDefault for LimitsPair {
    fn safe_default() -> Self {
        LimitsPair::default()
    }
}

impl<T> SafeDefault for *mut T {
    fn safe_default() -> Self {
        ptr::null_mut()
    }
}

impl<T> SafeDefault for *const T {
    fn safe_default() -> Self {
        ptr::null()
    }
}
