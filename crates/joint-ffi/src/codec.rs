//! # Boundary Value Codec
//!
//! Conversions between the resource core's value types and the primitive,
//! ownership-free encodings that may cross the C ABI:
//!
//! - transforms travel as [`Mat4d`], sixteen doubles in column-major order
//!   (element `k` is row `k % 4`, column `k / 4`). This is the storage order
//!   of both `nalgebra::Matrix4` and Eigen's default matrices, so either side
//!   can reinterpret the buffer without an element loop;
//! - names travel as NUL-terminated UTF-8;
//! - limits travel as a two-element array or a [`LimitsPair`].

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion, Vector3};
use std::ffi::{c_char, c_double, c_uint, CStr, CString};
use thiserror::Error;

/// Tolerance used when checking that a decoded matrix is a rigid transform.
const RIGID_TOLERANCE: f64 = 1e-9;

/// Errors raised while decoding boundary values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodecError {
    #[error("null pointer passed across the boundary")]
    NullPointer,

    #[error("text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("text contains an interior NUL byte")]
    InteriorNul,

    #[error("expected {expected} elements, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("value {0} does not fit the boundary integer type")]
    OutOfRange(usize),

    #[error("matrix is not a rigid transform: {0}")]
    NotRigid(&'static str),
}

/// C-compatible 4x4 transformation matrix, column-major.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4d {
    pub data: [c_double; 16],
}

impl Mat4d {
    pub const IDENTITY: Mat4d = Mat4d {
        data: [
            1.0, 0.0, 0.0, 0.0, // Column 0
            0.0, 1.0, 0.0, 0.0, // Column 1
            0.0, 0.0, 1.0, 0.0, // Column 2
            0.0, 0.0, 0.0, 1.0, // Column 3
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Copies the matrix storage as-is; nalgebra already stores column-major.
    pub fn from_matrix(matrix: &Matrix4<f64>) -> Self {
        let mut data = [0.0; 16];
        data.copy_from_slice(matrix.as_slice());
        Self { data }
    }

    pub fn from_isometry(transform: &Isometry3<f64>) -> Self {
        Self::from_matrix(&transform.to_homogeneous())
    }

    /// Exact reinterpretation of the buffer as a matrix.
    pub fn as_matrix(&self) -> Matrix4<f64> {
        Matrix4::from_column_slice(&self.data)
    }

    /// Decode into a rigid transform.
    ///
    /// # Errors
    /// [`CodecError::NotRigid`] if the buffer holds non-finite values, the
    /// bottom row is not `[0, 0, 0, 1]`, or the rotation block is not a proper
    /// orthonormal rotation.
    pub fn to_isometry(&self) -> Result<Isometry3<f64>, CodecError> {
        if !self.data.iter().all(|v| v.is_finite()) {
            return Err(CodecError::NotRigid("non-finite element"));
        }

        let matrix = self.as_matrix();
        let bottom = [matrix[(3, 0)], matrix[(3, 1)], matrix[(3, 2)], matrix[(3, 3)] - 1.0];
        if bottom.iter().any(|v| v.abs() > RIGID_TOLERANCE) {
            return Err(CodecError::NotRigid("bottom row must be [0, 0, 0, 1]"));
        }

        let rotation: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        if (rotation.transpose() * rotation - Matrix3::identity()).norm() > RIGID_TOLERANCE {
            return Err(CodecError::NotRigid("rotation block is not orthonormal"));
        }
        if rotation.determinant() <= 0.0 {
            return Err(CodecError::NotRigid("rotation block is a reflection"));
        }

        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation));
        let translation = Translation3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        Ok(Isometry3::from_parts(translation, rotation))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.to_vec()
    }
}

impl Default for Mat4d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<&Isometry3<f64>> for Mat4d {
    fn from(transform: &Isometry3<f64>) -> Self {
        Self::from_isometry(transform)
    }
}

/// Decode a flat slice that must hold exactly sixteen column-major elements.
pub fn transform_from_slice(data: &[f64]) -> Result<Mat4d, CodecError> {
    let data: [f64; 16] = data.try_into().map_err(|_| CodecError::WrongLength {
        expected: 16,
        actual: data.len(),
    })?;
    Ok(Mat4d { data })
}

/// C-compatible 3-vector.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3d {
    pub data: [c_double; 3],
}

impl From<&Vector3<f64>> for Vec3d {
    fn from(v: &Vector3<f64>) -> Self {
        Self {
            data: [v.x, v.y, v.z],
        }
    }
}

impl From<Vec3d> for Vector3<f64> {
    fn from(v: Vec3d) -> Self {
        Vector3::from(v.data)
    }
}

/// C-compatible `(min, max)` limit pair.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimitsPair {
    pub min: c_double,
    pub max: c_double,
}

impl From<(f64, f64)> for LimitsPair {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Decode a limits array. Anything other than exactly two elements decodes
/// to `(0, 0)`; callers that care must check the length themselves.
pub fn limits_from_slice(data: &[f64]) -> (f64, f64) {
    match data {
        [min, max] => (*min, *max),
        _ => (0.0, 0.0),
    }
}

pub fn limits_to_array((min, max): (f64, f64)) -> [f64; 2] {
    [min, max]
}

/// Borrow a caller-owned NUL-terminated string as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated buffer that stays valid
/// and unmodified for `'a`.
pub unsafe fn decode_str<'a>(ptr: *const c_char) -> Result<&'a str, CodecError> {
    if ptr.is_null() {
        return Err(CodecError::NullPointer);
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let text = unsafe { CStr::from_ptr(ptr) };
    Ok(text.to_str()?)
}

/// Allocate a boundary string. Ownership passes to the caller, who must hand
/// it back to [`free_string`].
pub fn encode_string(text: &str) -> Result<*mut c_char, CodecError> {
    CString::new(text)
        .map(CString::into_raw)
        .map_err(|_| CodecError::InteriorNul)
}

/// Release a string produced by [`encode_string`]. Null is ignored.
///
/// # Safety
/// `ptr` must be null or a pointer returned by [`encode_string`] that has not
/// been freed yet.
pub unsafe fn free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        // SAFETY: allocated by CString::into_raw in encode_string.
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Borrow a caller-owned array of doubles.
///
/// # Safety
/// `ptr` must be null or valid for reads of `len` doubles for `'a`.
pub unsafe fn decode_f64_slice<'a>(ptr: *const c_double, len: usize) -> Result<&'a [f64], CodecError> {
    if ptr.is_null() {
        return Err(CodecError::NullPointer);
    }
    if len > isize::MAX as usize / std::mem::size_of::<f64>() {
        return Err(CodecError::OutOfRange(len));
    }
    // SAFETY: non-null, length bounded, validity guaranteed by the caller.
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

pub fn index_to_c_uint(value: usize) -> Result<c_uint, CodecError> {
    c_uint::try_from(value).map_err(|_| CodecError::OutOfRange(value))
}
