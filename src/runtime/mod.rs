//! Backend selection and the strategy registry
//!
//! A [`Backend`] records which storage layout and which family of operation
//! strategies a container uses. It is resolved from hardware capability once
//! per process (or pinned explicitly) and carried by every container, so all
//! later dispatch is a single match instead of scattered capability checks.
//!
//! [`Context`] is the registry handed to constructors. Most callers use
//! [`Context::global`]; tests and benchmarks build their own to compare the
//! serial and SIMD strategies side by side.

pub mod simd;

use crate::dtype::Element;
use crate::error::Result;
use crate::ops::{
    MatrixOps, SerialMatrixOps, SerialVectorOps, SimdMatrixOps, SimdVectorOps, VectorOps,
};
use crate::tensor::{Matrix, Vector, VectorizationMode};
use simd::{SimdLevel, detect_simd};
use std::fmt;
use std::sync::OnceLock;

static SERIAL_VECTOR_OPS: SerialVectorOps = SerialVectorOps;
static SIMD_VECTOR_OPS: SimdVectorOps = SimdVectorOps;
static SERIAL_MATRIX_OPS: SerialMatrixOps = SerialMatrixOps;
static SIMD_MATRIX_OPS: SimdMatrixOps = SimdMatrixOps;

/// Returns true if the CPU supports the SIMD kernels
///
/// Resolved once per process; every context built with [`Backend::detect`]
/// uses the lane layout exactly when this is true.
#[inline]
pub fn is_hardware_accelerated() -> bool {
    detect_simd().is_simd()
}

/// Storage layout and strategy family of a container
///
/// A SIMD backend can only come from [`Backend::detect`], so one is never
/// created on hardware that lacks the instructions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Backend {
    level: SimdLevel,
}

impl Backend {
    /// Best backend for the current CPU
    #[inline]
    pub fn detect() -> Self {
        Self {
            level: detect_simd(),
        }
    }

    /// Flat storage with serial strategies, available everywhere
    #[inline]
    pub const fn serial() -> Self {
        Self {
            level: SimdLevel::Scalar,
        }
    }

    /// Returns true if containers are split into SIMD lanes
    #[inline]
    pub const fn is_simd(self) -> bool {
        self.level.is_simd()
    }

    /// Instruction set used by this backend
    #[inline]
    pub const fn level(self) -> SimdLevel {
        self.level
    }

    /// Lane width `W` for element type `T` (1 for the serial backend)
    #[inline]
    pub const fn lanes<T: Element>(self) -> usize {
        self.level.lanes_for(T::DTYPE)
    }

    /// Vector strategy for this backend
    pub fn vector_ops<T: Element>(self) -> &'static dyn VectorOps<T> {
        if self.is_simd() {
            &SIMD_VECTOR_OPS
        } else {
            &SERIAL_VECTOR_OPS
        }
    }

    /// Matrix strategy for this backend
    pub fn matrix_ops<T: Element>(self) -> &'static dyn MatrixOps<T> {
        if self.is_simd() {
            &SIMD_MATRIX_OPS
        } else {
            &SERIAL_MATRIX_OPS
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_simd() {
            write!(f, "simd({})", self.level)
        } else {
            f.write_str("serial")
        }
    }
}

/// Strategy registry passed to container constructors
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Context {
    backend: Backend,
}

static GLOBAL_CONTEXT: OnceLock<Context> = OnceLock::new();

impl Context {
    /// Create a context pinned to `backend`
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Context using the serial strategies
    pub const fn serial() -> Self {
        Self::new(Backend::serial())
    }

    /// Process-wide context, resolved from hardware capability on first use
    pub fn global() -> &'static Context {
        GLOBAL_CONTEXT.get_or_init(|| {
            let context = Context::new(Backend::detect());
            log::debug!("vecmath backend selected: {}", context.backend);
            context
        })
    }

    /// Backend shared by every container this context builds
    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Vector strategy for element type `T`
    pub fn vector_ops<T: Element>(&self) -> &'static dyn VectorOps<T> {
        self.backend.vector_ops()
    }

    /// Matrix strategy for element type `T`
    pub fn matrix_ops<T: Element>(&self) -> &'static dyn MatrixOps<T> {
        self.backend.matrix_ops()
    }

    /// Shorthand for [`Vector::from_slice`]
    pub fn vector<T: Element>(&self, data: &[T]) -> Result<Vector<T>> {
        Vector::from_slice(data, self)
    }

    /// Shorthand for [`Matrix::from_slice`]
    pub fn matrix<T: Element>(
        &self,
        data: &[T],
        rows: usize,
        cols: usize,
        mode: VectorizationMode,
    ) -> Result<Matrix<T>> {
        Matrix::from_slice(data, rows, cols, mode, self)
    }
}

impl Default for Context {
    fn default() -> Self {
        *Self::global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_backend() {
        let backend = Backend::serial();
        assert!(!backend.is_simd());
        assert_eq!(backend.lanes::<f32>(), 1);
        assert_eq!(backend.to_string(), "serial");
    }

    #[test]
    fn test_detected_backend_matches_capability() {
        let backend = Backend::detect();
        assert_eq!(backend.is_simd(), is_hardware_accelerated());
        if backend.is_simd() {
            assert_eq!(backend.lanes::<f32>(), 8);
            assert_eq!(backend.lanes::<f64>(), 4);
        }
    }

    #[test]
    fn test_global_context_is_stable() {
        let a = Context::global();
        let b = Context::global();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.backend(), Backend::detect());
    }
}
