//! Error types for vecmath

use crate::runtime::Backend;
use thiserror::Error;

/// Result type alias using vecmath's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure category of an [`Error`]
///
/// Every error variant maps onto exactly one kind, so callers can branch on
/// the category without matching each variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Absent, empty or malformed construction input
    InvalidArgument,
    /// Index outside the container bounds
    OutOfRange,
    /// Operands are incompatible with each other
    InvalidOperation,
    /// Operation is undefined for this input or backend
    NotSupported,
}

/// Errors that can occur in vecmath operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid argument provided to a constructor or operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Operand shapes are incompatible for an operation
    #[error("Shape mismatch in '{op}': {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        /// The operation name
        op: &'static str,
        /// Left-hand side shape
        lhs: Vec<usize>,
        /// Right-hand side shape
        rhs: Vec<usize>,
    },

    /// Operands were built by different backends
    #[error("Backend mismatch: {lhs} vs {rhs}")]
    BackendMismatch {
        /// Backend of the left-hand side
        lhs: Backend,
        /// Backend of the right-hand side
        rhs: Backend,
    },

    /// Operation is not defined for this input
    #[error("Operation '{op}' not supported: {reason}")]
    NotSupported {
        /// The operation name
        op: &'static str,
        /// Why it is not supported
        reason: String,
    },

    /// A pivot column was entirely zero during LU decomposition
    #[error("Matrix is singular: pivot column {column} is zero")]
    SingularMatrix {
        /// The pivot column that had no nonzero candidate
        column: usize,
    },

    /// Gradient descent hit its iteration limit
    #[error("Gradient descent did not converge after {iterations} iterations")]
    NotConverged {
        /// Number of iterations performed
        iterations: usize,
    },
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(op: &'static str, lhs: &[usize], rhs: &[usize]) -> Self {
        Self::ShapeMismatch {
            op,
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create a not-supported error
    pub fn not_supported(op: &'static str, reason: impl Into<String>) -> Self {
        Self::NotSupported {
            op,
            reason: reason.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::IndexOutOfBounds { .. } => ErrorKind::OutOfRange,
            Self::ShapeMismatch { .. } | Self::BackendMismatch { .. } | Self::NotConverged { .. } => {
                ErrorKind::InvalidOperation
            }
            Self::NotSupported { .. } | Self::SingularMatrix { .. } => ErrorKind::NotSupported,
        }
    }
}
