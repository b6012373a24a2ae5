//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building operator matrices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The operator has no dense matrix representation.
    #[error("No matrix available for operator '{name}'")]
    MatrixUnavailable {
        /// Name of the operator.
        name: String,
    },

    /// Operator acts on the wrong number of wires.
    #[error("Operator '{name}' acts on {expected} wires, got {got}")]
    WireCountMismatch {
        /// Name of the operator.
        name: String,
        /// Expected number of wires.
        expected: usize,
        /// Actual number of wires provided.
        got: usize,
    },

    /// A user-supplied matrix or basis state is malformed.
    #[error("Invalid matrix for operator '{name}': {reason}")]
    InvalidMatrix {
        /// Name of the operator.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
