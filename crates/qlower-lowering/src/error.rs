//! Error types for the lowering crate.

use qlower_ir::{IrError, Wire};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while lowering a tape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LowerError {
    /// A wire label has no entry in the wire map.
    #[error("Wire {wire} not found in wire map{}", format_context(.context))]
    UnknownWire {
        /// The wire that was not found.
        wire: Wire,
        /// Optional operation or observable name for context.
        context: Option<String>,
    },

    /// The matrix of an operator could not be computed.
    #[error(transparent)]
    Matrix(#[from] IrError),

    /// Invalid lowering configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LowerError {
    /// Attach the name of the operation or observable being lowered.
    #[must_use]
    pub fn in_context(self, name: &str) -> Self {
        match self {
            LowerError::UnknownWire {
                wire,
                context: None,
            } => LowerError::UnknownWire {
                wire,
                context: Some(name.to_string()),
            },
            other => other,
        }
    }
}

/// Helper function to format optional context.
#[allow(clippy::ref_option)]
fn format_context(context: &Option<String>) -> String {
    match context {
        Some(name) => format!(" (in: {name})"),
        None => String::new(),
    }
}

/// Result type for lowering operations.
pub type LowerResult<T> = Result<T, LowerError>;
