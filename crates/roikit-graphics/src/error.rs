//! Error handling for RoiKit graphics.
//!
//! All error types use `thiserror` for ergonomic error handling. Geometry
//! queries (hit-testing, mask generation, drag application) never fail;
//! errors arise only at the externalization boundary (property assignment,
//! kind-tag construction, mode parsing).

use thiserror::Error;

/// Graphic error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphicError {
    /// Unknown kind tag passed to the factory
    #[error("unknown graphic kind: {0}")]
    UnknownKind(String),

    /// Property name not defined for this graphic kind
    #[error("unknown property '{name}' for {kind} graphic")]
    UnknownProperty {
        /// The graphic kind tag.
        kind: &'static str,
        /// The requested property name.
        name: String,
    },

    /// Property assigned a value of the wrong type or arity
    #[error("property '{name}' expects {expected}")]
    PropertyType {
        /// The property name.
        name: String,
        /// The expected value shape, e.g. "number" or "point".
        expected: &'static str,
    },

    /// Ring mode string not one of low-pass/high-pass/band-pass
    #[error("unrecognized ring mode: {0}")]
    UnrecognizedRingMode(String),
}

/// Result alias for graphic operations.
pub type Result<T> = std::result::Result<T, GraphicError>;
