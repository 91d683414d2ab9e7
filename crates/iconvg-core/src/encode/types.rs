//! Core types for IconVG encoding.

use std::fmt;
use thiserror::Error;

/// Protocol state of the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Register selection, level of detail and path starts are allowed.
    #[default]
    Styling,
    /// Between a path start and its closing `ClosePathEndPath`.
    Drawing,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Styling => write!(f, "styling"),
            Mode::Drawing => write!(f, "drawing"),
        }
    }
}

/// Errors latched by the encoder.
///
/// Once an error is latched every further operation is ignored until the
/// encoder is reset, and finalizing returns the error instead of bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// An operation was issued in the wrong protocol mode.
    #[error("iconvg: {op} op in {mode} mode")]
    ModeViolation {
        /// Mode the operation requires.
        op: Mode,
        /// Mode the encoder was in.
        mode: Mode,
    },

    /// An argument was outside its valid range.
    #[error("iconvg: invalid {name}: {value}")]
    InvalidArgument { name: &'static str, value: i64 },

    /// The request needs a part of the format this encoder does not write.
    #[error("iconvg: unsupported feature: {0}")]
    UnsupportedFeature(&'static str),
}

impl EncodeError {
    pub(crate) fn styling_op_in_drawing_mode() -> Self {
        EncodeError::ModeViolation {
            op: Mode::Styling,
            mode: Mode::Drawing,
        }
    }

    pub(crate) fn drawing_op_in_styling_mode() -> Self {
        EncodeError::ModeViolation {
            op: Mode::Drawing,
            mode: Mode::Styling,
        }
    }
}
