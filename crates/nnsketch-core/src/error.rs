//! Error types for node, layer and label operations.
//!
//! Every check runs before the first drawing call of the operation that
//! performs it, so an error never leaves half a diagram on the surface.

use std::fmt;

use thiserror::Error;

/// Which edge of a node an anchor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSide {
    /// Anchors on the left edge, where incoming connections end.
    Input,
    /// Anchors on the right edge, where outgoing connections start.
    Output,
}

impl fmt::Display for AnchorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Errors raised by the drawing core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    /// A dimension, count or per-item list did not satisfy its contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A per-target connection color list whose length differs from the
    /// number of target nodes.
    #[error("next layer has {expected} nodes but {got} connection colors were given")]
    ColorCountMismatch { expected: usize, got: usize },

    /// An anchor index beyond the anchors a node was built with.
    #[error("{side} anchor index {index} is out of range for a node with {count} {side} anchors")]
    AnchorOutOfRange {
        side: AnchorSide,
        index: usize,
        count: usize,
    },

    /// An external label image could not be obtained.
    #[error("label image unavailable: {0}")]
    ImageUnavailable(String),
}

impl DrawError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
