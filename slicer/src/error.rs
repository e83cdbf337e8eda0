use thiserror::Error;

use crate::Pos;

pub type Result<T> = std::result::Result<T, SliceError>;

/// Errors caused by invalid input to the slicing kernel. Nothing here is
/// transient, calling again with the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SliceError {
    /// The plane normal is too short to be normalized.
    #[error("plane normal {normal:?} has near-zero length")]
    InvalidPlane { normal: Pos },

    /// A face does not reference exactly three usable vertices.
    #[error("face {face} is malformed: {reason}")]
    MalformedTriangle { face: usize, reason: String },

    /// The edge tolerance is negative, NaN or infinite.
    #[error("tolerance {tolerance} must be a finite, non-negative number")]
    InvalidTolerance { tolerance: f64 },

    /// The layer height is not positive or would produce more than
    /// [`crate::slicer::MAX_LAYERS`] layers.
    #[error("layer height {layer_height} gives no usable layer stack ({layers} layers)")]
    InvalidLayerHeight { layer_height: f64, layers: f64 },
}

impl SliceError {
    pub(crate) fn malformed(face: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTriangle {
            face,
            reason: reason.into(),
        }
    }
}
