//! Planar cross-sections of triangle meshes. Given a [`mesh::Mesh`] and a
//! cutting plane, [`slicer::slice`] returns the raw line segments where the
//! plane crosses the surface, one per crossed triangle.

use nalgebra::Vector3;

pub mod error;
pub mod format;
pub mod intersection;
pub mod mesh;
pub mod plane;
pub mod section;
pub mod slicer;

pub use error::{Result, SliceError};

pub type Pos = Vector3<f64>;

/// Edges closer than this to being parallel with the plane are never
/// intersected.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Plane normals shorter than this can not be normalized.
pub const MIN_NORMAL_LENGTH: f64 = 1e-6;
