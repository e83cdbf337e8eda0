use std::time::Instant;

use common::{config::SliceConfig, progress::Progress};
use nalgebra::Vector3;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info};

use crate::{
    error::{Result, SliceError},
    intersection::intersect_triangle,
    mesh::Mesh,
    plane::Plane,
    section::{CrossSection, Segment},
    Pos, DEFAULT_TOLERANCE,
};

/// Knobs for a slicing operation. These never change the result, except for
/// `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceOptions {
    /// Edges whose direction is this close to parallel with the plane are
    /// treated as not intersecting it.
    pub tolerance: f64,
    /// Split the triangles across the rayon thread pool.
    pub parallel: bool,
    /// Meshes with fewer faces than this are always sliced on the calling
    /// thread.
    pub parallel_threshold: usize,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            parallel: true,
            parallel_threshold: 50_000,
        }
    }
}

impl SliceOptions {
    /// Rejects a tolerance that is negative, NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance.is_finite() && self.tolerance >= 0.0 {
            Ok(())
        } else {
            Err(SliceError::InvalidTolerance {
                tolerance: self.tolerance,
            })
        }
    }
}

impl From<&SliceConfig> for SliceOptions {
    fn from(config: &SliceConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            parallel: config.parallel,
            parallel_threshold: config.parallel_threshold,
        }
    }
}

/// Cuts a mesh with the plane through `plane_origin` perpendicular to
/// `plane_normal`, using the default options. The normal is normalized before
/// any triangle is looked at, so a zero normal fails with
/// [`SliceError::InvalidPlane`] even for an empty mesh.
pub fn slice(mesh: &Mesh, plane_origin: Pos, plane_normal: Vector3<f64>) -> Result<CrossSection> {
    slice_with(mesh, plane_origin, plane_normal, &SliceOptions::default())
}

/// Same as [`slice`] with custom [`SliceOptions`].
pub fn slice_with(
    mesh: &Mesh,
    plane_origin: Pos,
    plane_normal: Vector3<f64>,
    options: &SliceOptions,
) -> Result<CrossSection> {
    options.validate()?;
    let plane = Plane::new(plane_origin, plane_normal)?;
    Ok(slice_plane(mesh, &plane, options))
}

/// Cuts a mesh with an already validated plane. Picks the sequential or
/// parallel path according to `options`, both give identical output.
pub fn slice_plane(mesh: &Mesh, plane: &Plane, options: &SliceOptions) -> CrossSection {
    let start = Instant::now();

    let section = if options.parallel && mesh.face_count() >= options.parallel_threshold {
        slice_par(mesh, plane, options.tolerance)
    } else {
        slice_sequential(mesh, plane, options.tolerance)
    };

    debug!(
        "Sliced {} faces into {} segments in {:?}",
        mesh.face_count(),
        section.segments.len(),
        start.elapsed()
    );
    section
}

/// Intersect the mesh with a plane with linear time complexity, one triangle
/// at a time on the current thread.
pub fn slice_sequential(mesh: &Mesh, plane: &Plane, tolerance: f64) -> CrossSection {
    let segments = mesh
        .triangles()
        .iter()
        .enumerate()
        .filter_map(|(face, triangle)| {
            intersect_triangle(plane, triangle, tolerance).map(|x| Segment::new(x, face))
        })
        .collect();

    CrossSection::new(*plane, segments)
}

/// Parallel version of [`slice_sequential`]. Every worker handles a disjoint
/// run of triangles and rayon stitches the partial results back together in
/// triangle order.
pub fn slice_par(mesh: &Mesh, plane: &Plane, tolerance: f64) -> CrossSection {
    let segments = mesh
        .triangles()
        .par_iter()
        .enumerate()
        .filter_map(|(face, triangle)| {
            intersect_triangle(plane, triangle, tolerance).map(|x| Segment::new(x, face))
        })
        .collect();

    CrossSection::new(*plane, segments)
}

/// Slices the mesh with a horizontal plane at each of the given heights. The
/// layers are processed in parallel, each layer on a single thread. Results
/// are returned in the same order as `heights`.
pub fn slice_layers(
    mesh: &Mesh,
    heights: &[f64],
    options: &SliceOptions,
    progress: &Progress,
) -> Vec<CrossSection> {
    progress.set_total(heights.len() as u64);
    let start = Instant::now();

    let layers = heights
        .par_iter()
        .map(|&height| slice_sequential(mesh, &Plane::horizontal(height), options.tolerance))
        .inspect(|_| progress.add_complete(1))
        .collect::<Vec<_>>();

    progress.set_finished();
    info!(
        "Sliced {} layers ({} faces) in {:?}",
        layers.len(),
        mesh.face_count(),
        start.elapsed()
    );

    layers
}

/// Upper bound on the number of layers [`layer_heights`] will produce.
pub const MAX_LAYERS: usize = 1_000_000;

/// Heights of evenly spaced layers between `min` and `max`, sampled at the
/// middle of each layer so no plane sits on the very bottom or top of the
/// model. The last layer is cut short at `max`. An empty or inverted range
/// has no layers.
///
/// Fails with [`SliceError::InvalidLayerHeight`] if the layer height is not
/// positive or the range would need more than [`MAX_LAYERS`] layers.
pub fn layer_heights(min: f64, max: f64, layer_height: f64) -> Result<Vec<f64>> {
    if layer_height.is_nan() || layer_height <= 0.0 {
        return Err(SliceError::InvalidLayerHeight {
            layer_height,
            layers: f64::NAN,
        });
    }
    if max <= min {
        return Ok(Vec::new());
    }

    let layers = ((max - min) / layer_height).ceil();
    if !layers.is_finite() || layers > MAX_LAYERS as f64 {
        return Err(SliceError::InvalidLayerHeight {
            layer_height,
            layers,
        });
    }

    Ok((0..layers as usize)
        .map(|layer| {
            let bottom = min + layer as f64 * layer_height;
            let top = (bottom + layer_height).min(max);
            (bottom + top) / 2.0
        })
        .collect())
}
