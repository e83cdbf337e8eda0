use nalgebra::{Unit, Vector2, Vector3};

use crate::{
    error::{Result, SliceError},
    Pos, MIN_NORMAL_LENGTH,
};

/// A cutting plane, defined by a point on it and a unit normal. The normal is
/// always normalized on construction, so a [`Plane`] value is always valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Pos,
    normal: Unit<Vector3<f64>>,
}

impl Plane {
    /// Creates a plane, normalizing `normal`. Fails with
    /// [`SliceError::InvalidPlane`] if the normal is shorter than
    /// [`MIN_NORMAL_LENGTH`].
    pub fn new(origin: Pos, normal: Vector3<f64>) -> Result<Self> {
        let normal =
            Unit::try_new(normal, MIN_NORMAL_LENGTH).ok_or(SliceError::InvalidPlane { normal })?;
        Ok(Self { origin, normal })
    }

    /// The horizontal plane `z = height`, facing up.
    pub fn horizontal(height: f64) -> Self {
        Self {
            origin: Pos::new(0.0, 0.0, height),
            normal: Vector3::z_axis(),
        }
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal.into_inner()
    }

    /// Distance from the plane, positive on the side the normal points to.
    pub fn signed_distance(&self, point: &Pos) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    pub fn contains(&self, point: &Pos, tolerance: f64) -> bool {
        self.signed_distance(point).abs() < tolerance
    }

    /// Two orthonormal vectors spanning the plane. For a plane facing +Z
    /// these are exactly +X and +Y, so projected coordinates match a top
    /// down view of the model.
    pub fn basis(&self) -> (Vector3<f64>, Vector3<f64>) {
        let n = self.normal.into_inner();

        // Near-horizontal planes get their basis from +Y, everything else
        // keeps world up (+Z projected onto the plane) as its v axis.
        if n.z.abs() >= 0.9 {
            let u = Vector3::y().cross(&n).normalize();
            (u, n.cross(&u))
        } else {
            let v = n.cross(&Vector3::z().cross(&n)).normalize();
            (v.cross(&n), v)
        }
    }

    /// Projects a point onto the plane's 2D coordinate system.
    pub fn project(&self, point: &Pos) -> Vector2<f64> {
        let (u, v) = self.basis();
        let offset = point - self.origin;
        Vector2::new(offset.dot(&u), offset.dot(&v))
    }
}
