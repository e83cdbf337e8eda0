use std::ops::Deref;

use nalgebra::Vector2;

use crate::{plane::Plane, Pos};

/// Where a plane crosses a single triangle. The endpoints are in the order
/// the triangle's edges were visited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Pos,
    pub end: Pos,
    /// Index of the triangle this segment was cut from.
    pub face: usize,
}

/// The raw result of cutting a mesh with a plane: unordered, unconnected
/// segments, stored in the order of the triangles that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    pub plane: Plane,
    pub segments: Vec<Segment>,
}

impl Segment {
    pub fn new([start, end]: [Pos; 2], face: usize) -> Self {
        Self { start, end, face }
    }

    pub fn points(&self) -> [Pos; 2] {
        [self.start, self.end]
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

impl CrossSection {
    pub fn new(plane: Plane, segments: Vec<Segment>) -> Self {
        Self { plane, segments }
    }

    /// Every segment projected into the 2D coordinate system of the plane
    /// (see [`Plane::basis`]).
    pub fn project_2d(&self) -> Vec<[Vector2<f64>; 2]> {
        self.segments
            .iter()
            .map(|x| x.points().map(|p| self.plane.project(&p)))
            .collect()
    }

    /// Total length of all segments. For a closed manifold mesh this is the
    /// perimeter of the cross-section.
    pub fn perimeter(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }
}

impl Deref for CrossSection {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl<'a> IntoIterator for &'a CrossSection {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
