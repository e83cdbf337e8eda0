use std::io::{Read, Seek};

use anyhow::{Context, Result};
use nalgebra::Vector3;

use crate::Mesh;

/// Reads an ascii or binary STL. Identical vertices are merged by `stl_io`,
/// facet normals are ignored.
pub fn parse<T: Read + Seek>(reader: &mut T) -> Result<Mesh> {
    let stl = stl_io::read_stl(reader).context("Failed to parse STL")?;

    let verts = stl
        .vertices
        .iter()
        .map(|v| Vector3::new(v[0], v[1], v[2]))
        .collect();
    let faces = stl
        .faces
        .iter()
        .map(|f| f.vertices.map(|x| x as u32))
        .collect();

    Ok(Mesh { verts, faces })
}
