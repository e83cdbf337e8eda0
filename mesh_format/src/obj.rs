use std::io::{BufReader, Read};

use anyhow::{ensure, Context, Result};
use nalgebra::Vector3;
use ::obj::{load_obj, Obj, Position};

use crate::Mesh;

/// Reads the vertex positions and faces of a Wavefront OBJ. Texture
/// coordinates and normals are ignored and quads are split into triangles by
/// `obj-rs`.
pub fn parse<T: Read>(reader: &mut T) -> Result<Mesh> {
    let obj: Obj<Position, u32> =
        load_obj(BufReader::new(reader)).context("Failed to parse OBJ")?;
    ensure!(
        obj.indices.len() % 3 == 0,
        "OBJ index count {} is not a multiple of 3",
        obj.indices.len()
    );

    let verts = obj
        .vertices
        .iter()
        .map(|v| Vector3::from(v.position))
        .collect();
    let faces = obj
        .indices
        .chunks_exact(3)
        .map(|x| [x[0], x[1], x[2]])
        .collect();

    Ok(Mesh { verts, faces })
}
