use std::io::{Read, Seek};

use anyhow::{Context, Result};
use nalgebra::Vector3;
use tracing::info;

mod obj;
mod stl;

/// An indexed triangle mesh as read from disk. Faces index into `verts`.
#[derive(Debug, Default)]
pub struct Mesh {
    pub verts: Vec<Vector3<f32>>,
    pub faces: Vec<[u32; 3]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Stl,
    Obj,
}

impl Format {
    pub fn from_extension(extension: &str) -> Option<Self> {
        Some(match extension.to_ascii_lowercase().as_str() {
            "stl" => Format::Stl,
            "obj" => Format::Obj,
            _ => return None,
        })
    }
}

/// Loads a mesh in the format named by `format`, a case-insensitive file
/// extension. Supported formats include `.stl` (ascii and binary) and `.obj`.
pub fn load_mesh<T: Read + Seek>(mut reader: T, format: &str) -> Result<Mesh> {
    let format = Format::from_extension(format)
        .with_context(|| format!("Unsupported mesh format: `{format}`"))?;

    let mesh = match format {
        Format::Stl => stl::parse(&mut reader),
        Format::Obj => obj::parse(&mut reader),
    }?;

    info!(
        "Loaded {:?} mesh {{ vert: {}, face: {} }}",
        format,
        mesh.verts.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}
