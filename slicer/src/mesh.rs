use std::{
    io::{Read, Seek},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    error::{Result, SliceError},
    Pos,
};

/// One facet of a mesh. The vertex order is kept exactly as loaded and
/// defines the edges `(v0, v1)`, `(v1, v2)`, `(v2, v0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Pos; 3],
}

/// An ordered list of triangles. Vertices are not shared between faces, so an
/// edge common to two triangles is stored (and later tested) twice. Cloning
/// is cheap, the triangle storage is reference counted.
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Arc<[Triangle]>,
}

impl Triangle {
    pub fn new(v0: Pos, v1: Pos, v2: Pos) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// The three edges in their fixed iteration order.
    pub fn edges(&self) -> [(Pos, Pos); 3] {
        let [v0, v1, v2] = self.vertices;
        [(v0, v1), (v1, v2), (v2, v0)]
    }
}

impl TryFrom<&[Pos]> for Triangle {
    type Error = SliceError;

    fn try_from(vertices: &[Pos]) -> Result<Self> {
        match vertices {
            [v0, v1, v2] => Ok(Self::new(*v0, *v1, *v2)),
            _ => Err(SliceError::malformed(
                0,
                format!("expected 3 vertices, got {}", vertices.len()),
            )),
        }
    }
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles: triangles.into(),
        }
    }

    /// Builds a mesh from a shared vertex list and index triples, as produced
    /// by most mesh loaders. Fails on the first face referencing a vertex that
    /// does not exist, rejecting the whole mesh.
    pub fn from_indexed(vertices: &[Pos], faces: &[[u32; 3]]) -> Result<Self> {
        let triangles = faces
            .iter()
            .enumerate()
            .map(|(idx, face)| {
                let vertex = |i: u32| {
                    vertices.get(i as usize).copied().ok_or_else(|| {
                        SliceError::malformed(
                            idx,
                            format!("vertex index {i} out of range ({} vertices)", vertices.len()),
                        )
                    })
                };
                Ok(Triangle::new(
                    vertex(face[0])?,
                    vertex(face[1])?,
                    vertex(face[2])?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(triangles))
    }

    /// Builds a mesh from arbitrary vertex lists, rejecting it if any of them
    /// does not have exactly three vertices.
    pub fn from_polygons<P: AsRef<[Pos]>>(polygons: &[P]) -> Result<Self> {
        let triangles = polygons
            .iter()
            .enumerate()
            .map(|(idx, polygon)| {
                Triangle::try_from(polygon.as_ref()).map_err(|err| match err {
                    SliceError::MalformedTriangle { reason, .. } => {
                        SliceError::MalformedTriangle { face: idx, reason }
                    }
                    err => err,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(triangles))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get the minimum and maximum of each component of every vertex in the
    /// mesh. These points define its bounding box. `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Pos, Pos)> {
        let mut vertices = self.triangles.iter().flat_map(|x| x.vertices);
        let first = vertices.next()?;

        Some(vertices.fold((first, first), |(min, max), v| {
            (min.inf(&v), max.sup(&v))
        }))
    }
}

/// Loads a buffer into a mesh. Supported formats include `.stl` and `.obj`,
/// see [`mesh_format::load_mesh`].
pub fn load_mesh<T: Read + Seek>(reader: T, format: &str) -> anyhow::Result<Mesh> {
    let mesh = mesh_format::load_mesh(reader, format)?;
    let vertices = mesh.verts.iter().map(|x| x.cast::<f64>()).collect::<Vec<_>>();
    Mesh::from_indexed(&vertices, &mesh.faces).context("Invalid mesh")
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Triangle>> for Mesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self::new(triangles)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::{load_mesh, Mesh, Triangle};
    use crate::{error::SliceError, Pos};

    fn square() -> (Vec<Pos>, Vec<[u32; 3]>) {
        let vertices = vec![
            Pos::new(0.0, 0.0, 0.0),
            Pos::new(1.0, 0.0, 0.0),
            Pos::new(1.0, 1.0, 1.0),
            Pos::new(0.0, 1.0, 1.0),
        ];
        (vertices, vec![[0, 1, 2], [0, 2, 3]])
    }

    #[test]
    fn test_from_indexed() {
        let (vertices, faces) = square();
        let mesh = Mesh::from_indexed(&vertices, &faces).unwrap();

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.triangles()[1].vertices[2], Pos::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_from_indexed_out_of_range() {
        let (vertices, _) = square();
        let err = Mesh::from_indexed(&vertices, &[[0, 1, 2], [0, 2, 7]]).unwrap_err();
        assert!(matches!(err, SliceError::MalformedTriangle { face: 1, .. }));
    }

    #[test]
    fn test_from_polygons() {
        let polygons = vec![
            vec![Pos::zeros(), Pos::x(), Pos::y()],
            vec![Pos::zeros(), Pos::x()],
        ];
        let err = Mesh::from_polygons(&polygons).unwrap_err();
        assert!(matches!(err, SliceError::MalformedTriangle { face: 1, .. }));

        let mesh = Mesh::from_polygons(&polygons[..1]).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_edges_order() {
        let (a, b, c) = (Pos::x(), Pos::y(), Pos::z());
        let edges = Triangle::new(a, b, c).edges();
        assert_eq!(edges, [(a, b), (b, c), (c, a)]);
    }

    #[test]
    fn test_bounds() {
        let (vertices, faces) = square();
        let mesh = Mesh::from_indexed(&vertices, &faces).unwrap();
        let (min, max) = mesh.bounds().unwrap();

        assert_eq!(min, Pos::new(0.0, 0.0, 0.0));
        assert_eq!(max, Pos::new(1.0, 1.0, 1.0));
        assert!(Mesh::default().bounds().is_none());
    }

    #[test]
    fn test_load_obj() {
        let source = "v 0 0 0\nv 2 0 0\nv 0 2 2\nf 1 2 3\n";
        let mesh = load_mesh(Cursor::new(source), "OBJ").unwrap();

        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.triangles()[0].vertices[2], Pos::new(0.0, 2.0, 2.0));
    }
}
