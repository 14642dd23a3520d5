//! Builder for vehicle mesh files

use crate::error::{Error, Result};
use crate::types::{MeshDetails, Quad, QuadTextureInfo, Tri, TriTextureInfo, Vertex};
use crate::vehicle::{VehicleHeader, VehicleMesh};

/// Builder for creating vehicle meshes
///
/// The header is computed from the list lengths at build time.
///
/// # Example
///
/// ```rust
/// use swars_formats::vehicle::VehicleMeshBuilder;
/// use swars_formats::types::{MeshDetails, Tri, Vertex};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mesh = VehicleMeshBuilder::new()
///     .add_vertex(Vertex::default())
///     .add_vertex(Vertex { x: 100, ..Vertex::default() })
///     .add_vertex(Vertex { z: 100, ..Vertex::default() })
///     .add_tri(Tri { points: [0, 1, 2], ..Tri::default() })
///     .add_mesh(MeshDetails { num_faces: 1, ..MeshDetails::default() })
///     .build()?;
///
/// assert_eq!(mesh.header.num_verts, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct VehicleMeshBuilder {
    vertices: Vec<Vertex>,
    tris: Vec<Tri>,
    quads: Vec<Quad>,
    meshes: Vec<MeshDetails>,
    quad_tex: Vec<QuadTextureInfo>,
    tri_tex: Vec<TriTextureInfo>,
}

impl VehicleMeshBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create builder from an existing mesh
    pub fn from_mesh(mesh: &VehicleMesh) -> Self {
        Self {
            vertices: mesh.vertices.clone(),
            tris: mesh.tris.clone(),
            quads: mesh.quads.clone(),
            meshes: mesh.meshes.clone(),
            quad_tex: mesh.quad_tex.clone(),
            tri_tex: mesh.tri_tex.clone(),
        }
    }

    /// Append a vertex
    #[must_use]
    pub fn add_vertex(mut self, vertex: Vertex) -> Self {
        self.vertices.push(vertex);
        self
    }

    /// Append a triangle
    #[must_use]
    pub fn add_tri(mut self, tri: Tri) -> Self {
        self.tris.push(tri);
        self
    }

    /// Append a quad
    #[must_use]
    pub fn add_quad(mut self, quad: Quad) -> Self {
        self.quads.push(quad);
        self
    }

    /// Append a mesh
    #[must_use]
    pub fn add_mesh(mut self, mesh: MeshDetails) -> Self {
        self.meshes.push(mesh);
        self
    }

    /// Append a quad texture mapping
    #[must_use]
    pub fn add_quad_tex(mut self, info: QuadTextureInfo) -> Self {
        self.quad_tex.push(info);
        self
    }

    /// Append a triangle texture mapping
    #[must_use]
    pub fn add_tri_tex(mut self, info: TriTextureInfo) -> Self {
        self.tri_tex.push(info);
        self
    }

    /// Assemble the mesh
    ///
    /// # Errors
    /// - `CountMismatch` if a list is longer than a 32-bit count can hold
    pub fn build(self) -> Result<VehicleMesh> {
        let header = VehicleHeader {
            num_verts: count("vertices", self.vertices.len())?,
            num_tris: count("tris", self.tris.len())?,
            num_quads: count("quads", self.quads.len())?,
            num_meshes: count("meshes", self.meshes.len())?,
            num_quad_uv: count("quad_tex", self.quad_tex.len())?,
            num_tri_uv: count("tri_tex", self.tri_tex.len())?,
        };

        Ok(VehicleMesh {
            header,
            vertices: self.vertices,
            tris: self.tris,
            quads: self.quads,
            meshes: self.meshes,
            quad_tex: self.quad_tex,
            tri_tex: self.tri_tex,
        })
    }
}

fn count(segment: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::CountMismatch {
        segment,
        expected: u64::from(u32::MAX),
        actual: len,
    })
}
