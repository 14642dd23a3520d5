//! Vehicle mesh header

use crate::record::Record;
use crate::types::{MeshDetails, Quad, QuadTextureInfo, Tri, TriTextureInfo, Vertex};
use binrw::{BinRead, BinWrite};

/// Count header at the start of a vehicle mesh file (24 bytes)
///
/// Fields are in stream order of the lists they count, except that the two
/// texture-mapping counts come last.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct VehicleHeader {
    /// Vertex count
    pub num_verts: u32,
    /// Triangle count
    pub num_tris: u32,
    /// Quad count
    pub num_quads: u32,
    /// Mesh count
    pub num_meshes: u32,
    /// Quad texture-info count
    pub num_quad_uv: u32,
    /// Triangle texture-info count
    pub num_tri_uv: u32,
}

impl Record for VehicleHeader {
    const SIZE: usize = 24;
}

impl VehicleHeader {
    /// Bytes the header and every list it counts occupy on disk
    pub fn encoded_len(&self) -> u64 {
        Self::SIZE as u64
            + u64::from(self.num_verts) * Vertex::SIZE as u64
            + u64::from(self.num_tris) * Tri::SIZE as u64
            + u64::from(self.num_quads) * Quad::SIZE as u64
            + u64::from(self.num_meshes) * MeshDetails::SIZE as u64
            + u64::from(self.num_quad_uv) * QuadTextureInfo::SIZE as u64
            + u64::from(self.num_tri_uv) * TriTextureInfo::SIZE as u64
    }
}
