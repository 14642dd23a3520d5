//! Record types shared by the map and vehicle formats
//!
//! Geometry and texture-mapping records are identical in both files; the
//! vehicle mesh file is effectively the map's detail segments without tags
//! or padding. Opaque blocks cover every record whose field meanings are
//! still unknown.

pub mod geometry;
pub mod opaque;
pub mod texture;

// Re-export main types
pub use geometry::{MeshDetails, Quad, Tri, Vertex};
pub use opaque::{
    DataBlockD, DataBlockI, DataBlockK, DataBlockM, DataBlockP, DataBlockQ, DataBlockR,
    OpaqueBlock,
};
pub use texture::{QuadTextureInfo, TriTextureInfo};
