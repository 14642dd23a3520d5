//! Vertex, face and mesh records

use crate::record::Record;
use binrw::{BinRead, BinWrite};

/// A single mesh vertex (10 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct Vertex {
    /// Offset into the engine's transformed point table
    pub offset: u16,
    /// X coordinate
    pub x: i16,
    /// Y coordinate (up)
    pub y: i16,
    /// Z coordinate
    pub z: i16,
    /// Pre-baked shade value
    pub shade: u16,
}

impl Record for Vertex {
    const SIZE: usize = 10;
}

/// Triangular face (32 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct Tri {
    /// Vertex indices
    pub points: [u16; 3],
    /// Index into the tri texture-info list
    pub texture: u16,
    /// Graphics flags
    pub gflags: u8,
    /// Face flags
    pub flags: u8,
    /// Extra colour index
    pub ex_col: u8,
    /// Unknown
    pub unknown_0: u8,
    /// Owning mesh index
    pub object: u16,
    /// Per-vertex shade
    pub shade: [u16; 3],
    /// Per-vertex light list heads
    pub light: [u16; 3],
    /// Face normal index
    pub normal: u16,
    /// Walkable-surface chain head
    pub walk_header: u16,
    /// Unknown
    pub unknown_1: u16,
}

impl Record for Tri {
    const SIZE: usize = 32;
}

/// Quadrilateral face (40 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct Quad {
    /// Vertex indices
    pub points: [u16; 4],
    /// Index into the quad texture-info list
    pub texture: u16,
    /// Graphics flags
    pub gflags: u8,
    /// Face flags
    pub flags: u8,
    /// Extra colour index
    pub ex_col: u8,
    /// Unknown
    pub unknown_0: u8,
    /// Owning mesh index
    pub object: u16,
    /// Per-vertex shade
    pub shade: [u16; 4],
    /// Per-vertex light list heads
    pub light: [u16; 4],
    /// Face normal index
    pub normal: u16,
    /// Walkable-surface chain head
    pub walk_header: u16,
    /// Unknown
    pub unknown_1: u32,
}

impl Record for Quad {
    const SIZE: usize = 40;
}

/// Mesh (object) descriptor: face ranges plus placement (36 bytes)
///
/// Editors overwrite these in place by index to move or re-skin buildings.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct MeshDetails {
    /// First triangle
    pub start_face: u16,
    /// Number of triangles
    pub num_faces: u16,
    /// Next mesh in the engine's object chain
    pub next_object: u16,
    /// First quad
    pub start_face4: u16,
    /// Number of quads
    pub num_faces4: u16,
    /// Vertical scale
    pub z_scale: u16,
    /// World X offset
    pub offset_x: i16,
    /// World Y offset
    pub offset_y: i16,
    /// World Z offset
    pub offset_z: i16,
    /// Object number
    pub object_no: u16,
    /// Map tile X
    pub map_x: i16,
    /// Map tile Z
    pub map_z: i16,
    /// Bounding radius
    pub radius: u16,
    /// Linked thing index
    pub thing: u16,
    /// Unknown
    pub unknown: [u8; 8],
}

impl Record for MeshDetails {
    const SIZE: usize = 36;
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::{RecordReader, RecordWriter};
    use std::io::Cursor;

    fn encoded_len<T: Record>(record: &T) -> usize {
        let mut buffer = Vec::new();
        RecordWriter::new(Cursor::new(&mut buffer))
            .write_record(record)
            .unwrap();
        buffer.len()
    }

    #[test]
    fn test_encoded_sizes_match_declared() {
        assert_eq!(encoded_len(&Vertex::default()), Vertex::SIZE);
        assert_eq!(encoded_len(&Tri::default()), Tri::SIZE);
        assert_eq!(encoded_len(&Quad::default()), Quad::SIZE);
        assert_eq!(encoded_len(&MeshDetails::default()), MeshDetails::SIZE);
    }

    #[test]
    fn test_mesh_field_order() {
        let mut data = vec![0u8; MeshDetails::SIZE];
        data[0..2].copy_from_slice(&12u16.to_le_bytes()); // start_face
        data[2..4].copy_from_slice(&3u16.to_le_bytes()); // num_faces
        data[14..16].copy_from_slice(&(-512i16).to_le_bytes()); // offset_y
        data[28] = 0xAB; // first unknown byte

        let mesh: MeshDetails = RecordReader::from_bytes(&data).read_record().unwrap();
        assert_eq!(mesh.start_face, 12);
        assert_eq!(mesh.num_faces, 3);
        assert_eq!(mesh.offset_y, -512);
        assert_eq!(mesh.unknown[0], 0xAB);
    }

    #[test]
    fn test_quad_trailing_field() {
        let mut data = vec![0u8; Quad::SIZE];
        data[36..40].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        data[0..2].copy_from_slice(&5u16.to_le_bytes());

        let quad: Quad = RecordReader::from_bytes(&data).read_record().unwrap();
        assert_eq!(quad.points[0], 5);
        assert_eq!(quad.unknown_1, 0xDEAD_BEEF);
    }
}
