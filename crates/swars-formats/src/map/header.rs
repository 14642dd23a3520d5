//! Map file header
//!
//! The header is the first record in the file. Apart from the leading
//! version word it is nothing but element counts, one per header-counted
//! segment, in the order the segments appear in the stream. The terrain grid
//! is always 128×128 and has no count.

use crate::record::Record;
use binrw::{BinRead, BinWrite};

/// Map header (72 bytes)
///
/// The codec never recomputes these counts from list lengths. A caller that
/// grows or shrinks a list must update the matching field itself, otherwise
/// the saved file will not load back.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct MapHeader {
    /// Format version word, preserved verbatim
    pub version: u32,
    /// Quad texture-info records (tag 0x00)
    pub num_quad_tex: u32,
    /// Tri texture-info records (tag 0x01)
    pub num_tri_tex: u32,
    /// Vertices (tag 0x02)
    pub num_verts: u32,
    /// Triangles (tag 0x03)
    pub num_tris: u32,
    /// Meshes (tag 0x04)
    pub num_meshes: u32,
    /// Light-info records (tag 0x05)
    pub num_light_info: u32,
    /// Light-detail records (tag 0x06)
    pub num_lights: u32,
    /// Opaque I blocks (tag 0x07)
    pub num_block_i: u32,
    /// Quads (tag 0x08)
    pub num_quads: u32,
    /// Opaque K blocks (tag 0x09)
    pub num_block_k: u32,
    /// Vehicle navigation points (tag 0x0A)
    pub num_nav_points: u32,
    /// Opaque M blocks (tag 0x0B)
    pub num_block_m: u32,
    /// Pedestrian navigation points (tag 0x0C)
    pub num_nav_points_npc: u32,
    /// Pedestrian block lines (tag 0x0D)
    pub num_block_points_npc: u32,
    /// Opaque P blocks (tag 0x0E)
    pub num_block_p: u32,
    /// Opaque Q blocks (tag 0x0F)
    pub num_block_q: u32,
    /// Opaque R blocks (tag 0x10)
    pub num_block_r: u32,
}

impl Record for MapHeader {
    const SIZE: usize = 72;
}

impl MapHeader {
    /// Every header-counted segment as `(name, count)`, in stream order
    pub fn segment_counts(&self) -> [(&'static str, u32); 17] {
        [
            ("quad_tex_info", self.num_quad_tex),
            ("tri_tex_info", self.num_tri_tex),
            ("vertices", self.num_verts),
            ("tris", self.num_tris),
            ("meshes", self.num_meshes),
            ("light_info", self.num_light_info),
            ("light_detail", self.num_lights),
            ("blocks_i", self.num_block_i),
            ("quads", self.num_quads),
            ("blocks_k", self.num_block_k),
            ("vehicle_nav_points", self.num_nav_points),
            ("blocks_m", self.num_block_m),
            ("npc_nav_points", self.num_nav_points_npc),
            ("npc_block_lines", self.num_block_points_npc),
            ("blocks_p", self.num_block_p),
            ("blocks_q", self.num_block_q),
            ("blocks_r", self.num_block_r),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::{RecordReader, RecordWriter};
    use std::io::Cursor;

    #[test]
    fn test_header_parse_from_bytes() {
        let mut data = Vec::new();
        for value in 0u32..18 {
            data.extend_from_slice(&(value * 10).to_le_bytes());
        }

        let header: MapHeader = RecordReader::from_bytes(&data).read_record().unwrap();
        assert_eq!(header.version, 0);
        assert_eq!(header.num_quad_tex, 10);
        assert_eq!(header.num_meshes, 50);
        assert_eq!(header.num_block_r, 170);

        let mut buffer = Vec::new();
        RecordWriter::new(Cursor::new(&mut buffer))
            .write_record(&header)
            .unwrap();
        assert_eq!(buffer, data);
        assert_eq!(buffer.len(), MapHeader::SIZE);
    }

    #[test]
    fn test_segment_counts_order() {
        let header = MapHeader {
            num_quad_tex: 1,
            num_block_r: 17,
            ..MapHeader::default()
        };
        let counts = header.segment_counts();
        assert_eq!(counts[0], ("quad_tex_info", 1));
        assert_eq!(counts[16], ("blocks_r", 17));
    }
}
