//! Texture-mapping records for quads and triangles

use crate::record::Record;
use binrw::{BinRead, BinWrite};

/// UV mapping of a quad face onto a texture page (18 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct QuadTextureInfo {
    /// Texel coordinates `[u, v]` of the four corners
    pub uv: [[u8; 2]; 4],
    /// Texture page
    pub page: u16,
    /// Unknown
    pub unknown: [u8; 8],
}

impl Record for QuadTextureInfo {
    const SIZE: usize = 18;
}

/// UV mapping of a triangle onto a texture page (16 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct TriTextureInfo {
    /// Texel coordinates `[u, v]` of the three corners
    pub uv: [[u8; 2]; 3],
    /// Texture page
    pub page: u16,
    /// Unknown
    pub unknown: [u8; 8],
}

impl Record for TriTextureInfo {
    const SIZE: usize = 16;
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::{RecordReader, RecordWriter};
    use std::io::Cursor;

    #[test]
    fn test_quad_uv_layout() {
        let mut data: Vec<u8> = (1..=8).collect();
        data.extend_from_slice(&3u16.to_le_bytes());
        data.extend_from_slice(&[0xEE; 8]);

        let info: QuadTextureInfo = RecordReader::from_bytes(&data).read_record().unwrap();
        assert_eq!(info.uv, [[1, 2], [3, 4], [5, 6], [7, 8]]);
        assert_eq!(info.page, 3);
        assert_eq!(info.unknown, [0xEE; 8]);
    }

    #[test]
    fn test_tri_texture_size() {
        let mut buffer = Vec::new();
        RecordWriter::new(Cursor::new(&mut buffer))
            .write_record(&TriTextureInfo::default())
            .unwrap();
        assert_eq!(buffer.len(), TriTextureInfo::SIZE);
    }
}
