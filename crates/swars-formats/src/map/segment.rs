//! Tagged record segments
//!
//! Between the terrain grid and the sprite data the map is a run of
//! segments, each laid out as:
//!
//! ```text
//! tag: u8 | records: [T; header count] | padding: [u16; padding_words]
//! ```
//!
//! The tag is a positional check only; tags run 0x00..=0x11 in stream order
//! and a mismatch means the reader has drifted. The padding length is a
//! format constant for each segment and is unrelated to any header field.
//! Its contents are unknown (mostly zero in shipped maps) and are carried
//! through verbatim.

use crate::error::{Error, Result};
use crate::record::{Record, RecordReader, RecordWriter};
use std::io::{Read, Seek, Write};
use tracing::debug;

/// Static description of one tagged segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLayout {
    /// Segment name used in logs and errors
    pub name: &'static str,
    /// Expected tag byte
    pub tag: u8,
    /// Trailing padding length in 16-bit words
    pub padding_words: usize,
}

impl SegmentLayout {
    /// Segment followed by `padding_words` words of padding
    pub const fn padded(name: &'static str, tag: u8, padding_words: usize) -> Self {
        Self {
            name,
            tag,
            padding_words,
        }
    }

    /// Segment with no trailing padding
    pub const fn unpadded(name: &'static str, tag: u8) -> Self {
        Self::padded(name, tag, 0)
    }

    /// Padding length in bytes
    pub const fn padding_bytes(&self) -> usize {
        self.padding_words * 2
    }
}

/// Quad texture info, 14400 padding bytes
pub const QUAD_TEX_INFO: SegmentLayout = SegmentLayout::padded("quad_tex_info", 0x00, 7200);
/// Tri texture info, 12800 padding bytes
pub const TRI_TEX_INFO: SegmentLayout = SegmentLayout::padded("tri_tex_info", 0x01, 6400);
/// Vertices, 20000 padding bytes
pub const VERTICES: SegmentLayout = SegmentLayout::padded("vertices", 0x02, 10000);
/// Triangles, 64000 padding bytes
pub const TRIS: SegmentLayout = SegmentLayout::padded("tris", 0x03, 32000);
/// Meshes, 4320 padding bytes
pub const MESHES: SegmentLayout = SegmentLayout::padded("meshes", 0x04, 2160);
/// Light info, 24000 padding bytes
pub const LIGHT_INFO: SegmentLayout = SegmentLayout::padded("light_info", 0x05, 12000);
/// Light detail, 320 padding bytes
pub const LIGHT_DETAIL: SegmentLayout = SegmentLayout::padded("light_detail", 0x06, 160);
/// Opaque block I, 56000 padding bytes
pub const BLOCKS_I: SegmentLayout = SegmentLayout::padded("blocks_i", 0x07, 28000);
/// Quads, 80000 padding bytes
pub const QUADS: SegmentLayout = SegmentLayout::padded("quads", 0x08, 40000);
/// Opaque block K, 2700 padding bytes
pub const BLOCKS_K: SegmentLayout = SegmentLayout::padded("blocks_k", 0x09, 1350);
/// Vehicle navigation points, 1800 padding bytes
pub const VEHICLE_NAV_POINTS: SegmentLayout =
    SegmentLayout::padded("vehicle_nav_points", 0x0A, 900);
/// Opaque block M, 1800 padding bytes
pub const BLOCKS_M: SegmentLayout = SegmentLayout::padded("blocks_m", 0x0B, 900);
/// Pedestrian navigation points, 6000 padding bytes
pub const NPC_NAV_POINTS: SegmentLayout = SegmentLayout::padded("npc_nav_points", 0x0C, 3000);
/// Pedestrian block lines, 8400 padding bytes
pub const NPC_BLOCK_LINES: SegmentLayout = SegmentLayout::padded("npc_block_lines", 0x0D, 4200);
/// Opaque block P
pub const BLOCKS_P: SegmentLayout = SegmentLayout::unpadded("blocks_p", 0x0E);
/// Opaque block Q
pub const BLOCKS_Q: SegmentLayout = SegmentLayout::unpadded("blocks_q", 0x0F);
/// Opaque block R
pub const BLOCKS_R: SegmentLayout = SegmentLayout::unpadded("blocks_r", 0x10);

/// Tag that opens the sprite/entity data
pub const SPRITE_TAG: u8 = 0x11;

/// Every tagged segment in stream order
pub const SEGMENT_LAYOUTS: [SegmentLayout; 17] = [
    QUAD_TEX_INFO,
    TRI_TEX_INFO,
    VERTICES,
    TRIS,
    MESHES,
    LIGHT_INFO,
    LIGHT_DETAIL,
    BLOCKS_I,
    QUADS,
    BLOCKS_K,
    VEHICLE_NAV_POINTS,
    BLOCKS_M,
    NPC_NAV_POINTS,
    NPC_BLOCK_LINES,
    BLOCKS_P,
    BLOCKS_Q,
    BLOCKS_R,
];

/// Opaque padding region kept byte-for-byte
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Padding {
    bytes: Vec<u8>,
}

impl Padding {
    /// All-zero padding of `words` 16-bit words
    pub fn zeroed(words: usize) -> Self {
        Self {
            bytes: vec![0; words * 2],
        }
    }

    /// Wrap raw padding bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the region is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether every byte is zero
    pub fn is_zeroed(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

/// Records of one tagged segment plus its trailing padding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment<T> {
    /// Records in stream order
    pub records: Vec<T>,
    /// Trailing padding (empty for unpadded layouts)
    pub padding: Padding,
}

impl<T: Record> Segment<T> {
    /// Segment with zeroed padding sized for `layout`
    pub fn with_layout(records: Vec<T>, layout: &SegmentLayout) -> Self {
        Self {
            records,
            padding: Padding::zeroed(layout.padding_words),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the segment holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check the list length against `expected` and the padding against `layout`
    pub fn validate(&self, layout: &SegmentLayout, expected: u32) -> Result<()> {
        if self.records.len() != expected as usize {
            return Err(Error::CountMismatch {
                segment: layout.name,
                expected: u64::from(expected),
                actual: self.records.len(),
            });
        }
        if self.padding.len() != layout.padding_bytes() {
            return Err(Error::PaddingLength {
                segment: layout.name,
                expected: layout.padding_bytes(),
                actual: self.padding.len(),
            });
        }
        Ok(())
    }

    /// Bytes this segment occupies on disk, tag included
    pub fn encoded_len(&self) -> usize {
        1 + self.records.len() * T::SIZE + self.padding.len()
    }
}

/// Read a tag byte and fail unless it equals `expected`
pub fn expect_tag<R: Read + Seek>(reader: &mut RecordReader<R>, expected: u8) -> Result<()> {
    let offset = reader.position();
    let actual = reader.read_u8()?;
    if actual != expected {
        return Err(Error::TagMismatch {
            expected,
            actual,
            offset,
        });
    }
    Ok(())
}

/// Read one tagged segment of `count` records
pub fn read_segment<T: Record, R: Read + Seek>(
    reader: &mut RecordReader<R>,
    layout: &SegmentLayout,
    count: u32,
) -> Result<Segment<T>> {
    let offset = reader.position();
    expect_tag(reader, layout.tag)?;
    let records = reader.read_records(count as usize)?;
    let padding = Padding::from_bytes(reader.read_bytes(layout.padding_bytes())?);

    debug!(
        "Read segment {} (tag {:#04x}): {} records at offset {:#x}",
        layout.name, layout.tag, count, offset
    );

    Ok(Segment { records, padding })
}

/// Write one tagged segment: tag, records, padding verbatim
pub fn write_segment<T: Record, W: Write + Seek>(
    writer: &mut RecordWriter<W>,
    layout: &SegmentLayout,
    segment: &Segment<T>,
) -> Result<()> {
    writer.write_tag(layout.tag)?;
    writer.write_records(&segment.records)?;
    writer.write_bytes(segment.padding.as_bytes())
}
