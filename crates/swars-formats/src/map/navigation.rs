//! Navigation phase: vehicle routes, pedestrian routes and blockers
//!
//! Segments 0x09..=0x0D. Opaque blocks K and M are interleaved with the
//! navigation records and are carried verbatim.

use crate::error::Result;
use crate::map::header::MapHeader;
use crate::map::segment::{
    self, BLOCKS_K, BLOCKS_M, NPC_BLOCK_LINES, NPC_NAV_POINTS, Segment, VEHICLE_NAV_POINTS,
};
use crate::record::{Record, RecordReader, RecordWriter};
use crate::types::{DataBlockK, DataBlockM};
use binrw::{BinRead, BinWrite};
use std::io::{Read, Seek, Write};

/// Vehicle route node (16 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct VehicleNavPoint {
    /// X coordinate
    pub x: i16,
    /// Y coordinate
    pub y: i16,
    /// Z coordinate
    pub z: i16,
    /// Linked node indices
    pub links: [u16; 4],
    /// Flags
    pub flags: u16,
}

impl Record for VehicleNavPoint {
    const SIZE: usize = 16;
}

/// Pedestrian route node (16 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct NpcNavPoint {
    /// X coordinate
    pub x: i16,
    /// Z coordinate
    pub z: i16,
    /// Linked node indices
    pub links: [u16; 4],
    /// Flags
    pub flags: u16,
    /// Unknown
    pub unknown: u16,
}

impl Record for NpcNavPoint {
    const SIZE: usize = 16;
}

/// Line pedestrians may not cross (12 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct NpcBlockLine {
    /// Start X
    pub x1: i16,
    /// Start Z
    pub z1: i16,
    /// End X
    pub x2: i16,
    /// End Z
    pub z2: i16,
    /// Flags
    pub flags: u16,
    /// Unknown
    pub unknown: u16,
}

impl Record for NpcBlockLine {
    const SIZE: usize = 12;
}

/// Navigation phase contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    /// Opaque block K (tag 0x09)
    pub blocks_k: Segment<DataBlockK>,
    /// Vehicle route nodes (tag 0x0A)
    pub vehicle_nav_points: Segment<VehicleNavPoint>,
    /// Opaque block M (tag 0x0B)
    pub blocks_m: Segment<DataBlockM>,
    /// Pedestrian route nodes (tag 0x0C)
    pub npc_nav_points: Segment<NpcNavPoint>,
    /// Pedestrian blockers (tag 0x0D)
    pub npc_block_lines: Segment<NpcBlockLine>,
}

impl Navigation {
    pub(crate) fn read<R: Read + Seek>(
        reader: &mut RecordReader<R>,
        header: &MapHeader,
    ) -> Result<Self> {
        Ok(Self {
            blocks_k: segment::read_segment(reader, &BLOCKS_K, header.num_block_k)?,
            vehicle_nav_points: segment::read_segment(
                reader,
                &VEHICLE_NAV_POINTS,
                header.num_nav_points,
            )?,
            blocks_m: segment::read_segment(reader, &BLOCKS_M, header.num_block_m)?,
            npc_nav_points: segment::read_segment(
                reader,
                &NPC_NAV_POINTS,
                header.num_nav_points_npc,
            )?,
            npc_block_lines: segment::read_segment(
                reader,
                &NPC_BLOCK_LINES,
                header.num_block_points_npc,
            )?,
        })
    }

    pub(crate) fn write<W: Write + Seek>(&self, writer: &mut RecordWriter<W>) -> Result<()> {
        segment::write_segment(writer, &BLOCKS_K, &self.blocks_k)?;
        segment::write_segment(writer, &VEHICLE_NAV_POINTS, &self.vehicle_nav_points)?;
        segment::write_segment(writer, &BLOCKS_M, &self.blocks_m)?;
        segment::write_segment(writer, &NPC_NAV_POINTS, &self.npc_nav_points)?;
        segment::write_segment(writer, &NPC_BLOCK_LINES, &self.npc_block_lines)
    }

    pub(crate) fn validate(&self, header: &MapHeader) -> Result<()> {
        self.blocks_k.validate(&BLOCKS_K, header.num_block_k)?;
        self.vehicle_nav_points
            .validate(&VEHICLE_NAV_POINTS, header.num_nav_points)?;
        self.blocks_m.validate(&BLOCKS_M, header.num_block_m)?;
        self.npc_nav_points
            .validate(&NPC_NAV_POINTS, header.num_nav_points_npc)?;
        self.npc_block_lines
            .validate(&NPC_BLOCK_LINES, header.num_block_points_npc)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn header() -> MapHeader {
        MapHeader {
            num_block_k: 1,
            num_nav_points: 2,
            num_nav_points_npc: 1,
            ..MapHeader::default()
        }
    }

    fn phase() -> Navigation {
        Navigation {
            blocks_k: Segment::with_layout(vec![DataBlockK::default()], &BLOCKS_K),
            vehicle_nav_points: Segment::with_layout(
                vec![
                    VehicleNavPoint {
                        links: [1, 0xFFFF, 0xFFFF, 0xFFFF],
                        ..VehicleNavPoint::default()
                    },
                    VehicleNavPoint {
                        x: 300,
                        links: [0, 0xFFFF, 0xFFFF, 0xFFFF],
                        ..VehicleNavPoint::default()
                    },
                ],
                &VEHICLE_NAV_POINTS,
            ),
            blocks_m: Segment::with_layout(Vec::new(), &BLOCKS_M),
            npc_nav_points: Segment::with_layout(vec![NpcNavPoint::default()], &NPC_NAV_POINTS),
            npc_block_lines: Segment::with_layout(Vec::new(), &NPC_BLOCK_LINES),
        }
    }

    #[test]
    fn test_navigation_phase_layout() {
        let nav = phase();
        let mut buffer = Vec::new();
        let mut writer = RecordWriter::new(Cursor::new(&mut buffer));
        nav.write(&mut writer).unwrap();
        let tags: Vec<u8> = writer.tag_offsets().iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags, vec![0x09, 0x0A, 0x0B, 0x0C, 0x0D]);
        drop(writer);

        let expected = 5
            + DataBlockK::SIZE
            + 2 * VehicleNavPoint::SIZE
            + NpcNavPoint::SIZE
            + 2 * (1350 + 900 + 900 + 3000 + 4200);
        assert_eq!(buffer.len(), expected);

        let parsed = Navigation::read(&mut RecordReader::from_bytes(&buffer), &header()).unwrap();
        assert_eq!(parsed, nav);
        assert!(parsed.validate(&header()).is_ok());
    }

    #[test]
    fn test_navigation_validate_count() {
        let header = MapHeader {
            num_block_points_npc: 4,
            ..header()
        };
        assert!(matches!(
            phase().validate(&header),
            Err(Error::CountMismatch {
                segment: "npc_block_lines",
                expected: 4,
                actual: 0
            })
        ));
    }
}
