//! Sprite and entity data (tag 0x11 to end of file)
//!
//! Layout after the tag:
//!
//! ```text
//! SpritePreamble
//! SubHeaderA × 19
//! SubHeaderB
//! SubBlockA …   until the first terminal record (inclusive)
//! SubBlockB …   until the 8th terminal record (inclusive)
//! EntityHeader
//! EntitySubBlock × EntityHeader.num_sprites
//! SubHeaderD
//! DataBlockD …  until end of stream
//! ```
//!
//! Nothing here is counted by the map header.

use crate::error::{Error, Result};
use crate::map::segment::{self, SPRITE_TAG};
use crate::map::sentinel::{self, Sentinel, StopCondition};
use crate::record::{Record, RecordReader, RecordWriter};
use crate::types::DataBlockD;
use binrw::{BinRead, BinWrite};
use std::io::{Read, Seek, Write};
use tracing::debug;

/// Fixed number of SubHeaderA records
pub const SUB_HEADER_A_COUNT: usize = 19;

/// Terminal records that end the SubBlockB list
pub const SUB_BLOCK_B_TERMINALS: usize = 8;

/// Marker value that ends a SubBlockA list
pub const SUB_BLOCK_A_TERMINATOR: u16 = 0xFFFF;

/// `next` value of a terminal SubBlockB record
pub const SUB_BLOCK_B_END_OF_CHAIN: u16 = 0xFFFF;

/// Stop condition for SubBlockA
pub const SUB_BLOCK_A_STOP: StopCondition = StopCondition::FirstTerminal;

/// Stop condition for SubBlockB
pub const SUB_BLOCK_B_STOP: StopCondition = StopCondition::NthTerminal(SUB_BLOCK_B_TERMINALS);

/// Record opening the sprite data (8 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct SpritePreamble {
    /// Unknown
    pub unknown: [u8; 8],
}

impl Record for SpritePreamble {
    const SIZE: usize = 8;
}

/// One of the 19 fixed sub-headers (8 bytes)
///
/// Words 2 and 3 are zero in every shipped map.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct SubHeaderA {
    /// Unknown words
    pub values: [u16; 4],
}

impl Record for SubHeaderA {
    const SIZE: usize = 8;
}

/// Sub-header preceding the sentinel lists (12 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct SubHeaderB {
    /// Unknown words
    pub values: [u16; 6],
}

impl Record for SubHeaderB {
    const SIZE: usize = 12;
}

/// Entry of the first sentinel list (16 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct SubBlockA {
    /// [`SUB_BLOCK_A_TERMINATOR`] on the last entry
    pub marker: u16,
    /// Index
    pub index: u16,
    /// X coordinate
    pub x: i16,
    /// Y coordinate
    pub y: i16,
    /// Z coordinate
    pub z: i16,
    /// Unknown
    pub unknown: [u8; 6],
}

impl Record for SubBlockA {
    const SIZE: usize = 16;
}

impl Sentinel for SubBlockA {
    fn is_final_entry(&self) -> bool {
        self.marker == SUB_BLOCK_A_TERMINATOR
    }
}

impl SubBlockA {
    /// Terminal entry with every other field zero
    pub fn terminal() -> Self {
        Self {
            marker: SUB_BLOCK_A_TERMINATOR,
            ..Self::default()
        }
    }
}

/// Entry of the second sentinel list (20 bytes)
///
/// The list is eight chains; each chain ends on a record with `kind == 0`
/// and `next == 0xFFFF`.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct SubBlockB {
    /// Entry kind, zero on chain terminators
    pub kind: u16,
    /// Next entry in the chain
    pub next: u16,
    /// X coordinate
    pub x: i16,
    /// Y coordinate
    pub y: i16,
    /// Z coordinate
    pub z: i16,
    /// Unknown
    pub unknown: [u8; 10],
}

impl Record for SubBlockB {
    const SIZE: usize = 20;
}

impl Sentinel for SubBlockB {
    fn is_final_entry(&self) -> bool {
        self.kind == 0 && self.next == SUB_BLOCK_B_END_OF_CHAIN
    }
}

impl SubBlockB {
    /// Chain terminator with every other field zero
    pub fn terminal() -> Self {
        Self {
            kind: 0,
            next: SUB_BLOCK_B_END_OF_CHAIN,
            ..Self::default()
        }
    }
}

/// Entity list header (8 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct EntityHeader {
    /// Number of [`EntitySubBlock`] records that follow
    pub num_sprites: u16,
    /// Unknown
    pub unknown: [u8; 6],
}

impl Record for EntityHeader {
    const SIZE: usize = 8;
}

/// Placed sprite or entity (24 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct EntitySubBlock {
    /// Sprite index
    pub sprite: u16,
    /// X coordinate
    pub x: i16,
    /// Y coordinate
    pub y: i16,
    /// Z coordinate
    pub z: i16,
    /// Facing
    pub angle: u16,
    /// Flags
    pub flags: u16,
    /// Unknown
    pub unknown: [u8; 12],
}

impl Record for EntitySubBlock {
    const SIZE: usize = 24;
}

/// Sub-header preceding the tail blocks (16 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct SubHeaderD {
    /// Unknown
    pub unknown: [u8; 16],
}

impl Record for SubHeaderD {
    const SIZE: usize = 16;
}

/// Sprite phase contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteData {
    /// Opening record
    pub preamble: SpritePreamble,
    /// Fixed run of [`SUB_HEADER_A_COUNT`] sub-headers
    pub sub_headers_a: Vec<SubHeaderA>,
    /// Sub-header B
    pub sub_header_b: SubHeaderB,
    /// First sentinel list, terminal record included
    pub sub_blocks_a: Vec<SubBlockA>,
    /// Second sentinel list, all eight terminal records included
    pub sub_blocks_b: Vec<SubBlockB>,
    /// Entity list header
    pub entity_header: EntityHeader,
    /// Entities, `entity_header.num_sprites` of them
    pub entities: Vec<EntitySubBlock>,
    /// Sub-header D
    pub sub_header_d: SubHeaderD,
    /// Tail blocks up to end of file
    pub blocks_d: Vec<DataBlockD>,
}

impl Default for SpriteData {
    /// Smallest well-formed sprite data: default sub-headers, single-record
    /// SubBlockA list, eight bare SubBlockB terminators, no entities
    fn default() -> Self {
        Self {
            preamble: SpritePreamble::default(),
            sub_headers_a: vec![SubHeaderA::default(); SUB_HEADER_A_COUNT],
            sub_header_b: SubHeaderB::default(),
            sub_blocks_a: vec![SubBlockA::terminal()],
            sub_blocks_b: vec![SubBlockB::terminal(); SUB_BLOCK_B_TERMINALS],
            entity_header: EntityHeader::default(),
            entities: Vec::new(),
            sub_header_d: SubHeaderD::default(),
            blocks_d: Vec::new(),
        }
    }
}

impl SpriteData {
    /// Index of each chain terminator in `sub_blocks_b`
    ///
    /// Derived from the records on every call; the file does not store it.
    pub fn sub_block_b_boundaries(&self) -> Vec<usize> {
        sentinel::terminal_positions(&self.sub_blocks_b)
    }

    /// The eight SubBlockB chains, each ending on its terminator
    ///
    /// Records after the last terminator (only possible in a hand-edited
    /// model) are not part of any chain.
    pub fn sub_block_b_chains(&self) -> Vec<&[SubBlockB]> {
        let mut chains = Vec::with_capacity(SUB_BLOCK_B_TERMINALS);
        let mut start = 0;
        for end in self.sub_block_b_boundaries() {
            chains.push(&self.sub_blocks_b[start..=end]);
            start = end + 1;
        }
        chains
    }

    pub(crate) fn read<R: Read + Seek>(reader: &mut RecordReader<R>) -> Result<Self> {
        let offset = reader.position();
        segment::expect_tag(reader, SPRITE_TAG)?;

        let preamble = reader.read_record()?;
        let sub_headers_a = reader.read_records(SUB_HEADER_A_COUNT)?;
        let sub_header_b = reader.read_record()?;

        let run_a = sentinel::read_sentinel_list::<SubBlockA, _>(reader, SUB_BLOCK_A_STOP)?;
        let run_b = sentinel::read_sentinel_list::<SubBlockB, _>(reader, SUB_BLOCK_B_STOP)?;
        debug!(
            "Read {} SubBlockA and {} SubBlockB records (chain ends at {:?})",
            run_a.records.len(),
            run_b.records.len(),
            run_b.boundaries
        );

        let entity_header: EntityHeader = reader.read_record()?;
        let entities = reader.read_records(entity_header.num_sprites as usize)?;
        let sub_header_d = reader.read_record()?;

        let tail_offset = reader.position();
        let mut blocks_d = Vec::with_capacity((reader.remaining() / DataBlockD::SIZE as u64) as usize);
        while !reader.is_at_end() {
            blocks_d.push(reader.read_record()?);
        }

        debug!(
            "Read sprite data at offset {:#x}: {} entities, {} tail blocks from {:#x}",
            offset,
            entities.len(),
            blocks_d.len(),
            tail_offset
        );

        Ok(Self {
            preamble,
            sub_headers_a,
            sub_header_b,
            sub_blocks_a: run_a.records,
            sub_blocks_b: run_b.records,
            entity_header,
            entities,
            sub_header_d,
            blocks_d,
        })
    }

    pub(crate) fn write<W: Write + Seek>(&self, writer: &mut RecordWriter<W>) -> Result<()> {
        writer.write_tag(SPRITE_TAG)?;
        writer.write_record(&self.preamble)?;
        writer.write_records(&self.sub_headers_a)?;
        writer.write_record(&self.sub_header_b)?;
        sentinel::write_sentinel_list(writer, &self.sub_blocks_a)?;
        sentinel::write_sentinel_list(writer, &self.sub_blocks_b)?;
        writer.write_record(&self.entity_header)?;
        writer.write_records(&self.entities)?;
        writer.write_record(&self.sub_header_d)?;
        writer.write_records(&self.blocks_d)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.sub_headers_a.len() != SUB_HEADER_A_COUNT {
            return Err(Error::CountMismatch {
                segment: "sub_headers_a",
                expected: SUB_HEADER_A_COUNT as u64,
                actual: self.sub_headers_a.len(),
            });
        }
        if !sentinel::is_well_terminated(&self.sub_blocks_a, SUB_BLOCK_A_STOP) {
            return Err(Error::MalformedSentinelList {
                list: "sub_blocks_a",
                expected: SUB_BLOCK_A_STOP.terminal_count(),
                actual: sentinel::terminal_positions(&self.sub_blocks_a).len(),
            });
        }
        if !sentinel::is_well_terminated(&self.sub_blocks_b, SUB_BLOCK_B_STOP) {
            return Err(Error::MalformedSentinelList {
                list: "sub_blocks_b",
                expected: SUB_BLOCK_B_STOP.terminal_count(),
                actual: self.sub_block_b_boundaries().len(),
            });
        }
        if self.entities.len() != self.entity_header.num_sprites as usize {
            return Err(Error::CountMismatch {
                segment: "entities",
                expected: u64::from(self.entity_header.num_sprites),
                actual: self.entities.len(),
            });
        }
        Ok(())
    }
}
