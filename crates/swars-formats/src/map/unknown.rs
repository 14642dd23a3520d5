//! Unknown phase: opaque blocks P, Q and R
//!
//! Segments 0x0E..=0x10 are header-counted but carry no trailing padding.

use crate::error::Result;
use crate::map::header::MapHeader;
use crate::map::segment::{self, BLOCKS_P, BLOCKS_Q, BLOCKS_R, Segment};
use crate::record::{RecordReader, RecordWriter};
use crate::types::{DataBlockP, DataBlockQ, DataBlockR};
use std::io::{Read, Seek, Write};

/// Unknown phase contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownBlocks {
    /// Opaque block P (tag 0x0E)
    pub blocks_p: Segment<DataBlockP>,
    /// Opaque block Q (tag 0x0F)
    pub blocks_q: Segment<DataBlockQ>,
    /// Opaque block R (tag 0x10)
    pub blocks_r: Segment<DataBlockR>,
}

impl UnknownBlocks {
    pub(crate) fn read<R: Read + Seek>(
        reader: &mut RecordReader<R>,
        header: &MapHeader,
    ) -> Result<Self> {
        Ok(Self {
            blocks_p: segment::read_segment(reader, &BLOCKS_P, header.num_block_p)?,
            blocks_q: segment::read_segment(reader, &BLOCKS_Q, header.num_block_q)?,
            blocks_r: segment::read_segment(reader, &BLOCKS_R, header.num_block_r)?,
        })
    }

    pub(crate) fn write<W: Write + Seek>(&self, writer: &mut RecordWriter<W>) -> Result<()> {
        segment::write_segment(writer, &BLOCKS_P, &self.blocks_p)?;
        segment::write_segment(writer, &BLOCKS_Q, &self.blocks_q)?;
        segment::write_segment(writer, &BLOCKS_R, &self.blocks_r)
    }

    pub(crate) fn validate(&self, header: &MapHeader) -> Result<()> {
        self.blocks_p.validate(&BLOCKS_P, header.num_block_p)?;
        self.blocks_q.validate(&BLOCKS_Q, header.num_block_q)?;
        self.blocks_r.validate(&BLOCKS_R, header.num_block_r)
    }
}
