//! Opaque fixed-size data blocks
//!
//! Several map segments hold records whose field meanings have not been
//! reverse-engineered. They are carried as raw byte arrays of their known
//! size so that load/save round-trips them untouched.

use crate::record::Record;
use binrw::{BinRead, BinResult, BinWrite, Endian};
use std::io::{Read, Seek, Write};

/// Raw record of `N` bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpaqueBlock<const N: usize> {
    /// Record bytes, verbatim from the stream
    pub data: [u8; N],
}

impl<const N: usize> OpaqueBlock<N> {
    /// Wrap raw bytes
    pub const fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Number of little-endian 16-bit words in the block
    pub const fn word_count(&self) -> usize {
        N / 2
    }

    /// Read the little-endian 16-bit word at `index`
    pub fn word(&self, index: usize) -> Option<u16> {
        let start = index.checked_mul(2)?;
        let bytes = self.data.get(start..start.checked_add(2)?)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Overwrite the little-endian 16-bit word at `index`
    ///
    /// Returns `false` when `index` is past the end of the block.
    pub fn set_word(&mut self, index: usize, value: u16) -> bool {
        let Some(range) = index
            .checked_mul(2)
            .and_then(|start| Some(start..start.checked_add(2)?))
        else {
            return false;
        };
        match self.data.get_mut(range) {
            Some(bytes) => {
                bytes.copy_from_slice(&value.to_le_bytes());
                true
            }
            None => false,
        }
    }
}

impl<const N: usize> Default for OpaqueBlock<N> {
    fn default() -> Self {
        Self { data: [0; N] }
    }
}

impl<const N: usize> BinRead for OpaqueBlock<N> {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _endian: Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<Self> {
        let mut data = [0u8; N];
        reader.read_exact(&mut data)?;
        Ok(Self { data })
    }
}

impl<const N: usize> BinWrite for OpaqueBlock<N> {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        _endian: Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<()> {
        writer.write_all(&self.data)?;
        Ok(())
    }
}

impl<const N: usize> Record for OpaqueBlock<N> {
    const SIZE: usize = N;
}

/// Detail-phase block I (24 bytes)
pub type DataBlockI = OpaqueBlock<24>;
/// Navigation-phase block K (20 bytes)
pub type DataBlockK = OpaqueBlock<20>;
/// Navigation-phase block M (12 bytes)
pub type DataBlockM = OpaqueBlock<12>;
/// Unknown-phase block P (16 bytes)
pub type DataBlockP = OpaqueBlock<16>;
/// Unknown-phase block Q (20 bytes)
pub type DataBlockQ = OpaqueBlock<20>;
/// Unknown-phase block R (30 bytes)
pub type DataBlockR = OpaqueBlock<30>;
/// Tail block D read to end of stream (84 words); tied to building geometry
pub type DataBlockD = OpaqueBlock<168>;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::{RecordReader, RecordWriter};
    use std::io::Cursor;

    #[test]
    fn test_opaque_preserves_bytes() {
        let data: Vec<u8> = (0..30).map(|i| (i * 7) as u8).collect();
        let block: DataBlockR = RecordReader::from_bytes(&data).read_record().unwrap();
        assert_eq!(&block.data[..], &data[..]);

        let mut buffer = Vec::new();
        RecordWriter::new(Cursor::new(&mut buffer))
            .write_record(&block)
            .unwrap();
        assert_eq!(buffer, data);
    }

    #[test]
    fn test_block_d_words() {
        let mut block = DataBlockD::default();
        assert_eq!(block.word_count(), 84);
        assert!(block.set_word(31, 0x1234));
        assert_eq!(block.word(31), Some(0x1234));
        assert_eq!(block.data[62], 0x34);
        assert_eq!(block.data[63], 0x12);

        assert!(!block.set_word(84, 1));
        assert_eq!(block.word(84), None);
        assert_eq!(block.word(usize::MAX), None);
    }

    #[test]
    fn test_declared_sizes() {
        assert_eq!(DataBlockI::SIZE, 24);
        assert_eq!(DataBlockK::SIZE, 20);
        assert_eq!(DataBlockM::SIZE, 12);
        assert_eq!(DataBlockP::SIZE, 16);
        assert_eq!(DataBlockQ::SIZE, 20);
        assert_eq!(DataBlockR::SIZE, 30);
        assert_eq!(DataBlockD::SIZE, 168);
    }
}
