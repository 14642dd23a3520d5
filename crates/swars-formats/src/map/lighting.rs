//! Light records

use crate::record::Record;
use binrw::{BinRead, BinWrite};

/// Light list link (6 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct LightInfo {
    /// Light-detail index
    pub light: u16,
    /// Next link in the chain
    pub next: u16,
    /// Unknown
    pub unknown: u16,
}

impl Record for LightInfo {
    const SIZE: usize = 6;
}

/// Point light (32 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct LightDetail {
    /// X coordinate
    pub x: i16,
    /// Y coordinate
    pub y: i16,
    /// Z coordinate
    pub z: i16,
    /// Intensity
    pub intensity: i16,
    /// Falloff range
    pub range: u16,
    /// Colour
    pub colour: u16,
    /// Flags
    pub flags: u16,
    /// Unknown
    pub unknown: [u8; 18],
}

impl Record for LightDetail {
    const SIZE: usize = 32;
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::RecordReader;

    #[test]
    fn test_light_detail_layout() {
        let mut data = vec![0u8; LightDetail::SIZE];
        data[0..2].copy_from_slice(&(-8i16).to_le_bytes());
        data[6..8].copy_from_slice(&200i16.to_le_bytes());
        data[10..12].copy_from_slice(&0x7C00u16.to_le_bytes());
        data[31] = 0x5A;

        let light: LightDetail = RecordReader::from_bytes(&data).read_record().unwrap();
        assert_eq!(light.x, -8);
        assert_eq!(light.intensity, 200);
        assert_eq!(light.colour, 0x7C00);
        assert_eq!(light.unknown[17], 0x5A);
    }

    #[test]
    fn test_light_info_chain_fields() {
        let data = [3, 0, 9, 0, 0xFF, 0xFF];
        let info: LightInfo = RecordReader::from_bytes(&data).read_record().unwrap();
        assert_eq!(info.light, 3);
        assert_eq!(info.next, 9);
        assert_eq!(info.unknown, 0xFFFF);
    }
}
