//! Terrain grid (first phase after the header)
//!
//! 128×128 fixed-size cells with no tag and no count. Cells are stored
//! column-major relative to how the engine addresses heights: disk record
//! `x * 128 + y` is the cell at row `y`, column `x`.

use crate::error::{Error, Result};
use crate::record::{Record, RecordReader, RecordWriter};
use binrw::{BinRead, BinWrite};
use std::io::{Read, Seek, Write};
use tracing::debug;

/// Cells per grid side
pub const GRID_SIZE: usize = 128;

/// Total number of terrain cells
pub const TERRAIN_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Raw height units per world unit
pub const HEIGHT_SCALE: f32 = 32.0;

/// One terrain cell (18 bytes)
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[brw(little)]
pub struct TerrainEntry {
    /// Floor texture index
    pub texture: u16,
    /// Shade
    pub shade: u16,
    /// Shade (red channel)
    pub shade_r: u8,
    /// Cell flags
    pub flags: u8,
    /// Child thing index
    pub child: i16,
    /// Head of the column list
    pub column_head: u16,
    /// Zip-line index
    pub zip: u16,
    /// Raw height sample
    pub vertex_height: i16,
    /// Secondary flags
    pub flags2: u8,
    /// Unknown
    pub unknown_0: u8,
    /// Unknown
    pub unknown_1: u16,
}

impl Record for TerrainEntry {
    const SIZE: usize = 18;
}

impl TerrainEntry {
    /// Height in world units
    pub fn height(&self) -> f32 {
        f32::from(self.vertex_height) / HEIGHT_SCALE
    }
}

/// Heights indexed by `(row, col)`, derived from the disk-order cells
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    values: Vec<f32>,
}

impl HeightMap {
    /// Build the transposed height grid from cells in disk order
    ///
    /// Cells beyond the first [`TERRAIN_CELLS`] are ignored and missing cells
    /// read as zero height.
    pub fn from_entries(entries: &[TerrainEntry]) -> Self {
        let mut values = vec![0.0; TERRAIN_CELLS];
        for (index, entry) in entries.iter().take(TERRAIN_CELLS).enumerate() {
            let (x, y) = (index / GRID_SIZE, index % GRID_SIZE);
            values[y * GRID_SIZE + x] = entry.height();
        }
        Self { values }
    }

    /// Height at `(row, col)`, or `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        self.values.get(row * GRID_SIZE + col).copied()
    }

    /// Row-major heights
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Terrain phase: raw cells in disk order
///
/// The transposed height grid is derived on demand by [`Terrain::heights`],
/// so it always reflects the current cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrain {
    /// Cells exactly as stored, `x * 128 + y`
    pub entries: Vec<TerrainEntry>,
}

impl Terrain {
    /// Wrap disk-order cells
    pub fn from_entries(entries: Vec<TerrainEntry>) -> Self {
        Self { entries }
    }

    /// Flat grid of default cells
    pub fn flat() -> Self {
        Self::from_entries(vec![TerrainEntry::default(); TERRAIN_CELLS])
    }

    /// Heights indexed by `(row, col)`
    pub fn heights(&self) -> HeightMap {
        HeightMap::from_entries(&self.entries)
    }

    /// Check the grid holds exactly [`TERRAIN_CELLS`] cells
    pub fn validate(&self) -> Result<()> {
        if self.entries.len() != TERRAIN_CELLS {
            return Err(Error::CountMismatch {
                segment: "terrain",
                expected: TERRAIN_CELLS as u64,
                actual: self.entries.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn read<R: Read + Seek>(reader: &mut RecordReader<R>) -> Result<Self> {
        let offset = reader.position();
        let entries = reader.read_records(TERRAIN_CELLS)?;
        debug!("Read {} terrain cells at offset {:#x}", TERRAIN_CELLS, offset);
        Ok(Self::from_entries(entries))
    }

    pub(crate) fn write<W: Write + Seek>(&self, writer: &mut RecordWriter<W>) -> Result<()> {
        writer.write_records(&self.entries)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn numbered_cells() -> Vec<TerrainEntry> {
        (0..TERRAIN_CELLS)
            .map(|i| TerrainEntry {
                vertex_height: i as i16,
                ..TerrainEntry::default()
            })
            .collect()
    }

    #[test]
    fn test_heights_are_transposed() {
        let terrain = Terrain::from_entries(numbered_cells());
        for x in [0usize, 1, 17, 127] {
            for y in [0usize, 3, 64, 127] {
                let expected = (x * GRID_SIZE + y) as f32 / 32.0;
                assert_eq!(terrain.heights().get(y, x), Some(expected));
            }
        }
    }

    #[test]
    fn test_height_scale() {
        let entry = TerrainEntry {
            vertex_height: -96,
            ..TerrainEntry::default()
        };
        assert_eq!(entry.height(), -3.0);
    }

    #[test]
    fn test_out_of_grid() {
        let terrain = Terrain::flat();
        assert_eq!(terrain.heights().get(128, 0), None);
        assert_eq!(terrain.heights().get(0, 128), None);
        assert_eq!(terrain.heights().get(127, 127), Some(0.0));
    }

    #[test]
    fn test_read_requires_full_grid() {
        let data = vec![0u8; TERRAIN_CELLS * TerrainEntry::SIZE - 1];
        let mut reader = RecordReader::from_bytes(&data);
        assert!(Terrain::read(&mut reader).is_err());
    }

    #[test]
    fn test_heights_follow_edits() {
        let mut terrain = Terrain::flat();
        assert_eq!(terrain.heights().get(2, 5), Some(0.0));
        terrain.entries[5 * GRID_SIZE + 2].vertex_height = 64;
        assert_eq!(terrain.heights().get(2, 5), Some(2.0));
    }

    #[test]
    fn test_validate_cell_count() {
        let mut terrain = Terrain::flat();
        assert!(terrain.validate().is_ok());

        terrain.entries.pop();
        assert!(matches!(
            terrain.validate(),
            Err(Error::CountMismatch {
                segment: "terrain",
                actual,
                ..
            }) if actual == TERRAIN_CELLS - 1
        ));
    }
}
