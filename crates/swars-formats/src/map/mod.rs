//! Map file (`.MAD`) support
//!
//! A map is read and written in six sequential phases, never seeking:
//!
//! 1. **Terrain**: [`MapHeader`] then 128×128 [`TerrainEntry`] cells
//! 2. **Texture info**: tags 0x00..=0x01
//! 3. **Detail**: tags 0x02..=0x08 (geometry, lights, opaque block I)
//! 4. **Navigation**: tags 0x09..=0x0D
//! 5. **Unknown blocks**: tags 0x0E..=0x10, unpadded
//! 6. **Sprites**: tag 0x11 to end of file
//!
//! Each tagged segment holds exactly the number of records its header field
//! declares, followed by a fixed-length padding run. See [`segment`] for the
//! per-segment constants and [`sprite`] for the trailing sprite layout.
//!
//! # Editing
//!
//! ```rust,no_run
//! use swars_formats::map::Map;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut map = Map::load("MAPS/MAP001.MAD")?;
//! println!("{} meshes, {} tail blocks", map.detail.meshes.len(), map.sprites.blocks_d.len());
//!
//! let mut block = map.sprites.blocks_d[0];
//! block.set_word(0, 0);
//! map.set_block_d(0, block)?;
//! map.save("MAPS/MAP001.NEW")?;
//! # Ok(())
//! # }
//! ```
//!
//! Saving never recomputes header counts. Call [`Map::validate`] before
//! saving an edited model to catch list lengths that no longer match.

mod builder;
pub mod detail;
pub mod header;
pub mod lighting;
pub mod navigation;
pub mod segment;
pub mod sentinel;
pub mod sprite;
pub mod terrain;
pub mod unknown;

pub use builder::MapBuilder;
pub use detail::{MapDetail, TextureInfo};
pub use header::MapHeader;
pub use lighting::{LightDetail, LightInfo};
pub use navigation::{Navigation, NpcBlockLine, NpcNavPoint, VehicleNavPoint};
pub use segment::{Padding, Segment, SegmentLayout};
pub use sprite::{
    EntityHeader, EntitySubBlock, SpriteData, SpritePreamble, SubBlockA, SubBlockB, SubHeaderA,
    SubHeaderB, SubHeaderD,
};
pub use terrain::{HeightMap, Terrain, TerrainEntry};
pub use unknown::UnknownBlocks;

use crate::SwarsFormat;
use crate::error::{Error, Result};
use crate::record::{self, RecordReader, RecordWriter};
use crate::types::{DataBlockD, MeshDetails};
use std::io::{Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A complete map file
///
/// Every list is owned by the map. Fields are public for inspection and
/// free-form editing; the indexed setters are the bounds-checked way to
/// replace single records.
#[derive(Debug, Clone)]
pub struct Map {
    /// Count header, written back unchanged
    pub header: MapHeader,
    /// Terrain grid
    pub terrain: Terrain,
    /// Texture-info phase
    pub textures: TextureInfo,
    /// Geometry and lighting phase
    pub detail: MapDetail,
    /// Navigation phase
    pub navigation: Navigation,
    /// Unpadded opaque block phase
    pub unknown: UnknownBlocks,
    /// Sprite and entity data
    pub sprites: SpriteData,
    source_path: Option<PathBuf>,
}

impl PartialEq for Map {
    /// Compares file contents only; where the map was loaded from is ignored
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.terrain == other.terrain
            && self.textures == other.textures
            && self.detail == other.detail
            && self.navigation == other.navigation
            && self.unknown == other.unknown
            && self.sprites == other.sprites
    }
}

impl Map {
    /// Load a map from disk
    ///
    /// The path is remembered for [`Map::save_to_original_path`]. Any tag
    /// mismatch or short read aborts the load.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = record::open_reader(path)?;
        let mut map = Self::read_from(&mut reader)?;
        map.source_path = Some(path.to_path_buf());

        info!(
            "Loaded map {} ({} bytes, {} meshes, {} entities)",
            path.display(),
            reader.stream_len(),
            map.detail.meshes.len(),
            map.sprites.entities.len()
        );
        Ok(map)
    }

    /// Parse a map from an in-memory buffer
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read_from(&mut RecordReader::from_bytes(data))
    }

    /// Write the map to `path`, replacing any existing file
    ///
    /// Header counts are written as stored, even if a list has been resized.
    /// The destination is only replaced once the whole map has been written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let written = record::save_atomically(path, |writer| self.write_to(writer))?;
        info!("Saved map {} ({} bytes)", path.display(), written);
        Ok(())
    }

    /// Write the map back to the path it was loaded from
    pub fn save_to_original_path(&self) -> Result<()> {
        let path = self.source_path.as_deref().ok_or(Error::NoSourcePath)?;
        self.save(path)
    }

    /// Path the map was loaded from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Serialize the map to bytes
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut writer = RecordWriter::new(Cursor::new(Vec::new()));
        self.write_to(&mut writer)?;
        Ok(writer.into_inner().into_inner())
    }

    /// Replace the mesh at `index`
    ///
    /// Fails with [`Error::IndexOutOfRange`] and leaves the map untouched if
    /// `index` is past the end of the mesh list.
    pub fn set_mesh(&mut self, index: usize, mesh: MeshDetails) -> Result<()> {
        record::set_indexed(&mut self.detail.meshes.records, index, mesh)
    }

    /// Replace the tail block at `index`
    pub fn set_block_d(&mut self, index: usize, block: DataBlockD) -> Result<()> {
        record::set_indexed(&mut self.sprites.blocks_d, index, block)
    }

    /// Check that the model would load back as written
    ///
    /// Reports a terrain grid that is not 128×128 cells, then the first list
    /// whose length differs from its header count, padding buffer of the
    /// wrong length, or malformed sentinel list.
    pub fn validate(&self) -> Result<()> {
        self.terrain.validate()?;
        self.textures.validate(&self.header)?;
        self.detail.validate(&self.header)?;
        self.navigation.validate(&self.header)?;
        self.unknown.validate(&self.header)?;
        self.sprites.validate()
    }

    /// `(tag, offset)` of every segment tag as [`Map::build`] would lay it out
    pub fn tag_offsets(&self) -> Result<Vec<(u8, u64)>> {
        let mut writer = RecordWriter::new(Cursor::new(Vec::new()));
        self.write_to(&mut writer)?;
        Ok(writer.tag_offsets().to_vec())
    }

    fn read_from<R: Read + Seek>(reader: &mut RecordReader<R>) -> Result<Self> {
        let header: MapHeader = reader.read_record()?;
        debug!("Map header version {}", header.version);

        let terrain = Terrain::read(reader)?;
        let textures = TextureInfo::read(reader, &header)?;
        let detail = MapDetail::read(reader, &header)?;
        let navigation = Navigation::read(reader, &header)?;
        let unknown = UnknownBlocks::read(reader, &header)?;
        let sprites = SpriteData::read(reader)?;

        Ok(Self {
            header,
            terrain,
            textures,
            detail,
            navigation,
            unknown,
            sprites,
            source_path: None,
        })
    }

    fn write_to<W: Write + Seek>(&self, writer: &mut RecordWriter<W>) -> Result<()> {
        writer.write_record(&self.header)?;
        self.terrain.write(writer)?;
        self.textures.write(writer)?;
        self.detail.write(writer)?;
        self.navigation.write(writer)?;
        self.unknown.write(writer)?;
        self.sprites.write(writer)
    }
}

impl SwarsFormat for Map {
    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    fn build(&self) -> Result<Vec<u8>> {
        self.build()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::test_utils::{sample_map, test_round_trip};
    use crate::types::Vertex;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_preserves_padding() {
        let map = sample_map();
        assert!(!map.detail.vertices.padding.is_zeroed());
        test_round_trip(&map).unwrap();
    }

    #[test]
    fn test_built_length() {
        let map = sample_map();
        let data = map.build().unwrap();
        let tags = map.tag_offsets().unwrap();
        assert_eq!(tags.len(), 18);
        assert!(tags.iter().enumerate().all(|(i, (tag, _))| *tag as usize == i));
        // Terrain runs from the end of the header to the first tag
        assert_eq!(tags[0].1, (MapHeader::SIZE + TerrainEntry::SIZE * terrain::TERRAIN_CELLS) as u64);
        assert!((tags[17].1 as usize) < data.len());
    }

    #[test]
    fn test_parse_rejects_out_of_order_tag() {
        let map = sample_map();
        let mut data = map.build().unwrap();
        let tags = map.tag_offsets().unwrap();
        let (_, offset) = tags[5];
        data[offset as usize] = 0x06;

        match Map::parse(&data).unwrap_err() {
            Error::TagMismatch {
                expected,
                actual,
                offset: at,
            } => {
                assert_eq!(expected, 0x05);
                assert_eq!(actual, 0x06);
                assert_eq!(at, offset);
            }
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[test]
    fn test_set_mesh_out_of_range_leaves_map() {
        let mut map = sample_map();
        let before = map.clone();
        let len = map.detail.meshes.len();
        let err = map.set_mesh(len, MeshDetails::default()).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index, .. } if index == len));
        assert_eq!(map, before);
    }

    #[test]
    fn test_save_to_original_path_needs_source() {
        let map = sample_map();
        assert!(map.source_path().is_none());
        assert!(matches!(map.save_to_original_path(), Err(Error::NoSourcePath)));
    }

    #[test]
    fn test_validate_reports_header_mismatch() {
        let mut map = sample_map();
        assert!(map.validate().is_ok());

        map.detail.vertices.records.push(Vertex::default());
        assert!(matches!(
            map.validate(),
            Err(Error::CountMismatch {
                segment: "vertices",
                ..
            })
        ));
        // Still builds; the stale count is written as-is
        assert!(map.build().is_ok());
    }

    #[test]
    fn test_validate_reports_short_terrain() {
        let mut map = sample_map();
        map.terrain.entries.pop();
        assert!(matches!(
            map.validate(),
            Err(Error::CountMismatch {
                segment: "terrain",
                expected,
                ..
            }) if expected == terrain::TERRAIN_CELLS as u64
        ));
        // A short grid shifts every tag that follows it
        assert!(matches!(
            Map::parse(&map.build().unwrap()),
            Err(Error::TagMismatch { .. })
        ));
    }
}
