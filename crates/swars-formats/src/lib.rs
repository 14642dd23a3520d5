//! File format parsers and builders for Syndicate Wars map and vehicle files
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Many format-specific terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
#![allow(clippy::float_cmp)] // Heights are exact multiples of 1/32
#![allow(clippy::derive_partial_eq_without_eq)] // Binary format structs
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::use_self)] // Type clarity
//! This crate provides symmetric (parser and builder) implementations for the
//! two binary formats a Syndicate Wars modding workflow touches:
//!
//! - **Map** (`.MAD`): a 72-byte count header, a 128×128 terrain grid, sixteen
//!   tagged record segments with fixed-length opaque padding, and a sprite
//!   segment that mixes fixed records, two sentinel-terminated lists and an
//!   end-of-stream record run.
//! - **Vehicle mesh**: a count header followed by six untagged record arrays
//!   that reuse the map's geometry and texture records.
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: every parse has an exact inverse
//! - **Opaque Preservation**: unknown fields and padding are kept verbatim
//! - **No Partial Models**: a failed load never hands out a half-built map
//! - **Round-Trip Guarantee**: build(parse(data)) == data
//!
//! # Example
//!
//! ```rust,no_run
//! use swars_formats::map::Map;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut map = Map::load("MAPS/MAP001.MAD")?;
//! let mut mesh = map.detail.meshes.records[0];
//! mesh.offset_y += 64;
//! map.set_mesh(0, mesh)?;
//! map.save_to_original_path()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod error;
/// Map file format (`.MAD`): header, terrain, tagged segments, sprite data
///
/// See the [`map`] module for the exact segment order and the load/save
/// entry points used by editors.
pub mod map;
pub mod record;
/// Record types shared by the map and vehicle formats
pub mod types;
/// Vehicle mesh file format: header plus six untagged record arrays
pub mod vehicle;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use error::{Error, Result};
pub use map::{Map, MapBuilder};
pub use vehicle::{VehicleMesh, VehicleMeshBuilder};

/// Common format trait implemented by every top-level file model
pub trait SwarsFormat: Sized {
    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>>;

    /// Verify round-trip correctness
    fn verify_round_trip(data: &[u8]) -> Result<()> {
        let parsed = Self::parse(data)?;
        let rebuilt = parsed.build()?;
        if data != rebuilt.as_slice() {
            let offset = data
                .iter()
                .zip(&rebuilt)
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| data.len().min(rebuilt.len()));
            return Err(Error::RoundTripMismatch {
                offset: offset as u64,
                original_len: data.len() as u64,
                rebuilt_len: rebuilt.len() as u64,
            });
        }
        Ok(())
    }
}
