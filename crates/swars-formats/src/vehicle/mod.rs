//! Vehicle mesh file support
//!
//! A vehicle mesh file is a [`VehicleHeader`] followed by six record arrays
//! with no tags and no padding:
//!
//! ```text
//! header | vertices | tris | quads | meshes | quad_tex | tri_tex
//! ```
//!
//! The record types are the ones the map's detail segments use. Bytes after
//! the last counted array are not part of the model and are dropped on save.

mod builder;
pub mod header;

pub use builder::VehicleMeshBuilder;
pub use header::VehicleHeader;

use crate::SwarsFormat;
use crate::error::{Error, Result};
use crate::record::{self, RecordReader, RecordWriter};
use crate::types::{MeshDetails, Quad, QuadTextureInfo, Tri, TriTextureInfo, Vertex};
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use tracing::{debug, info};

/// A vehicle mesh file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleMesh {
    /// Count header, written back unchanged
    pub header: VehicleHeader,
    /// Vertices
    pub vertices: Vec<Vertex>,
    /// Triangles
    pub tris: Vec<Tri>,
    /// Quads
    pub quads: Vec<Quad>,
    /// Meshes
    pub meshes: Vec<MeshDetails>,
    /// Quad texture mappings
    pub quad_tex: Vec<QuadTextureInfo>,
    /// Triangle texture mappings
    pub tri_tex: Vec<TriTextureInfo>,
}

impl VehicleMesh {
    /// Load a vehicle mesh from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = record::open_reader(path)?;
        let mesh = Self::read_from(&mut reader)?;
        info!(
            "Loaded vehicle mesh {} ({} meshes, {} faces)",
            path.display(),
            mesh.meshes.len(),
            mesh.tris.len() + mesh.quads.len()
        );
        Ok(mesh)
    }

    /// Parse a vehicle mesh from an in-memory buffer
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read_from(&mut RecordReader::from_bytes(data))
    }

    /// Write the vehicle mesh to `path`, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let written = record::save_atomically(path, |writer| self.write_to(writer))?;
        info!("Saved vehicle mesh {} ({} bytes)", path.display(), written);
        Ok(())
    }

    /// Serialize the vehicle mesh to bytes
    pub fn build(&self) -> Result<Vec<u8>> {
        let capacity = usize::try_from(self.header.encoded_len()).unwrap_or(0);
        let mut writer = RecordWriter::new(Cursor::new(Vec::with_capacity(capacity)));
        self.write_to(&mut writer)?;
        Ok(writer.into_inner().into_inner())
    }

    /// Check every list against its header count
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("vertices", self.header.num_verts, self.vertices.len()),
            ("tris", self.header.num_tris, self.tris.len()),
            ("quads", self.header.num_quads, self.quads.len()),
            ("meshes", self.header.num_meshes, self.meshes.len()),
            ("quad_tex", self.header.num_quad_uv, self.quad_tex.len()),
            ("tri_tex", self.header.num_tri_uv, self.tri_tex.len()),
        ];
        for (segment, expected, actual) in checks {
            if expected as usize != actual {
                return Err(Error::CountMismatch {
                    segment,
                    expected: u64::from(expected),
                    actual,
                });
            }
        }
        Ok(())
    }

    fn read_from<R: Read + Seek>(reader: &mut RecordReader<R>) -> Result<Self> {
        let header: VehicleHeader = reader.read_record()?;
        let mesh = Self {
            header,
            vertices: reader.read_records(header.num_verts as usize)?,
            tris: reader.read_records(header.num_tris as usize)?,
            quads: reader.read_records(header.num_quads as usize)?,
            meshes: reader.read_records(header.num_meshes as usize)?,
            quad_tex: reader.read_records(header.num_quad_uv as usize)?,
            tri_tex: reader.read_records(header.num_tri_uv as usize)?,
        };
        if !reader.is_at_end() {
            debug!(
                "Ignoring {} trailing bytes after vehicle mesh at offset {:#x}",
                reader.remaining(),
                reader.position()
            );
        }
        Ok(mesh)
    }

    fn write_to<W: Write + Seek>(&self, writer: &mut RecordWriter<W>) -> Result<()> {
        writer.write_record(&self.header)?;
        writer.write_records(&self.vertices)?;
        writer.write_records(&self.tris)?;
        writer.write_records(&self.quads)?;
        writer.write_records(&self.meshes)?;
        writer.write_records(&self.quad_tex)?;
        writer.write_records(&self.tri_tex)
    }
}

impl SwarsFormat for VehicleMesh {
    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    fn build(&self) -> Result<Vec<u8>> {
        self.build()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_vehicle, test_round_trip};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vehicle_round_trip() {
        test_round_trip(&sample_vehicle()).unwrap();
    }

    #[test]
    fn test_build_length_matches_header() {
        let mesh = sample_vehicle();
        let data = mesh.build().unwrap();
        assert_eq!(data.len() as u64, mesh.header.encoded_len());
    }

    #[test]
    fn test_truncated_vehicle() {
        let data = sample_vehicle().build().unwrap();
        let err = VehicleMesh::parse(&data[..data.len() - 1]).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { .. }));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mesh = sample_vehicle();
        let mut data = mesh.build().unwrap();
        data.extend_from_slice(&[0xAB; 7]);
        assert_eq!(VehicleMesh::parse(&data).unwrap(), mesh);
    }

    #[test]
    fn test_validate_count_mismatch() {
        let mut mesh = sample_vehicle();
        assert!(mesh.validate().is_ok());
        mesh.quads.clear();
        assert!(matches!(
            mesh.validate(),
            Err(Error::CountMismatch {
                segment: "quads",
                ..
            })
        ));
    }
}
