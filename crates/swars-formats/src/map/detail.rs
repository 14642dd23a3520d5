//! Texture-info and detail phases
//!
//! Texture info is segments 0x00..=0x01. The detail phase covers the map's
//! geometry and lighting, segments 0x02..=0x08: vertices, triangles, meshes,
//! light info, light detail, opaque block I and quads, in that order.

use crate::error::Result;
use crate::map::header::MapHeader;
use crate::map::lighting::{LightDetail, LightInfo};
use crate::map::segment::{
    self, BLOCKS_I, LIGHT_DETAIL, LIGHT_INFO, MESHES, QUAD_TEX_INFO, QUADS, Segment,
    TRI_TEX_INFO, TRIS, VERTICES,
};
use crate::record::{RecordReader, RecordWriter};
use crate::types::{DataBlockI, MeshDetails, Quad, QuadTextureInfo, Tri, TriTextureInfo, Vertex};
use std::io::{Read, Seek, Write};

/// Texture-info phase contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureInfo {
    /// Quad UV mappings (tag 0x00)
    pub quad: Segment<QuadTextureInfo>,
    /// Triangle UV mappings (tag 0x01)
    pub tri: Segment<TriTextureInfo>,
}

impl TextureInfo {
    pub(crate) fn read<R: Read + Seek>(
        reader: &mut RecordReader<R>,
        header: &MapHeader,
    ) -> Result<Self> {
        Ok(Self {
            quad: segment::read_segment(reader, &QUAD_TEX_INFO, header.num_quad_tex)?,
            tri: segment::read_segment(reader, &TRI_TEX_INFO, header.num_tri_tex)?,
        })
    }

    pub(crate) fn write<W: Write + Seek>(&self, writer: &mut RecordWriter<W>) -> Result<()> {
        segment::write_segment(writer, &QUAD_TEX_INFO, &self.quad)?;
        segment::write_segment(writer, &TRI_TEX_INFO, &self.tri)
    }

    pub(crate) fn validate(&self, header: &MapHeader) -> Result<()> {
        self.quad.validate(&QUAD_TEX_INFO, header.num_quad_tex)?;
        self.tri.validate(&TRI_TEX_INFO, header.num_tri_tex)
    }
}

/// Detail phase contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapDetail {
    /// Vertices (tag 0x02)
    pub vertices: Segment<Vertex>,
    /// Triangles (tag 0x03)
    pub tris: Segment<Tri>,
    /// Meshes (tag 0x04)
    pub meshes: Segment<MeshDetails>,
    /// Light list links (tag 0x05)
    pub light_info: Segment<LightInfo>,
    /// Lights (tag 0x06)
    pub light_detail: Segment<LightDetail>,
    /// Opaque block I (tag 0x07)
    pub blocks_i: Segment<DataBlockI>,
    /// Quads (tag 0x08)
    pub quads: Segment<Quad>,
}

impl MapDetail {
    pub(crate) fn read<R: Read + Seek>(
        reader: &mut RecordReader<R>,
        header: &MapHeader,
    ) -> Result<Self> {
        Ok(Self {
            vertices: segment::read_segment(reader, &VERTICES, header.num_verts)?,
            tris: segment::read_segment(reader, &TRIS, header.num_tris)?,
            meshes: segment::read_segment(reader, &MESHES, header.num_meshes)?,
            light_info: segment::read_segment(reader, &LIGHT_INFO, header.num_light_info)?,
            light_detail: segment::read_segment(reader, &LIGHT_DETAIL, header.num_lights)?,
            blocks_i: segment::read_segment(reader, &BLOCKS_I, header.num_block_i)?,
            quads: segment::read_segment(reader, &QUADS, header.num_quads)?,
        })
    }

    pub(crate) fn write<W: Write + Seek>(&self, writer: &mut RecordWriter<W>) -> Result<()> {
        segment::write_segment(writer, &VERTICES, &self.vertices)?;
        segment::write_segment(writer, &TRIS, &self.tris)?;
        segment::write_segment(writer, &MESHES, &self.meshes)?;
        segment::write_segment(writer, &LIGHT_INFO, &self.light_info)?;
        segment::write_segment(writer, &LIGHT_DETAIL, &self.light_detail)?;
        segment::write_segment(writer, &BLOCKS_I, &self.blocks_i)?;
        segment::write_segment(writer, &QUADS, &self.quads)
    }

    pub(crate) fn validate(&self, header: &MapHeader) -> Result<()> {
        self.vertices.validate(&VERTICES, header.num_verts)?;
        self.tris.validate(&TRIS, header.num_tris)?;
        self.meshes.validate(&MESHES, header.num_meshes)?;
        self.light_info.validate(&LIGHT_INFO, header.num_light_info)?;
        self.light_detail.validate(&LIGHT_DETAIL, header.num_lights)?;
        self.blocks_i.validate(&BLOCKS_I, header.num_block_i)?;
        self.quads.validate(&QUADS, header.num_quads)
    }
}
