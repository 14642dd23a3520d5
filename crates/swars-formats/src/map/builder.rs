//! Builder pattern for creating maps from record lists

use crate::error::{Error, Result};
use crate::map::detail::{MapDetail, TextureInfo};
use crate::map::header::MapHeader;
use crate::map::lighting::{LightDetail, LightInfo};
use crate::map::navigation::{Navigation, NpcBlockLine, NpcNavPoint, VehicleNavPoint};
use crate::map::segment::{
    BLOCKS_I, BLOCKS_K, BLOCKS_M, BLOCKS_P, BLOCKS_Q, BLOCKS_R, LIGHT_DETAIL, LIGHT_INFO, MESHES,
    NPC_BLOCK_LINES, NPC_NAV_POINTS, QUAD_TEX_INFO, QUADS, Segment, SegmentLayout, TRI_TEX_INFO,
    TRIS, VEHICLE_NAV_POINTS, VERTICES,
};
use crate::map::sprite::{EntitySubBlock, SpriteData, SubBlockA, SubBlockB, SubHeaderA};
use crate::map::terrain::{Terrain, TerrainEntry};
use crate::map::unknown::UnknownBlocks;
use crate::map::Map;
use crate::types::{
    DataBlockD, DataBlockI, DataBlockK, DataBlockM, DataBlockP, DataBlockQ, DataBlockR,
    MeshDetails, Quad, QuadTextureInfo, Tri, TriTextureInfo, Vertex,
};

/// Builder for creating maps
///
/// Header counts are taken from the list lengths when [`MapBuilder::build`]
/// runs and every padded segment gets zeroed padding of its fixed length.
/// Sprite data starts as the smallest well-formed layout (see
/// [`SpriteData::default`]); the entity header's sprite count follows the
/// entity list.
///
/// # Example
///
/// ```rust
/// use swars_formats::map::MapBuilder;
/// use swars_formats::types::{MeshDetails, Vertex};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let map = MapBuilder::new()
///     .add_vertex(Vertex { x: 64, ..Vertex::default() })
///     .add_mesh(MeshDetails::default())
///     .build()?;
///
/// assert_eq!(map.header.num_verts, 1);
/// assert_eq!(map.header.num_meshes, 1);
/// # Ok(())
/// # }
/// ```
pub struct MapBuilder {
    version: u32,
    terrain: Option<Vec<TerrainEntry>>,
    quad_tex_info: Vec<QuadTextureInfo>,
    tri_tex_info: Vec<TriTextureInfo>,
    vertices: Vec<Vertex>,
    tris: Vec<Tri>,
    meshes: Vec<MeshDetails>,
    light_info: Vec<LightInfo>,
    light_detail: Vec<LightDetail>,
    blocks_i: Vec<DataBlockI>,
    quads: Vec<Quad>,
    blocks_k: Vec<DataBlockK>,
    vehicle_nav_points: Vec<VehicleNavPoint>,
    blocks_m: Vec<DataBlockM>,
    npc_nav_points: Vec<NpcNavPoint>,
    npc_block_lines: Vec<NpcBlockLine>,
    blocks_p: Vec<DataBlockP>,
    blocks_q: Vec<DataBlockQ>,
    blocks_r: Vec<DataBlockR>,
    sprites: SpriteData,
}

impl MapBuilder {
    /// Create an empty builder with a flat terrain grid
    pub fn new() -> Self {
        Self {
            version: 0,
            terrain: None,
            quad_tex_info: Vec::new(),
            tri_tex_info: Vec::new(),
            vertices: Vec::new(),
            tris: Vec::new(),
            meshes: Vec::new(),
            light_info: Vec::new(),
            light_detail: Vec::new(),
            blocks_i: Vec::new(),
            quads: Vec::new(),
            blocks_k: Vec::new(),
            vehicle_nav_points: Vec::new(),
            blocks_m: Vec::new(),
            npc_nav_points: Vec::new(),
            npc_block_lines: Vec::new(),
            blocks_p: Vec::new(),
            blocks_q: Vec::new(),
            blocks_r: Vec::new(),
            sprites: SpriteData::default(),
        }
    }

    /// Create builder from an existing map
    ///
    /// Record lists and sprite data are copied; padding contents are not, so
    /// the built map carries zeroed padding.
    pub fn from_map(map: &Map) -> Self {
        Self {
            version: map.header.version,
            terrain: Some(map.terrain.entries.clone()),
            quad_tex_info: map.textures.quad.records.clone(),
            tri_tex_info: map.textures.tri.records.clone(),
            vertices: map.detail.vertices.records.clone(),
            tris: map.detail.tris.records.clone(),
            meshes: map.detail.meshes.records.clone(),
            light_info: map.detail.light_info.records.clone(),
            light_detail: map.detail.light_detail.records.clone(),
            blocks_i: map.detail.blocks_i.records.clone(),
            quads: map.detail.quads.records.clone(),
            blocks_k: map.navigation.blocks_k.records.clone(),
            vehicle_nav_points: map.navigation.vehicle_nav_points.records.clone(),
            blocks_m: map.navigation.blocks_m.records.clone(),
            npc_nav_points: map.navigation.npc_nav_points.records.clone(),
            npc_block_lines: map.navigation.npc_block_lines.records.clone(),
            blocks_p: map.unknown.blocks_p.records.clone(),
            blocks_q: map.unknown.blocks_q.records.clone(),
            blocks_r: map.unknown.blocks_r.records.clone(),
            sprites: map.sprites.clone(),
        }
    }

    /// Set the opaque header version word
    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Set the terrain grid, in disk order (`x * 128 + y`)
    ///
    /// Must hold exactly 128×128 cells; checked by [`MapBuilder::build`].
    #[must_use]
    pub fn terrain(mut self, entries: Vec<TerrainEntry>) -> Self {
        self.terrain = Some(entries);
        self
    }

    /// Set the quad texture-info list
    #[must_use]
    pub fn quad_tex_info(mut self, records: Vec<QuadTextureInfo>) -> Self {
        self.quad_tex_info = records;
        self
    }

    /// Set the triangle texture-info list
    #[must_use]
    pub fn tri_tex_info(mut self, records: Vec<TriTextureInfo>) -> Self {
        self.tri_tex_info = records;
        self
    }

    /// Append a vertex
    #[must_use]
    pub fn add_vertex(mut self, vertex: Vertex) -> Self {
        self.vertices.push(vertex);
        self
    }

    /// Set the vertex list
    #[must_use]
    pub fn vertices(mut self, records: Vec<Vertex>) -> Self {
        self.vertices = records;
        self
    }

    /// Set the triangle list
    #[must_use]
    pub fn tris(mut self, records: Vec<Tri>) -> Self {
        self.tris = records;
        self
    }

    /// Append a mesh
    #[must_use]
    pub fn add_mesh(mut self, mesh: MeshDetails) -> Self {
        self.meshes.push(mesh);
        self
    }

    /// Set the mesh list
    #[must_use]
    pub fn meshes(mut self, records: Vec<MeshDetails>) -> Self {
        self.meshes = records;
        self
    }

    /// Set the light-info list
    #[must_use]
    pub fn light_info(mut self, records: Vec<LightInfo>) -> Self {
        self.light_info = records;
        self
    }

    /// Set the light list
    #[must_use]
    pub fn light_detail(mut self, records: Vec<LightDetail>) -> Self {
        self.light_detail = records;
        self
    }

    /// Set the opaque block I list
    #[must_use]
    pub fn blocks_i(mut self, records: Vec<DataBlockI>) -> Self {
        self.blocks_i = records;
        self
    }

    /// Set the quad list
    #[must_use]
    pub fn quads(mut self, records: Vec<Quad>) -> Self {
        self.quads = records;
        self
    }

    /// Set the opaque block K list
    #[must_use]
    pub fn blocks_k(mut self, records: Vec<DataBlockK>) -> Self {
        self.blocks_k = records;
        self
    }

    /// Set the vehicle navigation points
    #[must_use]
    pub fn vehicle_nav_points(mut self, records: Vec<VehicleNavPoint>) -> Self {
        self.vehicle_nav_points = records;
        self
    }

    /// Set the opaque block M list
    #[must_use]
    pub fn blocks_m(mut self, records: Vec<DataBlockM>) -> Self {
        self.blocks_m = records;
        self
    }

    /// Set the NPC navigation points
    #[must_use]
    pub fn npc_nav_points(mut self, records: Vec<NpcNavPoint>) -> Self {
        self.npc_nav_points = records;
        self
    }

    /// Set the NPC block lines
    #[must_use]
    pub fn npc_block_lines(mut self, records: Vec<NpcBlockLine>) -> Self {
        self.npc_block_lines = records;
        self
    }

    /// Set the opaque block P list
    #[must_use]
    pub fn blocks_p(mut self, records: Vec<DataBlockP>) -> Self {
        self.blocks_p = records;
        self
    }

    /// Set the opaque block Q list
    #[must_use]
    pub fn blocks_q(mut self, records: Vec<DataBlockQ>) -> Self {
        self.blocks_q = records;
        self
    }

    /// Set the opaque block R list
    #[must_use]
    pub fn blocks_r(mut self, records: Vec<DataBlockR>) -> Self {
        self.blocks_r = records;
        self
    }

    /// Replace the 19 fixed sub-headers
    #[must_use]
    pub fn sub_headers_a(mut self, records: Vec<SubHeaderA>) -> Self {
        self.sprites.sub_headers_a = records;
        self
    }

    /// Replace the first sentinel list; it must end on its terminal record
    #[must_use]
    pub fn sub_blocks_a(mut self, records: Vec<SubBlockA>) -> Self {
        self.sprites.sub_blocks_a = records;
        self
    }

    /// Replace the second sentinel list; it must end on its eighth terminal
    #[must_use]
    pub fn sub_blocks_b(mut self, records: Vec<SubBlockB>) -> Self {
        self.sprites.sub_blocks_b = records;
        self
    }

    /// Append an entity
    #[must_use]
    pub fn add_entity(mut self, entity: EntitySubBlock) -> Self {
        self.sprites.entities.push(entity);
        self
    }

    /// Append a tail block
    #[must_use]
    pub fn add_block_d(mut self, block: DataBlockD) -> Self {
        self.sprites.blocks_d.push(block);
        self
    }

    /// Assemble the map
    ///
    /// # Errors
    /// - `CountMismatch` if the terrain is not 128×128 cells, there are not
    ///   19 sub-headers, or the entity list exceeds the 16-bit sprite count
    /// - `MalformedSentinelList` if either sentinel list is not terminated
    pub fn build(self) -> Result<Map> {
        let header = MapHeader {
            version: self.version,
            num_quad_tex: count(&QUAD_TEX_INFO, self.quad_tex_info.len())?,
            num_tri_tex: count(&TRI_TEX_INFO, self.tri_tex_info.len())?,
            num_verts: count(&VERTICES, self.vertices.len())?,
            num_tris: count(&TRIS, self.tris.len())?,
            num_meshes: count(&MESHES, self.meshes.len())?,
            num_light_info: count(&LIGHT_INFO, self.light_info.len())?,
            num_lights: count(&LIGHT_DETAIL, self.light_detail.len())?,
            num_block_i: count(&BLOCKS_I, self.blocks_i.len())?,
            num_quads: count(&QUADS, self.quads.len())?,
            num_block_k: count(&BLOCKS_K, self.blocks_k.len())?,
            num_nav_points: count(&VEHICLE_NAV_POINTS, self.vehicle_nav_points.len())?,
            num_block_m: count(&BLOCKS_M, self.blocks_m.len())?,
            num_nav_points_npc: count(&NPC_NAV_POINTS, self.npc_nav_points.len())?,
            num_block_points_npc: count(&NPC_BLOCK_LINES, self.npc_block_lines.len())?,
            num_block_p: count(&BLOCKS_P, self.blocks_p.len())?,
            num_block_q: count(&BLOCKS_Q, self.blocks_q.len())?,
            num_block_r: count(&BLOCKS_R, self.blocks_r.len())?,
        };

        let terrain = self.terrain.map_or_else(Terrain::flat, Terrain::from_entries);
        terrain.validate()?;

        let mut sprites = self.sprites;
        sprites.entity_header.num_sprites =
            u16::try_from(sprites.entities.len()).map_err(|_| Error::CountMismatch {
                segment: "entities",
                expected: u64::from(u16::MAX),
                actual: sprites.entities.len(),
            })?;

        let map = Map {
            header,
            terrain,
            textures: TextureInfo {
                quad: Segment::with_layout(self.quad_tex_info, &QUAD_TEX_INFO),
                tri: Segment::with_layout(self.tri_tex_info, &TRI_TEX_INFO),
            },
            detail: MapDetail {
                vertices: Segment::with_layout(self.vertices, &VERTICES),
                tris: Segment::with_layout(self.tris, &TRIS),
                meshes: Segment::with_layout(self.meshes, &MESHES),
                light_info: Segment::with_layout(self.light_info, &LIGHT_INFO),
                light_detail: Segment::with_layout(self.light_detail, &LIGHT_DETAIL),
                blocks_i: Segment::with_layout(self.blocks_i, &BLOCKS_I),
                quads: Segment::with_layout(self.quads, &QUADS),
            },
            navigation: Navigation {
                blocks_k: Segment::with_layout(self.blocks_k, &BLOCKS_K),
                vehicle_nav_points: Segment::with_layout(
                    self.vehicle_nav_points,
                    &VEHICLE_NAV_POINTS,
                ),
                blocks_m: Segment::with_layout(self.blocks_m, &BLOCKS_M),
                npc_nav_points: Segment::with_layout(self.npc_nav_points, &NPC_NAV_POINTS),
                npc_block_lines: Segment::with_layout(self.npc_block_lines, &NPC_BLOCK_LINES),
            },
            unknown: UnknownBlocks {
                blocks_p: Segment::with_layout(self.blocks_p, &BLOCKS_P),
                blocks_q: Segment::with_layout(self.blocks_q, &BLOCKS_Q),
                blocks_r: Segment::with_layout(self.blocks_r, &BLOCKS_R),
            },
            sprites,
            source_path: None,
        };

        map.validate()?;
        Ok(map)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn count(layout: &SegmentLayout, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::CountMismatch {
        segment: layout.name,
        expected: u64::from(u32::MAX),
        actual: len,
    })
}
