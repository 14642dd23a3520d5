//! Test utilities for map and vehicle round-trip testing
//!
//! Shared fixtures and round-trip helpers for the format test modules.

use crate::SwarsFormat;
use crate::map::segment::Padding;
use crate::map::sprite::{EntitySubBlock, SubBlockA, SubBlockB};
use crate::map::terrain::{TERRAIN_CELLS, TerrainEntry};
use crate::map::{LightDetail, Map, MapBuilder, NpcNavPoint, VehicleNavPoint};
use crate::types::{
    DataBlockD, DataBlockI, DataBlockP, MeshDetails, Quad, QuadTextureInfo, Tri, TriTextureInfo,
    Vertex,
};
use crate::vehicle::{VehicleMesh, VehicleMeshBuilder};
use std::fmt::Debug;

/// Test round-trip serialization for a format instance
///
/// Builds, parses back, compares the models, then rebuilds and compares
/// the bytes.
pub fn test_round_trip<T>(original: &T) -> Result<(), Box<dyn std::error::Error>>
where
    T: SwarsFormat + PartialEq + Debug,
{
    let data = original.build()?;
    let parsed = T::parse(&data)?;

    if original != &parsed {
        return Err(format!(
            "Round-trip verification failed:\nOriginal: {:?}\nParsed: {:?}",
            original, parsed
        )
        .into());
    }

    T::verify_round_trip(&data)?;
    Ok(())
}

/// Test that parsing invalid data fails appropriately
pub fn test_invalid_data_rejected<T>(invalid_data: &[u8]) -> Result<(), Box<dyn std::error::Error>>
where
    T: SwarsFormat,
{
    match T::parse(invalid_data) {
        Ok(_) => Err("Expected parsing to fail for invalid data, but it succeeded".into()),
        Err(_) => Ok(()),
    }
}

/// Terrain whose heights identify their disk index
pub fn numbered_terrain() -> Vec<TerrainEntry> {
    (0..TERRAIN_CELLS)
        .map(|i| TerrainEntry {
            vertex_height: (i % 4096) as i16,
            texture: (i / 4096) as u16,
            ..TerrainEntry::default()
        })
        .collect()
}

/// Small map touching every phase, with non-zero padding in two segments
pub fn sample_map() -> Map {
    let mut tail = DataBlockD::default();
    tail.set_word(0, 0x1234);
    tail.set_word(83, 0xBEEF);

    let mut block_i = DataBlockI::default();
    block_i.set_word(2, 9);

    let mut sub_blocks_b = Vec::new();
    for chain in 0..8u16 {
        if chain % 2 == 1 {
            sub_blocks_b.push(SubBlockB {
                kind: chain,
                next: 0,
                x: 10 * chain as i16,
                ..SubBlockB::default()
            });
        }
        sub_blocks_b.push(SubBlockB::terminal());
    }

    let mut map = MapBuilder::new()
        .version(1)
        .terrain(numbered_terrain())
        .quad_tex_info(vec![QuadTextureInfo {
            page: 3,
            ..QuadTextureInfo::default()
        }])
        .tri_tex_info(vec![TriTextureInfo::default(); 2])
        .vertices(vec![
            Vertex {
                x: -100,
                y: 20,
                z: 300,
                ..Vertex::default()
            },
            Vertex {
                x: 100,
                shade: 0x7F,
                ..Vertex::default()
            },
            Vertex::default(),
        ])
        .tris(vec![Tri {
            points: [0, 1, 2],
            ..Tri::default()
        }])
        .add_mesh(MeshDetails {
            num_faces: 1,
            radius: 512,
            ..MeshDetails::default()
        })
        .add_mesh(MeshDetails {
            offset_x: -40,
            ..MeshDetails::default()
        })
        .light_detail(vec![LightDetail {
            intensity: 255,
            ..LightDetail::default()
        }])
        .blocks_i(vec![block_i])
        .quads(vec![Quad::default()])
        .vehicle_nav_points(vec![VehicleNavPoint::default(); 3])
        .npc_nav_points(vec![NpcNavPoint {
            x: 64,
            z: 64,
            ..NpcNavPoint::default()
        }])
        .blocks_p(vec![DataBlockP::default()])
        .sub_blocks_a(vec![
            SubBlockA {
                marker: 4,
                index: 1,
                ..SubBlockA::default()
            },
            SubBlockA::terminal(),
        ])
        .sub_blocks_b(sub_blocks_b)
        .add_entity(EntitySubBlock {
            sprite: 21,
            x: 1000,
            ..EntitySubBlock::default()
        })
        .add_block_d(tail)
        .add_block_d(DataBlockD::default())
        .build()
        .expect("Sample map should build");

    let mut padding = vec![0u8; map.detail.vertices.padding.len()];
    padding[0] = 0xAA;
    padding[19_999] = 0x55;
    map.detail.vertices.padding = Padding::from_bytes(padding);

    let mut padding = vec![0u8; map.navigation.npc_block_lines.padding.len()];
    padding[100] = 1;
    map.navigation.npc_block_lines.padding = Padding::from_bytes(padding);

    map
}

/// Vehicle mesh with every list populated
pub fn sample_vehicle() -> VehicleMesh {
    VehicleMeshBuilder::new()
        .add_vertex(Vertex {
            x: -32,
            ..Vertex::default()
        })
        .add_vertex(Vertex {
            x: 32,
            ..Vertex::default()
        })
        .add_vertex(Vertex {
            z: 64,
            ..Vertex::default()
        })
        .add_vertex(Vertex {
            y: 16,
            ..Vertex::default()
        })
        .add_tri(Tri {
            points: [0, 1, 2],
            texture: 1,
            ..Tri::default()
        })
        .add_quad(Quad {
            points: [0, 1, 2, 3],
            ..Quad::default()
        })
        .add_mesh(MeshDetails {
            start_face: 1,
            num_faces: 1,
            start_face4: 1,
            num_faces4: 1,
            ..MeshDetails::default()
        })
        .add_quad_tex(QuadTextureInfo {
            uv: [[0, 0], [31, 0], [31, 31], [0, 31]],
            ..QuadTextureInfo::default()
        })
        .add_tri_tex(TriTextureInfo {
            uv: [[0, 0], [31, 0], [0, 31]],
            ..TriTextureInfo::default()
        })
        .build()
        .expect("Sample vehicle should build")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_map_is_consistent() {
        let map = sample_map();
        assert!(map.validate().is_ok());
        assert!(!map.detail.vertices.padding.is_zeroed());
    }

    #[test]
    fn test_invalid_data_helper() {
        test_invalid_data_rejected::<Map>(&[0u8; 10]).unwrap();
        test_invalid_data_rejected::<VehicleMesh>(&[1, 0, 0]).unwrap();
    }

    #[test]
    fn test_sample_vehicle_round_trip() {
        test_round_trip(&sample_vehicle()).unwrap();
    }
}
