//! Subcommand execution.
//!
//! Each command resolves its paths through [`ToolConfig::resolve`], runs
//! against the `swars-formats` API and returns a [`Report`] for the binary
//! to print.

use crate::config::{Command, ToolConfig};
use crate::error::ToolError;
use std::fmt;
use std::path::{Path, PathBuf};
use swars_formats::map::Map;
use swars_formats::vehicle::VehicleMesh;
use swars_formats::{Error, SwarsFormat};
use tracing::{info, warn};

/// Map statistics printed by `map-info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSummary {
    /// Map file
    pub path: PathBuf,
    /// Header version word
    pub version: u32,
    /// Header count per segment, in stream order
    pub segment_counts: Vec<(&'static str, u32)>,
    /// SubBlockA list length
    pub sub_blocks_a: usize,
    /// SubBlockB list length
    pub sub_blocks_b: usize,
    /// Terminal positions in the SubBlockB list
    pub sub_block_b_boundaries: Vec<usize>,
    /// Entity count
    pub entities: usize,
    /// DataBlockD count
    pub blocks_d: usize,
    /// Encoded file size
    pub file_len: usize,
}

impl MapSummary {
    /// Summarize a loaded map
    pub fn from_map(path: &Path, map: &Map) -> Result<Self, Error> {
        Ok(Self {
            path: path.to_path_buf(),
            version: map.header.version,
            segment_counts: map.header.segment_counts().to_vec(),
            sub_blocks_a: map.sprites.sub_blocks_a.len(),
            sub_blocks_b: map.sprites.sub_blocks_b.len(),
            sub_block_b_boundaries: map.sprites.sub_block_b_boundaries(),
            entities: map.sprites.entities.len(),
            blocks_d: map.sprites.blocks_d.len(),
            file_len: map.build()?.len(),
        })
    }
}

impl fmt::Display for MapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} bytes)", self.path.display(), self.file_len)?;
        writeln!(f, "  version: {}", self.version)?;
        for (name, count) in &self.segment_counts {
            writeln!(f, "  {name:<20} {count}")?;
        }
        writeln!(f, "  sub_blocks_a         {}", self.sub_blocks_a)?;
        writeln!(
            f,
            "  sub_blocks_b         {} (chains end at {:?})",
            self.sub_blocks_b, self.sub_block_b_boundaries
        )?;
        writeln!(f, "  entities             {}", self.entities)?;
        write!(f, "  blocks_d             {}", self.blocks_d)
    }
}

/// Vehicle mesh statistics printed by `vehicle-info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSummary {
    /// Vehicle mesh file
    pub path: PathBuf,
    /// Vertex count
    pub vertices: usize,
    /// Triangle count
    pub tris: usize,
    /// Quad count
    pub quads: usize,
    /// Mesh count
    pub meshes: usize,
    /// Quad texture-info count
    pub quad_tex: usize,
    /// Triangle texture-info count
    pub tri_tex: usize,
}

impl VehicleSummary {
    /// Summarize a loaded vehicle mesh
    pub fn from_mesh(path: &Path, mesh: &VehicleMesh) -> Self {
        Self {
            path: path.to_path_buf(),
            vertices: mesh.vertices.len(),
            tris: mesh.tris.len(),
            quads: mesh.quads.len(),
            meshes: mesh.meshes.len(),
            quad_tex: mesh.quad_tex.len(),
            tri_tex: mesh.tri_tex.len(),
        }
    }
}

impl fmt::Display for VehicleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path.display())?;
        writeln!(f, "  vertices  {}", self.vertices)?;
        writeln!(f, "  tris      {}", self.tris)?;
        writeln!(f, "  quads     {}", self.quads)?;
        writeln!(f, "  meshes    {}", self.meshes)?;
        writeln!(f, "  quad_tex  {}", self.quad_tex)?;
        write!(f, "  tri_tex   {}", self.tri_tex)
    }
}

/// Outcome of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// `map-info`
    MapInfo(MapSummary),
    /// `map-check` found no inconsistency
    MapConsistent(PathBuf),
    /// `map-verify` / `vehicle-verify` rebuilt the file byte-for-byte
    Verified {
        /// Verified file
        path: PathBuf,
        /// File length
        bytes: usize,
    },
    /// `map-copy`
    Copied {
        /// Source map
        src: PathBuf,
        /// Written map
        dst: PathBuf,
    },
    /// `vehicle-info`
    VehicleInfo(VehicleSummary),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapInfo(summary) => summary.fmt(f),
            Self::MapConsistent(path) => write!(f, "{}: OK", path.display()),
            Self::Verified { path, bytes } => {
                write!(f, "{}: round-trip OK ({bytes} bytes)", path.display())
            }
            Self::Copied { src, dst } => {
                write!(f, "Copied {} -> {}", src.display(), dst.display())
            }
            Self::VehicleInfo(summary) => summary.fmt(f),
        }
    }
}

/// Run the configured command
pub fn run(config: &ToolConfig) -> Result<Report, ToolError> {
    config.validate()?;

    match &config.command {
        Command::MapInfo { map } => {
            let path = config.resolve(map);
            let map = load_map(&path)?;
            let summary =
                MapSummary::from_map(&path, &map).map_err(|e| ToolError::format(&path, e))?;
            Ok(Report::MapInfo(summary))
        }
        Command::MapCheck { map } => check_map(config.resolve(map)),
        Command::MapVerify { map } => verify::<Map>(config.resolve(map)),
        Command::MapCopy { src, dst } => {
            let (src, dst) = (config.resolve(src), config.resolve(dst));
            let map = load_map(&src)?;
            map.save(&dst).map_err(|e| ToolError::format(&dst, e))?;
            info!("Copied {} to {}", src.display(), dst.display());
            Ok(Report::Copied { src, dst })
        }
        Command::VehicleInfo { file } => {
            let path = config.resolve(file);
            let mesh = VehicleMesh::load(&path).map_err(|e| ToolError::format(&path, e))?;
            Ok(Report::VehicleInfo(VehicleSummary::from_mesh(&path, &mesh)))
        }
        Command::VehicleVerify { file } => verify::<VehicleMesh>(config.resolve(file)),
    }
}

fn load_map(path: &Path) -> Result<Map, ToolError> {
    Map::load(path).map_err(|e| ToolError::format(path, e))
}

fn read_file(path: &Path) -> Result<Vec<u8>, ToolError> {
    if !path.is_file() {
        return Err(ToolError::format(path, Error::FileNotFound(path.to_path_buf())));
    }
    std::fs::read(path).map_err(|e| ToolError::format(path, e.into()))
}

/// Parse, rebuild and validate the raw bytes of a map
///
/// Layout faults in the file (stale header counts, shifted tags, short
/// tail, bytes that do not rebuild identically) are reported as
/// [`ToolError::Inconsistent`]; failures to read the file stay
/// [`ToolError::Format`].
fn check_map(path: PathBuf) -> Result<Report, ToolError> {
    let data = read_file(&path)?;

    let checked = Map::parse(&data).and_then(|map| {
        Map::verify_round_trip(&data)?;
        map.validate()
    });
    match checked {
        Ok(()) => {
            info!("{} is consistent ({} bytes)", path.display(), data.len());
            Ok(Report::MapConsistent(path))
        }
        Err(source) if source.is_malformed_data() => {
            warn!("{}: {}", path.display(), source);
            Err(ToolError::Inconsistent { path, source })
        }
        Err(source) => Err(ToolError::format(path, source)),
    }
}

fn verify<T: SwarsFormat>(path: PathBuf) -> Result<Report, ToolError> {
    let data = read_file(&path)?;
    T::verify_round_trip(&data).map_err(|e| ToolError::format(&path, e))?;
    Ok(Report::Verified {
        path,
        bytes: data.len(),
    })
}
