//! Serde structs for case files.
//!
//! A case file mirrors [`CaseOptions`] except that terrain is written as
//! nested rows, the form level editors export. Rows are flattened on
//! conversion.

use serde::{Deserialize, Serialize};
use tilecase_core::{
    CaseOptions, GridPosition, StructureTile, SystemRequirement, TerrainTile, flatmap_to_tiles,
};

// ===========================================================================
// Case
// ===========================================================================

/// A case definition as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    pub name: String,
    pub grid_size: GridPosition,
    /// `terrain[y][x]`; `None`/`null` (or `present = false`) marks a hole.
    #[serde(default)]
    pub terrain: Vec<Vec<Option<TileData>>>,
    #[serde(default)]
    pub system: SystemRequirement,
    #[serde(default)]
    pub structures: Vec<StructureTile>,
}

// ===========================================================================
// Terrain cells
// ===========================================================================

/// A terrain cell as written in a case file.
///
/// TOML has no null, so a cell can also opt out with `present = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileData {
    #[serde(default = "default_true")]
    pub present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

fn default_true() -> bool {
    true
}

impl TileData {
    fn into_tile(self) -> Option<TerrainTile> {
        self.present.then_some(TerrainTile { kind: self.kind })
    }
}

impl CaseFile {
    /// Flatten the terrain rows and build the options the rules consume.
    pub fn into_options(self) -> CaseOptions {
        let terrain_tiles = flatmap_to_tiles(self.terrain.into_iter().map(|row| {
            row.into_iter()
                .map(|cell| cell.and_then(TileData::into_tile))
                .collect::<Vec<_>>()
        }));
        CaseOptions {
            name: self.name,
            grid_size: self.grid_size,
            terrain_tiles,
            system: self.system,
            structure_tiles: self.structures,
        }
    }
}
