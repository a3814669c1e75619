//! The case definition handed to every validation rule.

use crate::grid::{GridPosition, footprint, is_enumerable_size};
use crate::terrain::{TerrainTile, TerrainTiles};
use serde::{Deserialize, Serialize};

/// Descriptive data of a placed structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureData {
    pub name: String,
}

/// Visual definition of a structure; only its size matters to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureTexture {
    /// Footprint span past the anchor on each axis. `(1,1,0)` covers a
    /// 2x2x1 block.
    pub size: GridPosition,
}

/// A structure placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureTile {
    pub data: StructureData,
    pub texture: StructureTexture,
    /// Minimum corner of the footprint.
    pub position: GridPosition,
}

impl StructureTile {
    pub fn new(name: impl Into<String>, size: GridPosition, position: GridPosition) -> Self {
        Self {
            data: StructureData { name: name.into() },
            texture: StructureTexture { size },
            position,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn size(&self) -> GridPosition {
        self.texture.size
    }

    /// Whether the footprint is small and well-formed enough to enumerate.
    pub fn has_enumerable_size(&self) -> bool {
        is_enumerable_size(self.texture.size)
    }

    /// Every cell this structure occupies, x outermost.
    pub fn footprint(&self) -> impl Iterator<Item = GridPosition> {
        footprint(self.position, self.texture.size)
    }
}

/// A structure category the case must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemComponent {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRequirement {
    #[serde(default)]
    pub components: Vec<SystemComponent>,
}

impl SystemRequirement {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: names
                .into_iter()
                .map(|name| SystemComponent { name: name.into() })
                .collect(),
        }
    }
}

/// Everything a validation rule may look at. Rules never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOptions {
    pub name: String,
    /// Width (x), depth (y) and height bound (z) of the grid.
    pub grid_size: GridPosition,
    pub terrain_tiles: TerrainTiles,
    pub system: SystemRequirement,
    pub structure_tiles: Vec<StructureTile>,
}

impl CaseOptions {
    /// Terrain cells the grid size calls for: width times depth. Height is
    /// not part of the terrain count.
    pub fn expected_tile_count(&self) -> usize {
        if self.grid_size.x <= 0 || self.grid_size.y <= 0 {
            return 0;
        }
        (self.grid_size.x as usize).saturating_mul(self.grid_size.y as usize)
    }

    /// The terrain tile under `pos`, if there is one.
    pub fn terrain_at(&self, pos: GridPosition) -> Option<&TerrainTile> {
        self.terrain_tiles.tile_at(pos, self.grid_size.x)
    }

    /// Whether any placed structure is named `name`.
    pub fn has_structure(&self, name: &str) -> bool {
        self.structure_tiles.iter().any(|s| s.name() == name)
    }
}
