//! Shared fixtures for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so downstream
//! crates can enable them through the `test-utils` feature.

use crate::case::{CaseOptions, StructureTile, SystemRequirement};
use crate::grid::GridPosition;
use crate::terrain::{TerrainTile, TerrainTiles, flatmap_to_tiles};

// ===========================================================================
// Positions
// ===========================================================================

pub fn pos(x: i32, y: i32) -> GridPosition {
    GridPosition::new(x, y)
}

pub fn pos3(x: i32, y: i32, z: i32) -> GridPosition {
    GridPosition::new3(x, y, z)
}

// ===========================================================================
// Terrain
// ===========================================================================

/// A `width` x `depth` grid with terrain on every cell.
pub fn filled_terrain(width: usize, depth: usize) -> TerrainTiles {
    flatmap_to_tiles((0..depth).map(|_| vec![Some(TerrainTile::default()); width]))
}

/// Terrain built from a mask, `true` marking cells that have terrain.
pub fn terrain_from_mask(rows: &[&[bool]]) -> TerrainTiles {
    flatmap_to_tiles(rows.iter().map(|row| {
        row.iter()
            .map(|&present| present.then(TerrainTile::default))
            .collect::<Vec<_>>()
    }))
}

// ===========================================================================
// Cases
// ===========================================================================

/// 2x2 "grid project" with full terrain, a `biomass` requirement, and one
/// single-cell `biomass` structure at the origin. Passes every rule.
pub fn biomass_case() -> CaseOptions {
    CaseOptions {
        name: "grid project".to_string(),
        grid_size: pos3(2, 2, 1),
        terrain_tiles: filled_terrain(2, 2),
        system: SystemRequirement::new(["biomass"]),
        structure_tiles: vec![StructureTile::new("biomass", pos(0, 0), pos(0, 0))],
    }
}

/// A `side` x `side` case tiled with 2x2 structures named `block_<i>`,
/// none overlapping. `side` should be even.
pub fn tiled_case(side: usize) -> CaseOptions {
    let mut structure_tiles = Vec::new();
    for y in (0..side).step_by(2) {
        for x in (0..side).step_by(2) {
            let name = format!("block_{}", structure_tiles.len());
            structure_tiles.push(StructureTile::new(
                name,
                pos(1, 1),
                pos(x as i32, y as i32),
            ));
        }
    }
    CaseOptions {
        name: format!("tiled {side}x{side}"),
        grid_size: pos(side as i32, side as i32),
        terrain_tiles: filled_terrain(side, side),
        system: SystemRequirement::new(["block_0"]),
        structure_tiles,
    }
}

/// Pull every parenthesized group out of a message, as callers that only
/// see the rendered text would.
pub fn parenthesized_groups(message: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut rest = message;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(')') else {
            break;
        };
        groups.push(&after[..close]);
        rest = &after[close + 1..];
    }
    groups
}

/// Parse a `x,y` or `x,y,z` group produced by a position's `Display`.
pub fn parse_group(group: &str) -> Option<GridPosition> {
    let axes: Vec<i32> = group
        .split(',')
        .map(|axis| axis.trim().parse().ok())
        .collect::<Option<_>>()?;
    match axes.as_slice() {
        [x, y] => Some(pos(*x, *y)),
        [x, y, z] => Some(pos3(*x, *y, *z)),
        _ => None,
    }
}
