//! Terrain tiles and the row-major collection validators look them up in.

use crate::grid::GridPosition;
use serde::{Deserialize, Serialize};

/// Payload of a cell that has terrain. Cells without terrain are `None`
/// in [`TerrainTiles`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TerrainTile {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
        }
    }
}

/// One entry of the flattened terrain, remembering where it came from in
/// the nested source array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainCell {
    pub position: GridPosition,
    pub tile: Option<TerrainTile>,
}

/// Terrain cells in row-major order: all columns of row 0, then row 1, ...
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainTiles {
    cells: Vec<TerrainCell>,
}

impl TerrainTiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells, with or without terrain.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells that carry a tile.
    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|c| c.tile.is_some()).count()
    }

    pub fn get(&self, index: usize) -> Option<&TerrainCell> {
        self.cells.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerrainCell> {
        self.cells.iter()
    }

    /// Look up the tile at `pos` in a grid `width` columns wide, using the
    /// row-major index `y * width + x`. `z` is ignored.
    ///
    /// Returns `None` when the position is outside the grid columns, before
    /// the first row, past the end of the collection, or the cell has no
    /// terrain.
    pub fn tile_at(&self, pos: GridPosition, width: i32) -> Option<&TerrainTile> {
        if pos.x < 0 || pos.y < 0 || pos.x >= width {
            return None;
        }
        let index = (pos.y as usize)
            .checked_mul(width as usize)?
            .checked_add(pos.x as usize)?;
        self.cells.get(index)?.tile.as_ref()
    }

    /// Whether `pos` has terrain in a grid `width` columns wide.
    pub fn has_terrain(&self, pos: GridPosition, width: i32) -> bool {
        self.tile_at(pos, width).is_some()
    }
}

impl<'a> IntoIterator for &'a TerrainTiles {
    type Item = &'a TerrainCell;
    type IntoIter = std::slice::Iter<'a, TerrainCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Flatten nested terrain rows into a row-major [`TerrainTiles`].
///
/// `rows[y][x]` becomes the cell at `(x, y)`. Ragged rows are concatenated
/// as given, so the result holds the sum of the row lengths.
pub fn flatmap_to_tiles<R, C>(rows: R) -> TerrainTiles
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = Option<TerrainTile>>,
{
    let cells = rows
        .into_iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.into_iter().enumerate().map(move |(x, tile)| TerrainCell {
                position: GridPosition::new(x as i32, y as i32),
                tile,
            })
        })
        .collect();
    TerrainTiles { cells }
}

impl FromIterator<TerrainCell> for TerrainTiles {
    fn from_iter<I: IntoIterator<Item = TerrainCell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> Option<TerrainTile> {
        Some(TerrainTile::default())
    }

    #[test]
    fn flatten_is_row_major() {
        let tiles = flatmap_to_tiles(vec![
            vec![Some(TerrainTile::new("a")), Some(TerrainTile::new("b"))],
            vec![Some(TerrainTile::new("c")), None],
        ]);

        assert_eq!(tiles.len(), 4);
        let kinds: Vec<_> = tiles
            .iter()
            .map(|c| c.tile.as_ref().and_then(|t| t.kind.as_deref()))
            .collect();
        assert_eq!(kinds, vec![Some("a"), Some("b"), Some("c"), None]);

        let positions: Vec<_> = tiles.iter().map(|c| c.position).collect();
        assert_eq!(
            positions,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(1, 0),
                GridPosition::new(0, 1),
                GridPosition::new(1, 1),
            ]
        );
    }

    #[test]
    fn flatten_empty_and_ragged() {
        let empty = flatmap_to_tiles(Vec::<Vec<Option<TerrainTile>>>::new());
        assert!(empty.is_empty());

        let ragged = flatmap_to_tiles(vec![vec![tile(), tile(), tile()], vec![tile()]]);
        assert_eq!(ragged.len(), 4);
        assert_eq!(ragged.get(3).unwrap().position, GridPosition::new(0, 1));
    }

    #[test]
    fn present_count_skips_holes() {
        let tiles = flatmap_to_tiles(vec![vec![tile(), None], vec![None, tile()]]);
        assert_eq!(tiles.present_count(), 2);
    }

    #[test]
    fn tile_at_uses_row_major_index() {
        let tiles = flatmap_to_tiles(vec![
            vec![Some(TerrainTile::new("a")), Some(TerrainTile::new("b"))],
            vec![Some(TerrainTile::new("c")), Some(TerrainTile::new("d"))],
        ]);
        let kind = |x, y| {
            tiles
                .tile_at(GridPosition::new(x, y), 2)
                .and_then(|t| t.kind.clone())
        };
        assert_eq!(kind(0, 0).as_deref(), Some("a"));
        assert_eq!(kind(1, 0).as_deref(), Some("b"));
        assert_eq!(kind(0, 1).as_deref(), Some("c"));
        assert_eq!(kind(1, 1).as_deref(), Some("d"));
    }

    #[test]
    fn tile_at_rejects_out_of_bounds() {
        let tiles = flatmap_to_tiles(vec![vec![tile(), tile()], vec![tile(), tile()]]);
        // x past the width must not wrap onto the next row.
        assert!(tiles.tile_at(GridPosition::new(2, 0), 2).is_none());
        assert!(tiles.tile_at(GridPosition::new(-1, 0), 2).is_none());
        assert!(tiles.tile_at(GridPosition::new(0, -1), 2).is_none());
        assert!(tiles.tile_at(GridPosition::new(0, 2), 2).is_none());
        assert!(tiles.tile_at(GridPosition::new(0, 0), 0).is_none());
    }

    #[test]
    fn tile_at_ignores_z() {
        let tiles = flatmap_to_tiles(vec![vec![tile()]]);
        assert!(tiles.has_terrain(GridPosition::new3(0, 0, 4), 1));
    }

    #[test]
    fn tile_at_null_cell() {
        let tiles = flatmap_to_tiles(vec![vec![tile(), None]]);
        assert!(tiles.has_terrain(GridPosition::new(0, 0), 2));
        assert!(!tiles.has_terrain(GridPosition::new(1, 0), 2));
    }
}
