//! Grid coordinates and the footprint enumeration shared by the placement
//! and overlap rules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A cell on the case grid.
///
/// Flat cases leave `z` at zero. The same type is used for grid sizes and
/// footprint spans, where each axis is a count or an inclusive extent
/// rather than a location.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "GridPositionRepr")]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Accepted on-disk shapes: `[x, y]`, `[x, y, z]` or `{ x, y, z? }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum GridPositionRepr {
    Flat(i32, i32),
    Volume(i32, i32, i32),
    Named {
        x: i32,
        y: i32,
        #[serde(default)]
        z: i32,
    },
}

impl From<GridPositionRepr> for GridPosition {
    fn from(repr: GridPositionRepr) -> Self {
        match repr {
            GridPositionRepr::Flat(x, y) => GridPosition::new(x, y),
            GridPositionRepr::Volume(x, y, z) | GridPositionRepr::Named { x, y, z } => {
                GridPosition::new3(x, y, z)
            }
        }
    }
}

impl GridPosition {
    /// A position on the ground plane (`z = 0`).
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    pub const fn new3(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset this position, or `None` if any axis leaves the `i32` range.
    pub fn checked_offset(&self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// Whether any axis is negative. Only meaningful for sizes and spans.
    pub fn has_negative_axis(&self) -> bool {
        self.x < 0 || self.y < 0 || self.z < 0
    }

    /// Every cell covered by a footprint of `size` anchored here.
    ///
    /// Shorthand for [`footprint`]`(*self, size)`.
    pub fn surface_points(&self, size: GridPosition) -> impl Iterator<Item = GridPosition> {
        footprint(*self, size)
    }

    fn fmt_volume(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }

    fn fmt_flat(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Renders `(x,y)` on the ground plane and `(x,y,z)` otherwise.
impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.z == 0 {
            self.fmt_flat(f)
        } else {
            self.fmt_volume(f)
        }
    }
}

/// Display adapter for a list of positions, joined with `", "`.
///
/// If any position leaves the ground plane, every entry is written in
/// three-component form so the list stays uniform.
#[derive(Debug, Clone, Copy)]
pub struct PositionList<'a>(pub &'a [GridPosition]);

pub fn position_list(positions: &[GridPosition]) -> PositionList<'_> {
    PositionList(positions)
}

impl fmt::Display for PositionList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let volume = self.0.iter().any(|p| p.z != 0);
        for (i, pos) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if volume {
                pos.fmt_volume(f)?;
            } else {
                pos.fmt_flat(f)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Footprints
// ---------------------------------------------------------------------------

/// Enumerate every cell occupied by a structure anchored at `position`
/// whose footprint spans `size` cells past the anchor on each axis.
///
/// Offsets run over `0..=size` per axis, x outermost and z innermost, so a
/// size of `(0,0,0)` covers just the anchor and `(n,m,k)` covers
/// `(n+1)*(m+1)*(k+1)` cells. A negative span on any axis covers nothing.
/// Cells that would fall outside the `i32` range are skipped.
pub fn footprint(position: GridPosition, size: GridPosition) -> impl Iterator<Item = GridPosition> {
    (0..=size.x).flat_map(move |dx| {
        (0..=size.y).flat_map(move |dy| {
            (0..=size.z).filter_map(move |dz| position.checked_offset(dx, dy, dz))
        })
    })
}

/// Number of cells [`footprint`] yields for `size`, without enumerating.
pub fn footprint_len(size: GridPosition) -> usize {
    if size.has_negative_axis() {
        return 0;
    }
    let span = |axis: i32| axis as usize + 1;
    span(size.x)
        .saturating_mul(span(size.y))
        .saturating_mul(span(size.z))
}

/// Largest footprint, in cells, the validation rules will enumerate.
pub const MAX_FOOTPRINT_CELLS: usize = 1 << 16;

/// Whether `size` is a span the rules can enumerate: non-negative on every
/// axis and covering at most [`MAX_FOOTPRINT_CELLS`] cells.
pub fn is_enumerable_size(size: GridPosition) -> bool {
    !size.has_negative_axis() && footprint_len(size) <= MAX_FOOTPRINT_CELLS
}
