//! Tilecase Core -- validation of 2D grid cases before an editor accepts
//! them.
//!
//! A case is a terrain grid plus structures placed on it. This crate checks
//! that the terrain matches the declared grid size, that every structure
//! sits entirely on terrain, that structures do not overlap, and that every
//! required system component is provided by some structure.
//!
//! # Footprints
//!
//! A structure's footprint is its anchor position plus an inclusive span
//! on each axis: a size of `(1,1,0)` covers a 2x2x1 block. See
//! [`grid::footprint`].
//!
//! # Rules
//!
//! Every rule is a pure function `(&CaseOptions) -> Vec<ValidationError>`.
//! Rules never mutate the case and only return what they found; callers
//! concatenate, or use [`validation::validate_case`]:
//!
//! ```rust,ignore
//! let report = tilecase_core::validate_case(&case);
//! if !report.is_valid() {
//!     eprintln!("{report}");
//! }
//! ```
//!
//! # Key Types
//!
//! - [`grid::GridPosition`] -- integer cell coordinate, `z` defaulting to 0.
//! - [`terrain::TerrainTiles`] -- row-major terrain with `None` holes, built
//!   by [`terrain::flatmap_to_tiles`].
//! - [`case::CaseOptions`] -- the case under validation.
//! - [`validation::ValidationReport`] -- ordered errors for one case.
//!
//! Enable the `parallel` feature to run the rules of one case on rayon's
//! thread pool; the report is identical to the serial one.

pub mod case;
pub mod grid;
pub mod terrain;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use case::{
    CaseOptions, StructureData, StructureTexture, StructureTile, SystemComponent,
    SystemRequirement,
};
pub use grid::{
    GridPosition, MAX_FOOTPRINT_CELLS, PositionList, footprint, footprint_len, is_enumerable_size,
    position_list,
};
pub use terrain::{TerrainCell, TerrainTile, TerrainTiles, flatmap_to_tiles};
pub use validation::{
    CaseRule, DisplayName, UnknownRuleError, ValidationError, ValidationErrorKind,
    ValidationReport, display_name, validate_case, validate_case_with, validate_structure_sizes, validate_structures_overlap,
    validate_structures_placement, validate_system_components, validate_terrain_size,
};
