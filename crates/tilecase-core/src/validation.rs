//! Case validation rules and the report they produce.
//!
//! Each rule is a pure function of the [`CaseOptions`] returning only the
//! errors it found. [`validate_case`] runs every rule and concatenates the
//! results into a [`ValidationReport`] in rule order.

use crate::case::CaseOptions;
use crate::grid::{GridPosition, position_list};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A single violated rule.
///
/// The `Display` text embeds coordinates as `(x,y)` / `(x,y,z)` groups and
/// contains no other parentheses: parentheses in case, structure and
/// component names are written as square brackets. Callers may therefore
/// recover coordinates by pattern matching. The unaltered names and the
/// same coordinates are available on the variant fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error(
        "case '{name}': terrain has {actual} tiles but a {width}x{depth} grid requires {expected}",
        name = display_name(.case)
    )]
    TerrainSizeMismatch {
        case: String,
        width: i32,
        depth: i32,
        expected: usize,
        actual: usize,
    },

    #[error(
        "structure #{index} '{name}' is not fully on terrain, missing tiles: {}",
        position_list(.missing),
        name = display_name(.structure)
    )]
    StructureOffTerrain {
        index: usize,
        structure: String,
        missing: Vec<GridPosition>,
    },

    #[error(
        "structures #{first_index} '{first_name}' and #{second_index} '{second_name}' overlap at: {}",
        position_list(.shared),
        first_name = display_name(.first),
        second_name = display_name(.second)
    )]
    StructureOverlap {
        first_index: usize,
        first: String,
        second_index: usize,
        second: String,
        shared: Vec<GridPosition>,
    },

    #[error(
        "case '{case_name}': no structure provides system component '{component_name}'",
        case_name = display_name(.case),
        component_name = display_name(.component)
    )]
    MissingSystemComponent { case: String, component: String },

    #[error(
        "structure #{index} '{name}' has an invalid footprint size {size}",
        name = display_name(.structure)
    )]
    InvalidFootprint {
        index: usize,
        structure: String,
        size: GridPosition,
    },
}

/// Display adapter writing `(` and `)` in a name as `[` and `]`.
#[derive(Debug, Clone, Copy)]
pub struct DisplayName<'a>(pub &'a str);

pub fn display_name(name: &str) -> DisplayName<'_> {
    DisplayName(name)
}

impl fmt::Display for DisplayName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '(' => f.write_char('[')?,
                ')' => f.write_char(']')?,
                _ => f.write_char(ch)?,
            }
        }
        Ok(())
    }
}

/// Fieldless discriminant of [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    TerrainSizeMismatch,
    StructureOffTerrain,
    StructureOverlap,
    MissingSystemComponent,
    InvalidFootprint,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::TerrainSizeMismatch { .. } => ValidationErrorKind::TerrainSizeMismatch,
            ValidationError::StructureOffTerrain { .. } => ValidationErrorKind::StructureOffTerrain,
            ValidationError::StructureOverlap { .. } => ValidationErrorKind::StructureOverlap,
            ValidationError::MissingSystemComponent { .. } => {
                ValidationErrorKind::MissingSystemComponent
            }
            ValidationError::InvalidFootprint { .. } => ValidationErrorKind::InvalidFootprint,
        }
    }

    /// Coordinates carried by this error, in message order.
    pub fn positions(&self) -> &[GridPosition] {
        match self {
            ValidationError::StructureOffTerrain { missing, .. } => missing,
            ValidationError::StructureOverlap { shared, .. } => shared,
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Check that the terrain holds exactly width x depth cells.
pub fn validate_terrain_size(options: &CaseOptions) -> Vec<ValidationError> {
    let expected = options.expected_tile_count();
    let actual = options.terrain_tiles.len();
    if expected == actual {
        return Vec::new();
    }
    vec![ValidationError::TerrainSizeMismatch {
        case: options.name.clone(),
        width: options.grid_size.x,
        depth: options.grid_size.y,
        expected,
        actual,
    }]
}

/// Report structures whose texture size is negative on some axis or
/// covers more than [`MAX_FOOTPRINT_CELLS`](crate::grid::MAX_FOOTPRINT_CELLS)
/// cells.
///
/// The placement and overlap rules skip these structures, so this rule is
/// where the malformed size shows up.
pub fn validate_structure_sizes(options: &CaseOptions) -> Vec<ValidationError> {
    options
        .structure_tiles
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.has_enumerable_size())
        .map(|(index, s)| ValidationError::InvalidFootprint {
            index,
            structure: s.name().to_string(),
            size: s.size(),
        })
        .collect()
}

/// Check that every footprint cell of every structure lies on terrain.
///
/// One error per offending structure, listing its missing cells in
/// footprint order. Structures with an invalid size are skipped.
pub fn validate_structures_placement(options: &CaseOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, structure) in options.structure_tiles.iter().enumerate() {
        if !structure.has_enumerable_size() {
            continue;
        }
        let missing: Vec<GridPosition> = structure
            .footprint()
            .filter(|&pos| options.terrain_at(pos).is_none())
            .collect();
        if missing.is_empty() {
            continue;
        }
        tracing::trace!(
            structure = structure.name(),
            index,
            missing = missing.len(),
            "structure off terrain"
        );
        errors.push(ValidationError::StructureOffTerrain {
            index,
            structure: structure.name().to_string(),
            missing,
        });
    }
    errors
}

/// Check that no two structures share a cell.
///
/// Every unordered pair is compared once, in `structure_tiles` order, and
/// reported at most once with all of its shared cells. Structures with an
/// invalid size occupy nothing here.
pub fn validate_structures_overlap(options: &CaseOptions) -> Vec<ValidationError> {
    let footprints: Vec<Vec<GridPosition>> = options
        .structure_tiles
        .iter()
        .map(|s| {
            if s.has_enumerable_size() {
                s.footprint().collect()
            } else {
                Vec::new()
            }
        })
        .collect();
    let occupied: Vec<BTreeSet<GridPosition>> = footprints
        .iter()
        .map(|cells| cells.iter().copied().collect())
        .collect();

    let mut errors = Vec::new();
    for i in 0..footprints.len() {
        for j in (i + 1)..footprints.len() {
            let shared: Vec<GridPosition> = footprints[i]
                .iter()
                .copied()
                .filter(|pos| occupied[j].contains(pos))
                .collect();
            if shared.is_empty() {
                continue;
            }
            let first = &options.structure_tiles[i];
            let second = &options.structure_tiles[j];
            tracing::trace!(
                first = first.name(),
                second = second.name(),
                shared = shared.len(),
                "structures overlap"
            );
            errors.push(ValidationError::StructureOverlap {
                first_index: i,
                first: first.name().to_string(),
                second_index: j,
                second: second.name().to_string(),
                shared,
            });
        }
    }
    errors
}

/// Check that every required system component has a structure of that
/// name. Structures matching no component are fine.
pub fn validate_system_components(options: &CaseOptions) -> Vec<ValidationError> {
    options
        .system
        .components
        .iter()
        .filter(|component| !options.has_structure(&component.name))
        .map(|component| ValidationError::MissingSystemComponent {
            case: options.name.clone(),
            component: component.name.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rule selection
// ---------------------------------------------------------------------------

/// The validation rules, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseRule {
    TerrainSize,
    StructureSize,
    StructurePlacement,
    StructureOverlap,
    SystemComponents,
}

/// A rule name that matches no [`CaseRule`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown validation rule '{0}'")]
pub struct UnknownRuleError(pub String);

impl CaseRule {
    /// All rules, in the order [`validate_case`] runs them.
    pub fn all() -> [CaseRule; 5] {
        [
            CaseRule::TerrainSize,
            CaseRule::StructureSize,
            CaseRule::StructurePlacement,
            CaseRule::StructureOverlap,
            CaseRule::SystemComponents,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            CaseRule::TerrainSize => "terrain_size",
            CaseRule::StructureSize => "structure_size",
            CaseRule::StructurePlacement => "structure_placement",
            CaseRule::StructureOverlap => "structure_overlap",
            CaseRule::SystemComponents => "system_components",
        }
    }

    /// Run this rule alone.
    pub fn check(self, options: &CaseOptions) -> Vec<ValidationError> {
        let errors = match self {
            CaseRule::TerrainSize => validate_terrain_size(options),
            CaseRule::StructureSize => validate_structure_sizes(options),
            CaseRule::StructurePlacement => validate_structures_placement(options),
            CaseRule::StructureOverlap => validate_structures_overlap(options),
            CaseRule::SystemComponents => validate_system_components(options),
        };
        tracing::debug!(
            case = %options.name,
            rule = self.name(),
            errors = errors.len(),
            "rule checked"
        );
        errors
    }
}

impl fmt::Display for CaseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CaseRule {
    type Err = UnknownRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseRule::all()
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| UnknownRuleError(s.to_string()))
    }
}

/// Run every rule against `options`.
pub fn validate_case(options: &CaseOptions) -> ValidationReport {
    validate_case_with(options, &CaseRule::all())
}

/// Run the given rules against `options`, concatenating their errors in
/// the order the rules are listed.
pub fn validate_case_with(options: &CaseOptions, rules: &[CaseRule]) -> ValidationReport {
    #[cfg(feature = "parallel")]
    let batches: Vec<Vec<ValidationError>> = {
        use rayon::prelude::*;
        rules.par_iter().map(|rule| rule.check(options)).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let batches: Vec<Vec<ValidationError>> =
        rules.iter().map(|rule| rule.check(options)).collect();

    let report: ValidationReport = batches.into_iter().flatten().collect();
    tracing::debug!(
        case = %options.name,
        rules = rules.len(),
        errors = report.len(),
        "case validated"
    );
    report
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Ordered list of errors found for one case. Empty means the case is
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append another report's errors after this one's.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    /// The rendered message of every error.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn count_by_kind(&self) -> BTreeMap<ValidationErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for error in &self.errors {
            *counts.entry(error.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// All cells reported as lacking terrain, across structures.
    pub fn missing_positions(&self) -> Vec<GridPosition> {
        self.errors
            .iter()
            .filter(|e| e.kind() == ValidationErrorKind::StructureOffTerrain)
            .flat_map(|e| e.positions().iter().copied())
            .collect()
    }
}

/// One message per line.
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Serializes as a list of `{ message, error }` entries.
impl Serialize for ValidationReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Entry<'a> {
            message: String,
            error: &'a ValidationError,
        }

        serializer.collect_seq(self.errors.iter().map(|error| Entry {
            message: error.to_string(),
            error,
        }))
    }
}

impl FromIterator<ValidationError> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<ValidationError> for ValidationReport {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
