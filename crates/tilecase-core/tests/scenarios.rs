//! End-to-end scenarios for case validation, read back through the
//! rendered messages the way an editor would consume them.

use tilecase_core::test_utils::*;
use tilecase_core::*;

#[test]
fn single_biomass_case_passes_every_rule() {
    let case = biomass_case();
    assert!(validate_terrain_size(&case).is_empty());
    assert!(validate_structure_sizes(&case).is_empty());
    assert!(validate_structures_placement(&case).is_empty());
    assert!(validate_structures_overlap(&case).is_empty());
    assert!(validate_system_components(&case).is_empty());
    assert!(validate_case(&case).is_valid());
}

#[test]
fn terrain_from_larger_nested_array_is_rejected() {
    let mut case = biomass_case();
    case.grid_size = pos(2, 2);
    case.terrain_tiles = filled_terrain(3, 3);

    assert_eq!(validate_terrain_size(&case).len(), 1);
}

#[test]
fn structure_on_partial_row_reports_every_uncovered_cell() {
    let mut case = biomass_case();
    case.terrain_tiles = terrain_from_mask(&[&[true, false]]);
    case.structure_tiles = vec![StructureTile::new("biomass", pos3(2, 2, 0), pos(1, 1))];

    let errors = validate_structures_placement(&case);
    assert_eq!(errors.len(), 1);

    // Missing cells are the footprint minus the cells with terrain: the
    // single row only covers y=0, so all 9 cells of the 3x3 footprint miss.
    let message = errors[0].to_string();
    let groups = parenthesized_groups(&message);
    let covered = case.structure_tiles[0]
        .footprint()
        .filter(|&p| case.terrain_at(p).is_some())
        .count();
    assert_eq!(groups.len(), footprint_len(pos(2, 2)) - covered);
    assert_eq!(groups.len(), 9);
}

#[test]
fn missing_tiles_recoverable_from_message() {
    let mut case = biomass_case();
    case.structure_tiles = vec![StructureTile::new("biomass", pos(1, 1), pos(1, 1))];

    let report = validate_case(&case);
    let message = &report.messages()[0];
    let parsed: Vec<GridPosition> = parenthesized_groups(message)
        .into_iter()
        .map(|g| parse_group(g).unwrap())
        .collect();

    assert_eq!(parsed, vec![pos(1, 2), pos(2, 1), pos(2, 2)]);
    assert_eq!(parsed, report.missing_positions());
}

#[test]
fn overlapping_pair_reported_once_with_both_names() {
    let mut case = biomass_case();
    case.structure_tiles = vec![
        StructureTile::new("biomass", pos(1, 0), pos(0, 0)),
        StructureTile::new("house", pos(0, 0), pos(1, 0)),
    ];

    let report = validate_case(&case);
    assert_eq!(report.len(), 1);
    let message = report.to_string();
    assert!(message.contains("biomass"));
    assert!(message.contains("house"));
    assert_eq!(parenthesized_groups(&message), vec!["1,0"]);
}

#[test]
fn missing_component_named_in_report() {
    let mut case = biomass_case();
    case.structure_tiles = vec![StructureTile::new("factory", pos(1, 0), pos(0, 0))];

    let report = validate_case(&case);
    assert_eq!(
        report.count_by_kind().get(&ValidationErrorKind::MissingSystemComponent),
        Some(&1)
    );
    assert!(report.to_string().contains("'biomass'"));
}

#[test]
fn tiled_case_is_valid() {
    let report = validate_case(&tiled_case(8));
    assert!(report.is_valid(), "{report}");
}

#[test]
fn every_message_has_only_coordinate_groups() {
    let mut case = tiled_case(4);
    case.terrain_tiles = terrain_from_mask(&[
        &[true, true, true, true],
        &[true, false, true, true],
        &[true, true, true, true],
    ]);
    case.structure_tiles
        .push(StructureTile::new("tower", pos3(0, 0, 2), pos(3, 3)));
    case.structure_tiles
        .push(StructureTile::new("bad", pos(-2, 0), pos(0, 0)));

    let report = validate_case(&case);
    assert!(!report.is_valid());
    for error in &report {
        let message = error.to_string();
        let parsed: Vec<GridPosition> = parenthesized_groups(&message)
            .into_iter()
            .map(|g| parse_group(g).unwrap())
            .collect();
        if error.kind() == ValidationErrorKind::InvalidFootprint {
            assert_eq!(parsed, vec![pos(-2, 0)]);
        } else {
            assert_eq!(parsed, error.positions());
        }
    }
}
