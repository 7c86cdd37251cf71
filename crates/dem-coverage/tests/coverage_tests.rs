//! Coverage decisions against the fixture DEM reference.

use dem_coverage::{
    has_sufficient_coverage, CoverageError, CoverageParams, CoverageReference, DEFAULT_BUFFER,
    DEFAULT_THRESHOLD,
};
use test_utils::{fixture_reference, fixture_reference_file, footprints, rectangle};

fn sufficient(footprint: &granule_common::Footprint) -> bool {
    has_sufficient_coverage(&fixture_reference(), footprint, &CoverageParams::default())
}

// ============================================================================
// Default decisions
// ============================================================================

#[test]
fn test_defaults() {
    assert_eq!(DEFAULT_BUFFER, 0.15);
    assert_eq!(DEFAULT_THRESHOLD, 0.2);
    let params = CoverageParams::default();
    assert_eq!(params.buffer, DEFAULT_BUFFER);
    assert_eq!(params.threshold, DEFAULT_THRESHOLD);
}

#[test]
fn test_covered_land() {
    let ratio = fixture_reference().coverage_ratio(&footprints::wyoming(), DEFAULT_BUFFER);
    assert!(ratio > 0.999, "ratio {ratio}");
    assert!(sufficient(&footprints::wyoming()));
}

#[test]
fn test_island_tile_enclosed() {
    assert!(sufficient(&footprints::ascension()));
}

#[test]
fn test_coast_minimum_sufficient() {
    assert!(sufficient(&footprints::coast_minimum()));
}

#[test]
fn test_coast_slightly_offshore_insufficient() {
    assert!(!sufficient(&footprints::coast_too_far()));
}

#[test]
fn test_uncovered_regions() {
    assert!(!sufficient(&footprints::southern_greenland()));
    assert!(!sufficient(&footprints::antarctica()));
    assert!(!sufficient(&footprints::open_pacific()));
}

#[test]
fn test_outside_reference_fails_for_any_parameters() {
    let reference = fixture_reference();
    for buffer in [0.0, 0.15, 0.5, 1.0] {
        for threshold in [0.01, 0.2, 0.5, 1.0] {
            let params = CoverageParams::default()
                .with_buffer(buffer)
                .with_threshold(threshold);
            assert!(!reference.has_sufficient_coverage(&footprints::open_pacific(), &params));
            assert!(!reference.has_sufficient_coverage(&footprints::southern_greenland(), &params));
        }
    }
}

// ============================================================================
// Antimeridian
// ============================================================================

#[test]
fn test_antimeridian_covered_land() {
    let ratio =
        fixture_reference().coverage_ratio(&footprints::aleutians_antimeridian(), DEFAULT_BUFFER);
    assert!(ratio > 0.999, "ratio {ratio}");
    assert!(sufficient(&footprints::aleutians_antimeridian()));
}

#[test]
fn test_antimeridian_ocean() {
    assert!(!sufficient(&footprints::ocean_antimeridian()));
}

#[test]
fn test_antimeridian_mostly_ocean() {
    assert!(!sufficient(&footprints::aleutians_mostly_ocean()));
}

#[test]
fn test_antimeridian_closed_ring() {
    let footprint = granule_common::Footprint::new(vec![
        [179.7, 51.7],
        [-179.3, 51.7],
        [-179.3, 51.3],
        [179.7, 51.3],
        [179.7, 51.7],
    ]);
    assert!(sufficient(&footprint));
}

// ============================================================================
// Tunable buffer and threshold
// ============================================================================

#[test]
fn test_buffer_boundary() {
    let reference = fixture_reference();
    let footprint = footprints::coast_minimum();
    let params = CoverageParams::default();

    assert!(reference.has_sufficient_coverage(&footprint, &params.with_buffer(0.16)));
    assert!(!reference.has_sufficient_coverage(&footprint, &params.with_buffer(0.14)));
}

#[test]
fn test_threshold_boundary() {
    let reference = fixture_reference();
    let footprint = footprints::coast_minimum();
    let params = CoverageParams::default();

    assert!(reference.has_sufficient_coverage(&footprint, &params.with_threshold(0.19)));
    assert!(!reference.has_sufficient_coverage(&footprint, &params.with_threshold(0.21)));
}

#[test]
fn test_ratio_grows_with_buffer_offshore() {
    let reference = fixture_reference();
    let footprint = footprints::coast_minimum();

    let ratios: Vec<f64> = [0.0, 0.05, 0.1, 0.14, 0.15, 0.16, 0.2, 0.3]
        .iter()
        .map(|&buffer| reference.coverage_ratio(&footprint, buffer))
        .collect();

    assert_eq!(ratios[0], 0.0);
    for pair in ratios.windows(2) {
        assert!(pair[1] >= pair[0], "ratios not monotonic: {ratios:?}");
    }
}

#[test]
fn test_raising_threshold_never_helps() {
    let reference = fixture_reference();
    for footprint in [
        footprints::coast_minimum(),
        footprints::ascension(),
        footprints::aleutians_mostly_ocean(),
    ] {
        let mut failed = false;
        for step in 0..=20 {
            let params = CoverageParams::default().with_threshold(step as f64 * 0.05);
            let ok = reference.has_sufficient_coverage(&footprint, &params);
            assert!(!(failed && ok), "threshold {} passed after failing", params.threshold);
            failed |= !ok;
        }
    }
}

#[test]
fn test_partial_tile_ratio() {
    // Half of a 1x1 footprint over a single covered tile, no buffer
    let reference = CoverageReference::from_tiles([(0, 0)]);
    let footprint = rectangle(1.0, 0.0, 0.5, -0.5);
    let ratio = reference.coverage_ratio(&footprint, 0.0);
    assert!((ratio - 0.5).abs() < 1e-9, "ratio {ratio}");
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_from_geojson_file() {
    let file = fixture_reference_file();
    let reference = CoverageReference::load(file.path()).unwrap();
    assert_eq!(reference.len(), fixture_reference().len());
    assert!(reference.has_sufficient_coverage(&footprints::wyoming(), &CoverageParams::default()));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = CoverageReference::load(dir.path().join("missing.geojson"));
    assert!(matches!(result, Err(CoverageError::Io { .. })));
}

#[test]
fn test_load_invalid_json() {
    assert!(matches!(
        CoverageReference::from_geojson_str("not json"),
        Err(CoverageError::Parse(_))
    ));
}
