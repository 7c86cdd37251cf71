//! Tests for granule provenance classification.

use granule_common::granule::{classify, is_third_party, Provenance, Provider};

// ============================================================================
// Third-party names
// ============================================================================

#[test]
fn test_sentinel2_esa_name() {
    assert!(is_third_party(
        "S2A_MSIL1C_20200627T150921_N0209_R025_T22WEB_20200627T170912"
    ));
}

#[test]
fn test_sentinel2_cog_name() {
    assert!(is_third_party("S2B_22WEB_20200612_0_L1C"));
}

#[test]
fn test_short_sentinel2_prefix() {
    assert_eq!(classify("S2_foo"), Provenance::ThirdParty(Provider::Sentinel2));
}

#[test]
fn test_landsat8_name() {
    assert!(is_third_party("LC08_L1TP_009011_20200820_20200905_02_T1"));
    assert_eq!(
        classify("LC08_L1TP_009011_20200820_20200905_02_T1"),
        Provenance::ThirdParty(Provider::Landsat8)
    );
}

// ============================================================================
// Native names
// ============================================================================

#[test]
fn test_sentinel1_is_native() {
    assert!(!is_third_party(
        "S1A_IW_SLC__1SSH_20150608T205059_20150608T205126_006287_0083E8_C4F0"
    ));
}

#[test]
fn test_unrecognized_names_default_to_native() {
    for name in ["foo", "", "S1B_IW_GRDH", "LC8_foo", "LT05_L1TP", "  S2A_leading_space"] {
        assert_eq!(classify(name), Provenance::Native, "{name:?}");
    }
}
