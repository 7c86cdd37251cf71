//! Validation metrics.
//!
//! Recorded through the `metrics` facade; the hosting process decides
//! whether and how to export them.

use granule_common::ValidationKind;
use metrics::counter;

/// Record one `validate` call.
pub fn record_validation() {
    counter!("job_validations_total").increment(1);
}

/// Record granules rejected by a check.
pub fn record_rejected(kind: ValidationKind, granules: usize) {
    let check = match kind {
        ValidationKind::NotFound => "not_found",
        ValidationKind::InsufficientDemCoverage => "dem_coverage",
    };
    counter!("granules_rejected_total", "check" => check).increment(granules as u64);
}

/// Record a failed metadata query.
pub fn record_cmr_failure() {
    counter!("cmr_request_failures_total").increment(1);
}
