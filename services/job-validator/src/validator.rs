//! Job batch validation pipeline.
//!
//! jobs -> granule names -> CMR metadata -> existence check -> coverage check
//!
//! Each check reports every offending granule at once. The pipeline is
//! stateless; a [`JobValidator`] can serve any number of concurrent calls.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use cmr_client::CmrClient;
use dem_coverage::{CoverageParams, CoverageReference};
use granule_common::{
    granule_names, is_third_party, GranuleMetadata, GranuleValidationError, Job, ValidationKind,
};
use tracing::{debug, info, instrument, warn};

use crate::error::ValidationResult;
use crate::metrics;

/// Native granules in `requested` that CMR did not return.
///
/// Third-party granules are never reported; their providers validate them.
pub fn check_granules_exist(
    requested: &[String],
    metadata: &[GranuleMetadata],
) -> Result<(), GranuleValidationError> {
    let found: HashSet<&str> = metadata.iter().map(|g| g.name.as_str()).collect();
    let mut reported: HashSet<&str> = HashSet::new();

    let missing: Vec<String> = requested
        .iter()
        .filter(|name| !is_third_party(name) && !found.contains(name.as_str()))
        .filter(|name| reported.insert(name.as_str()))
        .cloned()
        .collect();

    GranuleValidationError::check(ValidationKind::NotFound, missing)
}

/// Granules without sufficient DEM coverage, in input order, each named once.
pub fn check_dem_coverage<'a, I>(
    reference: &CoverageReference,
    granules: I,
    params: &CoverageParams,
) -> Result<(), GranuleValidationError>
where
    I: IntoIterator<Item = &'a GranuleMetadata>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut insufficient = Vec::new();

    for granule in granules {
        if !seen.insert(granule.name.as_str()) {
            continue;
        }
        if !reference.has_sufficient_coverage(&granule.polygon, params) {
            debug!(granule = %granule.name, "Insufficient DEM coverage");
            insufficient.push(granule.name.clone());
        }
    }

    GranuleValidationError::check(ValidationKind::InsufficientDemCoverage, insufficient)
}

/// Validates job batches against CMR and the DEM coverage reference.
#[derive(Clone)]
pub struct JobValidator {
    cmr: Arc<dyn CmrClient>,
    reference: Arc<CoverageReference>,
    params: CoverageParams,
}

impl JobValidator {
    /// Create a validator with default coverage parameters.
    pub fn new(cmr: Arc<dyn CmrClient>, reference: Arc<CoverageReference>) -> Self {
        Self {
            cmr,
            reference,
            params: CoverageParams::default(),
        }
    }

    pub fn with_params(mut self, params: CoverageParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &CoverageParams {
        &self.params
    }

    /// Validate a batch of jobs. Succeeds silently when every job is
    /// admissible.
    #[instrument(skip_all, fields(jobs = jobs.len()))]
    pub async fn validate(&self, jobs: &[Job]) -> ValidationResult<()> {
        metrics::record_validation();

        let names = granule_names(jobs);
        if names.is_empty() {
            debug!("No granules requested");
            return Ok(());
        }

        let metadata = self.cmr.fetch_metadata(&names).await.map_err(|e| {
            warn!(error = %e, "Granule metadata query failed");
            metrics::record_cmr_failure();
            e
        })?;

        check_granules_exist(&names, &metadata).map_err(rejected)?;

        let candidates = coverage_candidates(jobs, &metadata);
        check_dem_coverage(&self.reference, candidates, &self.params).map_err(rejected)?;

        info!(granules = names.len(), "Jobs validated");
        Ok(())
    }
}

/// Metadata of every native granule in a job that needs DEM coverage,
/// deduplicated, in first-occurrence order.
fn coverage_candidates<'a>(jobs: &[Job], metadata: &'a [GranuleMetadata]) -> Vec<&'a GranuleMetadata> {
    let by_name: HashMap<&str, &GranuleMetadata> =
        metadata.iter().map(|g| (g.name.as_str(), g)).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    let mut candidates = Vec::new();
    for job in jobs.iter().filter(|job| job.job_type.requires_coverage()) {
        for name in job.granules() {
            if is_third_party(name) {
                continue;
            }
            if let Some(granule) = by_name.get(name.as_str()) {
                if seen.insert(granule.name.as_str()) {
                    candidates.push(*granule);
                }
            }
        }
    }
    candidates
}

fn rejected(err: GranuleValidationError) -> GranuleValidationError {
    warn!(kind = ?err.kind, granules = ?err.granules, "Rejected job submission");
    metrics::record_rejected(err.kind, err.granules.len());
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use granule_common::{Footprint, JobType};

    fn covered() -> GranuleMetadata {
        GranuleMetadata::new("good", Footprint::rectangle(45.0, 41.0, -104.0, -111.0))
    }

    fn uncovered() -> GranuleMetadata {
        GranuleMetadata::new("bad", Footprint::rectangle(-62.0, -90.0, 180.0, -180.0))
    }

    fn reference() -> CoverageReference {
        CoverageReference::from_tiles(
            (-115..-100).flat_map(|lon| (37..49).map(move |lat| (lon, lat))),
        )
    }

    #[test]
    fn test_check_dem_coverage() {
        let reference = reference();
        let params = CoverageParams::default();

        check_dem_coverage(&reference, &[], &params).unwrap();
        check_dem_coverage(&reference, &[covered()], &params).unwrap();

        let err = check_dem_coverage(&reference, &[uncovered()], &params).unwrap_err();
        assert!(err.to_string().contains("bad"));

        let err = check_dem_coverage(&reference, &[covered(), uncovered()], &params).unwrap_err();
        assert!(err.to_string().contains("bad"));
        assert!(!err.to_string().contains("good"));
        assert_eq!(err.kind, ValidationKind::InsufficientDemCoverage);
    }

    #[test]
    fn test_check_dem_coverage_names_duplicates_once() {
        let granules = vec![uncovered(), covered(), uncovered()];
        let err = check_dem_coverage(&reference(), &granules, &CoverageParams::default())
            .unwrap_err();
        assert_eq!(err.granules, vec!["bad".to_string()]);
    }

    #[test]
    fn test_check_granules_exist() {
        let metadata = vec![
            GranuleMetadata::new("scene1", Footprint::new(vec![])),
            GranuleMetadata::new("scene2", Footprint::new(vec![])),
        ];
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        check_granules_exist(&[], &metadata).unwrap();
        check_granules_exist(&names(&["scene1"]), &metadata).unwrap();
        check_granules_exist(&names(&["scene1", "scene2"]), &metadata).unwrap();

        let err = check_granules_exist(
            &names(&["scene1", "scene2", "scene3", "scene4", "S2_foo", "LC08_bar"]),
            &metadata,
        )
        .unwrap_err();
        let message = err.to_string();

        assert!(!message.contains("S2_foo"));
        assert!(!message.contains("LC08_bar"));
        assert!(!message.contains("scene1"));
        assert!(!message.contains("scene2"));
        assert!(message.contains("scene3"));
        assert!(message.contains("scene4"));
        assert_eq!(err.kind, ValidationKind::NotFound);
    }

    #[test]
    fn test_coverage_candidates_skip_exempt_jobs() {
        let metadata = vec![covered(), uncovered()];
        let jobs = vec![
            Job::new(JobType::Autorift, ["good", "bad"]),
            Job::new(JobType::RtcGamma, ["good"]),
            Job::new(JobType::InsarGamma, ["good", "missing"]),
        ];

        let names: Vec<&str> = coverage_candidates(&jobs, &metadata)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["good"]);
    }
}
