//! Job submission types.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Processing job types accepted for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    RtcGamma,
    InsarGamma,
    Autorift,
}

/// Job types that process the full scene against a DEM and therefore need
/// DEM coverage for every native granule.
const COVERAGE_REQUIRED: &[JobType] = &[JobType::RtcGamma, JobType::InsarGamma];

/// Whether granules of a job of this type must pass the DEM coverage check.
pub fn requires_coverage(job_type: JobType) -> bool {
    COVERAGE_REQUIRED.contains(&job_type)
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::RtcGamma => "RTC_GAMMA",
            JobType::InsarGamma => "INSAR_GAMMA",
            JobType::Autorift => "AUTORIFT",
        }
    }

    pub fn requires_coverage(&self) -> bool {
        requires_coverage(*self)
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job parameters. Only `granules` matters for validation; everything else is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobParameters {
    #[serde(default)]
    pub granules: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A submitted processing job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_type: JobType,

    #[serde(default)]
    pub job_parameters: JobParameters,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Job {
    /// Create a job over the given granules.
    pub fn new<I, S>(job_type: JobType, granules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            job_type,
            job_parameters: JobParameters {
                granules: granules.into_iter().map(Into::into).collect(),
                extra: Map::new(),
            },
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn granules(&self) -> &[String] {
        &self.job_parameters.granules
    }
}

/// Every granule referenced by `jobs`, in first-occurrence order, without
/// duplicates.
pub fn granule_names<'a, I>(jobs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();
    for job in jobs {
        for name in job.granules() {
            if seen.insert(name.as_str()) {
                names.push(name.clone());
            }
        }
    }
    names
}
