//! In-memory stand-in for the CMR service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use cmr_client::{CmrClient, CmrError, CmrResult};
use granule_common::GranuleMetadata;

/// CMR client answering from a fixed catalogue.
///
/// Unknown names are omitted, like the real service. Can be switched into a
/// failing mode to simulate an outage.
#[derive(Debug, Default)]
pub struct StubCmrClient {
    catalogue: Vec<GranuleMetadata>,
    fail_with_status: Option<u16>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<String>>>,
}

impl StubCmrClient {
    pub fn new(catalogue: Vec<GranuleMetadata>) -> Self {
        Self {
            catalogue,
            ..Self::default()
        }
    }

    /// A client whose every request fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    /// Number of `fetch_metadata` calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Names passed to each call, in call order.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CmrClient for StubCmrClient {
    async fn fetch_metadata(&self, names: &[String]) -> CmrResult<Vec<GranuleMetadata>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(names.to_vec());
        }

        if let Some(status) = self.fail_with_status {
            return Err(CmrError::Status {
                status,
                body: "stub failure".to_string(),
            });
        }

        Ok(names
            .iter()
            .filter_map(|name| self.catalogue.iter().find(|g| &g.name == name))
            .cloned()
            .collect())
    }
}
