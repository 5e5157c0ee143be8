pub mod url;
pub mod gcs;
pub mod local;

use std::sync::Arc;
use async_trait::async_trait;
use crate::config::StorageConfig;
use crate::errors::SonarchatError;

pub use url::{parse_report_url, ObjectLocation};
pub use gcs::GcsStore;
pub use local::LocalStore;

/// Read access to the object holding the report.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Download the full object as raw bytes.
    async fn fetch(&self, location: &ObjectLocation) -> Result<Vec<u8>, SonarchatError>;

    /// Store name for logging
    fn store_name(&self) -> &str;
}

/// Pick the store that can serve `location`.
pub fn store_for(location: &ObjectLocation, config: &StorageConfig) -> Arc<dyn ReportStore> {
    match location {
        ObjectLocation::Local(_) => Arc::new(LocalStore),
        ObjectLocation::Bucket { .. } => Arc::new(GcsStore::new(
            config.endpoint.as_deref(),
            config.access_token.as_deref(),
        )),
    }
}
