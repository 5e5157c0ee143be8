use async_trait::async_trait;
use crate::errors::SonarchatError;
use super::{ObjectLocation, ReportStore};
use tracing::debug;

/// Serves `file://` report locations straight from disk.
pub struct LocalStore;

#[async_trait]
impl ReportStore for LocalStore {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Vec<u8>, SonarchatError> {
        let ObjectLocation::Local(path) = location else {
            return Err(SonarchatError::Storage(format!("Local store cannot read {}", location)));
        };

        match tokio::fs::read(path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "Read local report");
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SonarchatError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(SonarchatError::Io(e)),
        }
    }

    fn store_name(&self) -> &str { "local" }
}
