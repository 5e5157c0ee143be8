use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use crate::errors::SonarchatError;
use crate::utils::truncation::truncate_error;
use super::{ObjectLocation, ReportStore};
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Cloud Storage reader using the JSON API media download.
pub struct GcsStore {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl GcsStore {
    pub fn new(endpoint: Option<&str>, access_token: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            endpoint: normalize_endpoint(endpoint.unwrap_or(DEFAULT_ENDPOINT)),
            access_token: access_token.filter(|t| !t.is_empty()).map(|t| t.to_string()),
        }
    }
}

/// Emulator hosts are often given as bare `host:port`; those get `http://`.
fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}

/// Build `{endpoint}/storage/v1/b/{bucket}/o/{object}?alt=media`, with the
/// object name encoded as a single path segment.
pub fn object_media_url(endpoint: &str, bucket: &str, object: &str) -> Result<Url, SonarchatError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| SonarchatError::Config(format!("Invalid storage endpoint '{}': {}", endpoint, e)))?;

    url.path_segments_mut()
        .map_err(|_| SonarchatError::Config(format!("Storage endpoint cannot be a base URL: {}", endpoint)))?
        .pop_if_empty()
        .extend(["storage", "v1", "b", bucket, "o", object]);
    url.query_pairs_mut().append_pair("alt", "media");

    Ok(url)
}

#[async_trait]
impl ReportStore for GcsStore {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Vec<u8>, SonarchatError> {
        let ObjectLocation::Bucket { bucket, object } = location else {
            return Err(SonarchatError::Storage(format!("Cloud store cannot read {}", location)));
        };

        let url = object_media_url(&self.endpoint, bucket, object)?;
        let mut req = self.client.get(url);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send()
            .await
            .map_err(|e| SonarchatError::Network(format!("Storage request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => SonarchatError::NotFound(location.to_string()),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SonarchatError::Authentication(
                    format!("Access to {} denied ({})", location, status),
                ),
                _ => SonarchatError::Storage(format!(
                    "Download of {} failed with {}: {}",
                    location, status, truncate_error(&body)
                )),
            });
        }

        let bytes = resp.bytes()
            .await
            .map_err(|e| SonarchatError::Network(format!("Storage download interrupted: {}", e)))?;

        debug!(%location, bytes = bytes.len(), "Downloaded report object");
        Ok(bytes.to_vec())
    }

    fn store_name(&self) -> &str { "gcs" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_media_url_encodes_object_name() {
        let url = object_media_url(DEFAULT_ENDPOINT, "your-processed-csvs", "processed/sonarqube_report.csv").unwrap();
        assert_eq!(
            url.as_str(),
            "https://storage.googleapis.com/storage/v1/b/your-processed-csvs/o/processed%2Fsonarqube_report.csv?alt=media"
        );
    }

    #[test]
    fn test_object_media_url_trailing_slash_endpoint() {
        let url = object_media_url("http://localhost:4443/", "b", "o.csv").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4443/storage/v1/b/b/o/o.csv?alt=media");
    }

    #[test]
    fn test_object_media_url_invalid_endpoint() {
        assert!(matches!(object_media_url("not a url", "b", "o"), Err(SonarchatError::Config(_))));
    }

    #[test]
    fn test_bare_emulator_host_gets_scheme() {
        let store = GcsStore::new(Some("localhost:4443"), None);
        assert_eq!(store.endpoint, "http://localhost:4443");
        let url = object_media_url(&store.endpoint, "b", "o.csv").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4443/storage/v1/b/b/o/o.csv?alt=media");
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let store = GcsStore::new(None, Some(""));
        assert!(store.access_token.is_none());
        assert_eq!(store.endpoint, DEFAULT_ENDPOINT);
    }
}
