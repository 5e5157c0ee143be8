use std::fmt;
use std::path::PathBuf;
use crate::errors::SonarchatError;

const BROWSER_PREFIX: &str = "https://storage.cloud.google.com/";
const API_PREFIX: &str = "https://storage.googleapis.com/";
const GS_PREFIX: &str = "gs://";
const FILE_PREFIX: &str = "file://";

/// Where a report lives: a bucket object, or a file on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectLocation {
    Bucket { bucket: String, object: String },
    Local(PathBuf),
}

impl ObjectLocation {
    pub fn bucket(bucket: &str, object: &str) -> Self {
        Self::Bucket { bucket: bucket.to_string(), object: object.to_string() }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bucket { bucket, object } => write!(f, "gs://{}/{}", bucket, object),
            Self::Local(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Parse a report URL into its storage location.
///
/// Accepts the authenticated browser form
/// (`https://storage.cloud.google.com/<bucket>/<object>`), the public API
/// form, `gs://` URIs and `file://` paths.
pub fn parse_report_url(url: &str) -> Result<ObjectLocation, SonarchatError> {
    let url = url.trim();

    if let Some(path) = url.strip_prefix(FILE_PREFIX) {
        if path.is_empty() {
            return Err(SonarchatError::InvalidUrl(format!("{}: empty file path", url)));
        }
        return Ok(ObjectLocation::Local(PathBuf::from(path)));
    }

    let rest = [BROWSER_PREFIX, API_PREFIX, GS_PREFIX]
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .ok_or_else(|| SonarchatError::InvalidUrl(format!("{}: unsupported scheme or host", url)))?;

    let (bucket, object) = rest
        .split_once('/')
        .ok_or_else(|| SonarchatError::InvalidUrl(format!("{}: missing object path", url)))?;

    if bucket.is_empty() {
        return Err(SonarchatError::InvalidUrl(format!("{}: missing bucket name", url)));
    }
    if object.is_empty() {
        return Err(SonarchatError::InvalidUrl(format!("{}: missing object path", url)));
    }

    Ok(ObjectLocation::bucket(bucket, object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browser_url() {
        let loc = parse_report_url(
            "https://storage.cloud.google.com/your-processed-csvs/processed/sonarqube_report.csv",
        ).unwrap();
        assert_eq!(loc, ObjectLocation::bucket("your-processed-csvs", "processed/sonarqube_report.csv"));
    }

    #[test]
    fn test_parse_api_and_gs_urls() {
        let api = parse_report_url("https://storage.googleapis.com/b/report.csv").unwrap();
        let gs = parse_report_url("gs://b/report.csv").unwrap();
        assert_eq!(api, gs);
        assert_eq!(gs.to_string(), "gs://b/report.csv");
    }

    #[test]
    fn test_parse_file_url() {
        let loc = parse_report_url("file:///tmp/report.csv").unwrap();
        assert_eq!(loc, ObjectLocation::Local(PathBuf::from("/tmp/report.csv")));
    }

    #[test]
    fn test_parse_rejects_missing_object() {
        assert!(matches!(
            parse_report_url("https://storage.cloud.google.com/only-bucket"),
            Err(SonarchatError::InvalidUrl(_))
        ));
        assert!(matches!(parse_report_url("gs://bucket/"), Err(SonarchatError::InvalidUrl(_))));
        assert!(matches!(parse_report_url("gs:///object.csv"), Err(SonarchatError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_host() {
        assert!(parse_report_url("https://example.com/b/o.csv").is_err());
    }
}
