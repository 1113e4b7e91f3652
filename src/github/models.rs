//! Release API payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReleaseRequest {
    /// Tag the release points at
    pub tag_name: String,
    /// Release title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Whether to create a draft
    pub draft: bool,
    /// Whether to mark the release as a prerelease
    pub prerelease: bool,
}

impl CreateReleaseRequest {
    /// Published, non-prerelease release titled after `tag`.
    ///
    /// The body is `"Release <tag>"` rather than the bare tag.
    pub fn for_tag(tag: &str) -> Self {
        Self {
            tag_name: tag.to_string(),
            name: tag.to_string(),
            body: format!("Release {tag}"),
            draft: false,
            prerelease: false,
        }
    }
}

/// Fields read from the release creation response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReleaseResponse {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub upload_url: Option<String>,
}

/// Fields read from the asset upload response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AssetResponse {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub browser_download_url: Option<String>,
}

/// A release record created on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRelease {
    /// Release ID
    pub id: u64,
    /// Release page URL
    pub html_url: Option<String>,
    /// Asset upload URL with its URI template stripped
    pub upload_endpoint: String,
}

/// An asset attached to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    /// Asset name
    pub name: String,
    /// Uploaded size in bytes
    pub size: u64,
    /// Public download URL
    pub download_url: Option<String>,
}

impl From<AssetResponse> for UploadedAsset {
    fn from(asset: AssetResponse) -> Self {
        Self {
            name: asset.name,
            size: asset.size,
            download_url: asset.browser_download_url,
        }
    }
}

/// Strip the URI template from an upload URL.
///
/// `https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}`
/// becomes `https://uploads.github.com/repos/o/r/releases/1/assets`.
pub fn upload_endpoint(upload_url: &str) -> &str {
    match upload_url.split_once('{') {
        Some((endpoint, _)) => endpoint,
        None => upload_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_for_tag_uses_tag_as_title() {
        let request = CreateReleaseRequest::for_tag("v1.2.3");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tag_name": "v1.2.3",
                "name": "v1.2.3",
                "body": "Release v1.2.3",
                "draft": false,
                "prerelease": false,
            })
        );
    }

    #[test]
    fn upload_endpoint_truncates_at_first_placeholder() {
        assert_eq!(
            upload_endpoint("https://uploads.github.com/repos/o/r/releases/7/assets{?name,label}"),
            "https://uploads.github.com/repos/o/r/releases/7/assets"
        );
        assert_eq!(upload_endpoint("https://x/a{b}{c}"), "https://x/a");
        assert_eq!(upload_endpoint("https://x/assets"), "https://x/assets");
    }

    #[test]
    fn release_response_tolerates_missing_fields() {
        let release: ReleaseResponse = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(release.id, 42);
        assert!(release.upload_url.is_none());
        assert!(release.html_url.is_none());
    }
}
