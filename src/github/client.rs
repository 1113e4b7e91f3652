//! GitHub REST client for release creation and asset upload

use super::models::{
    AssetResponse, CreateReleaseRequest, CreatedRelease, ReleaseResponse, UploadedAsset,
    upload_endpoint,
};
use crate::error::{PublishError, Result, UploadError};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use std::future::Future;
use std::path::Path;
use tokio_util::io::ReaderStream;
use url::Url;

/// Default GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const OCTET_STREAM: &str = "application/octet-stream";

/// Remote release hosting operations used by the release workflow
pub trait ReleaseApi {
    /// Create a release record and return its upload endpoint
    fn create_release(
        &self,
        request: &CreateReleaseRequest,
    ) -> impl Future<Output = Result<CreatedRelease>>;

    /// Stream the file at `path` to `endpoint` as asset `name`
    fn upload_asset(
        &self,
        endpoint: &str,
        name: &str,
        path: &Path,
    ) -> impl Future<Output = Result<UploadedAsset>>;
}

/// Connection settings for the GitHub API
#[derive(Clone)]
pub struct GitHubConfig {
    /// API root, e.g. `https://api.github.com`
    pub api_url: String,
    /// Repository in `owner/name` form
    pub repository: String,
    /// Access token; requests go out unauthenticated without one
    pub token: Option<String>,
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Parse `owner/repo` into its parts
pub fn parse_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner.to_string(), repo.trim_end_matches(".git").to_string()))
        }
        _ => Err(PublishError::InvalidRepository {
            repo: repository.to_string(),
        }
        .into()),
    }
}

/// GitHub release API client
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for `config.repository`
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let (owner, repo) = parse_repository(&config.repository)?;

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PublishError::Request {
                reason: format!("Failed to initialize HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner,
            repo,
            token: config.token.clone(),
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }

    fn releases_url(&self) -> String {
        format!("{}/repos/{}/{}/releases", self.api_url, self.owner, self.repo)
    }
}

impl ReleaseApi for GitHubClient {
    async fn create_release(&self, request: &CreateReleaseRequest) -> Result<CreatedRelease> {
        let url = self.releases_url();
        log::debug!("POST {url} for {}", request.tag_name);

        let response = self
            .authorize(self.http.post(&url))
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(request)
            .send()
            .await
            .map_err(|e| PublishError::Request {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Status {
                tag: request.tag_name.clone(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let release: ReleaseResponse =
            response
                .json()
                .await
                .map_err(|e| PublishError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        let upload_url = release
            .upload_url
            .as_deref()
            .ok_or_else(|| PublishError::InvalidResponse {
                reason: "response has no upload_url".to_string(),
            })?;
        let endpoint = upload_endpoint(upload_url);
        if endpoint.is_empty() {
            return Err(PublishError::InvalidResponse {
                reason: format!("unusable upload_url '{upload_url}'"),
            }
            .into());
        }

        Ok(CreatedRelease {
            id: release.id,
            html_url: release.html_url.clone(),
            upload_endpoint: endpoint.to_string(),
        })
    }

    async fn upload_asset(&self, endpoint: &str, name: &str, path: &Path) -> Result<UploadedAsset> {
        let mut url = Url::parse(endpoint).map_err(|e| UploadError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut().append_pair("name", name);

        let read_failed = |source| UploadError::ReadFailed {
            path: path.to_path_buf(),
            source,
        };
        let file = tokio::fs::File::open(path).await.map_err(read_failed)?;
        let size = file.metadata().await.map_err(read_failed)?.len();

        log::debug!("POST {url} ({size} bytes)");
        let response = self
            .authorize(self.http.post(url))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .header(CONTENT_LENGTH, size)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await
            .map_err(|e| UploadError::Request {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Status {
                name: name.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        // Success is decided by the status; the body only enriches the log line.
        let asset = response
            .json::<AssetResponse>()
            .await
            .map(UploadedAsset::from)
            .unwrap_or_else(|_| UploadedAsset {
                name: name.to_string(),
                size,
                download_url: None,
            });
        Ok(asset)
    }
}
