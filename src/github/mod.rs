//! GitHub integration for release operations

mod client;
mod models;

pub use client::{DEFAULT_API_URL, GitHubClient, GitHubConfig, ReleaseApi, parse_repository};
pub use models::{CreateReleaseRequest, CreatedRelease, UploadedAsset, upload_endpoint};
