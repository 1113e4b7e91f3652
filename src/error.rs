//! Error types for release operations.
//!
//! Every release step has its own error enum; `ReleaseError` wraps them so the
//! CLI can name the failed step and print recovery suggestions.

use crate::release::{ReleasePhase, ReleaseStep};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// A release step failed; carries the step the orchestrator was in
    #[error("{source}")]
    Aborted {
        /// Step that was running
        step: ReleaseStep,
        /// Error raised by the step
        #[source]
        source: Box<ReleaseError>,
    },

    /// The orchestrator already finished and cannot run again
    #[error("Release already finished in phase {phase:?}")]
    AlreadyFinished {
        /// Phase the orchestrator ended in
        phase: ReleasePhase,
    },

    /// Working tree has modifications or untracked files
    #[error("Git working directory is not clean. Commit or stash changes first.")]
    DirtyRepository {
        /// `git status --porcelain` lines describing the dirty entries
        entries: Vec<String>,
    },

    /// Build tool errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Tag creation / push errors
    #[error("Tag error: {0}")]
    Tag(#[from] TagError),

    /// Release creation errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// Asset upload errors
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// An external command could not be run or reported failure outside a step-specific case
    #[error("Command execution failed: {command} - {reason}")]
    Command {
        /// Command line that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

/// Build step errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Output directory could not be cleared
    #[error("Failed to clear output directory {path}: {source}")]
    CleanFailed {
        /// Directory being cleared
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Build tool could not be started
    #[error("Failed to run '{command}': {source}")]
    SpawnFailed {
        /// Command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Build tool exited with a non-zero status
    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        /// Command line
        command: String,
        /// Exit status description
        status: String,
        /// Captured stderr
        stderr: String,
    },
}

/// Tag step errors
#[derive(Error, Debug)]
pub enum TagError {
    /// Tag already exists locally
    #[error("Git tag '{tag}' already exists. Choose a different version.")]
    AlreadyExists {
        /// Tag name
        tag: String,
    },

    /// `git tag` failed
    #[error("Failed to create tag '{tag}': {reason}")]
    CreateFailed {
        /// Tag name
        tag: String,
        /// Reason for the error
        reason: String,
    },

    /// `git push` failed or was rejected by the remote
    #[error("Failed to push tag '{tag}' to '{remote}': {reason}")]
    PushRejected {
        /// Tag name
        tag: String,
        /// Remote name
        remote: String,
        /// Reason for the error
        reason: String,
    },
}

/// Publish step errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// API responded with a non-success status
    #[error("Release creation for '{tag}' failed with HTTP {status}: {body}")]
    Status {
        /// Tag name
        tag: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Request could not be sent or the response could not be read
    #[error("Release creation request failed: {reason}")]
    Request {
        /// Reason for the error
        reason: String,
    },

    /// Response did not carry a usable upload endpoint
    #[error("Invalid release response: {reason}")]
    InvalidResponse {
        /// Reason for the error
        reason: String,
    },

    /// Repository identifier is not `owner/name`
    #[error("Invalid GitHub repository '{repo}'. Expected: owner/repo")]
    InvalidRepository {
        /// Repository string as given
        repo: String,
    },
}

/// Upload step errors
#[derive(Error, Debug)]
pub enum UploadError {
    /// Artifact directory could not be listed
    #[error("Failed to read artifact directory {path}: {source}")]
    ListFailed {
        /// Artifact directory
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Artifact file could not be opened
    #[error("Failed to open artifact {path}: {source}")]
    ReadFailed {
        /// Artifact path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Upload endpoint is not a valid URL
    #[error("Invalid upload endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// Endpoint as returned by the API
        endpoint: String,
        /// Reason for the error
        reason: String,
    },

    /// API responded with a non-success status
    #[error("Upload of '{name}' failed with HTTP {status}: {body}")]
    Status {
        /// Asset name
        name: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Request could not be sent
    #[error("Upload of '{name}' failed: {reason}")]
    Request {
        /// Asset name
        name: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Name of the release step this error aborted
    pub fn step(&self) -> &'static str {
        match self {
            ReleaseError::Aborted { step, .. } => step.as_str(),
            ReleaseError::DirtyRepository { .. } => ReleaseStep::CleanCheck.as_str(),
            ReleaseError::Build(_) => ReleaseStep::Build.as_str(),
            ReleaseError::Tag(_) => ReleaseStep::Tag.as_str(),
            ReleaseError::Publish(_) => ReleaseStep::Publish.as_str(),
            ReleaseError::Upload(_) => ReleaseStep::Upload.as_str(),
            ReleaseError::AlreadyFinished { .. } | ReleaseError::Command { .. } => "release",
        }
    }

    /// The error raised by the failing step, looking through [`ReleaseError::Aborted`]
    pub fn step_error(&self) -> &ReleaseError {
        match self {
            ReleaseError::Aborted { source, .. } => source.step_error(),
            other => other,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Aborted { source, .. } => source.recovery_suggestions(),
            ReleaseError::DirtyRepository { .. } => vec![
                "Commit pending changes: git add . && git commit -m 'message'".to_string(),
                "Stash changes temporarily: git stash --include-untracked".to_string(),
            ],
            ReleaseError::Tag(TagError::AlreadyExists { tag }) => vec![
                format!("Inspect the existing tag: git show {tag}"),
                "Pick a new version number".to_string(),
            ],
            ReleaseError::Tag(TagError::PushRejected { tag, remote, .. }) => vec![
                format!("The local tag '{tag}' was kept; push it manually: git push {remote} {tag}"),
                format!("Or delete it before retrying: git tag -d {tag}"),
            ],
            ReleaseError::Publish(PublishError::Status { status: 401, .. }) => vec![
                "Set GITHUB_TRISKEL_TOKEN (or pass --token) with a token that can create releases"
                    .to_string(),
            ],
            ReleaseError::Publish(PublishError::Status { tag, .. }) => vec![format!(
                "The tag '{tag}' is already pushed; create the release manually or delete the tag before retrying"
            )],
            ReleaseError::Upload(_) => vec![
                "The release exists with a partial asset set; upload the remaining files manually"
                    .to_string(),
            ],
            ReleaseError::Command { .. } => vec![
                "Check that the command is installed and --path points at a git working tree"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
