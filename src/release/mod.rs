//! Release orchestration.
//!
//! Runs clean-check, build, tag, publish and upload strictly in order. The
//! first failing step aborts the run; nothing already done is undone.

mod artifacts;
mod phase;

pub use artifacts::{Artifact, collect_artifacts};
pub use phase::{ReleasePhase, ReleaseStep};

use crate::build::{BuildConfig, Builder};
use crate::error::{ReleaseError, Result};
use crate::git::{GitRepository, tag_name};
use crate::github::{CreateReleaseRequest, ReleaseApi};
use crate::output::OutputManager;
use crate::process::CommandRunner;
use std::path::PathBuf;

/// Everything a release run needs, passed in explicitly
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Version to release, without the tag prefix
    pub version: String,
    /// Git working tree root
    pub repo_path: PathBuf,
    /// Remote the tag is pushed to
    pub remote: String,
    /// Build tool settings
    pub build: BuildConfig,
}

/// Outcome of a completed release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Tag that was created and pushed
    pub tag: String,
    /// Release page URL, when the API reported one
    pub release_url: Option<String>,
    /// Names of the uploaded assets, in upload order
    pub uploaded: Vec<String>,
}

/// Sequences the release steps against injected collaborators
pub struct ReleaseOrchestrator<'a, R: CommandRunner, A: ReleaseApi> {
    runner: &'a R,
    api: &'a A,
    config: &'a ReleaseConfig,
    output: &'a OutputManager,
    phase: ReleasePhase,
}

impl<'a, R: CommandRunner, A: ReleaseApi> ReleaseOrchestrator<'a, R, A> {
    /// Create an orchestrator in the [`ReleasePhase::Start`] phase
    pub fn new(
        runner: &'a R,
        api: &'a A,
        config: &'a ReleaseConfig,
        output: &'a OutputManager,
    ) -> Self {
        Self {
            runner,
            api,
            config,
            output,
            phase: ReleasePhase::Start,
        }
    }

    /// Current phase
    pub fn phase(&self) -> ReleasePhase {
        self.phase
    }

    fn advance(&mut self, next: ReleasePhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid release transition {:?} -> {:?}",
            self.phase,
            next
        );
        log::debug!("Release phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    /// Run every step once.
    ///
    /// A step failure is returned as [`ReleaseError::Aborted`] naming the
    /// step. A finished orchestrator (done or failed) cannot be rerun.
    pub async fn run(&mut self) -> Result<ReleaseSummary> {
        if self.phase.is_terminal() {
            return Err(ReleaseError::AlreadyFinished { phase: self.phase });
        }

        match self.execute().await {
            Ok(summary) => Ok(summary),
            Err(source) => {
                let Some(step) = self.phase.next_step() else {
                    return Err(source);
                };
                log::error!("Release aborted during {step}");
                self.advance(ReleasePhase::Failed(step));
                Err(ReleaseError::Aborted {
                    step,
                    source: Box::new(source),
                })
            }
        }
    }

    async fn execute(&mut self) -> Result<ReleaseSummary> {
        let repo = GitRepository::new(self.runner, self.config.repo_path.clone());

        // Clean-check
        self.output.progress("Checking working tree...");
        repo.ensure_clean()?;
        self.advance(ReleasePhase::CleanChecked);

        // Build
        self.output
            .progress(&format!("Building with {} {}...", self.config.build.tool, self.config.build.task));
        Builder::new(self.runner, &self.config.build).build().await?;
        self.output.success("Build complete");
        self.advance(ReleasePhase::Built);

        // Tag
        let tag = tag_name(&self.config.version);
        repo.create_tag(&tag)?;
        repo.push_tag(&self.config.remote, &tag)?;
        self.output.success(&format!("Created and pushed tag {tag}"));
        self.advance(ReleasePhase::Tagged);

        // Publish
        self.output.progress(&format!("Creating release {tag}..."));
        let release = self
            .api
            .create_release(&CreateReleaseRequest::for_tag(&tag))
            .await?;
        if let Some(url) = &release.html_url {
            self.output.verbose(&format!("Release page: {url}"));
        }
        self.advance(ReleasePhase::Published);

        // Upload
        let artifacts = collect_artifacts(&self.config.build.dist_path()).await?;
        if artifacts.is_empty() {
            self.output.warn("No artifacts found to upload");
        }

        let mut uploaded = Vec::with_capacity(artifacts.len());
        for (index, artifact) in artifacts.iter().enumerate() {
            self.advance(ReleasePhase::Uploading(index));
            self.output.println(&format!("Uploading {}", artifact.name));

            let asset = self
                .api
                .upload_asset(&release.upload_endpoint, &artifact.name, &artifact.path)
                .await?;
            self.output
                .indent(&format!("✓ Uploaded: {} ({} bytes)", asset.name, asset.size));
            if let Some(url) = &asset.download_url {
                self.output.verbose(&format!("Download: {url}"));
            }
            uploaded.push(artifact.name.clone());
        }

        self.advance(ReleasePhase::Done);
        Ok(ReleaseSummary {
            tag,
            release_url: release.html_url,
            uploaded,
        })
    }
}
