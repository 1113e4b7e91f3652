//! Working tree inspection and release tagging via the system git.

use crate::error::{ReleaseError, Result, TagError};
use crate::process::{CommandRunner, display_command, failure_reason};
use std::path::PathBuf;
use std::process::Output;

/// Prefix prepended to the version to form the release tag.
const TAG_PREFIX: &str = "v";

/// Form the release tag for `version`.
pub fn tag_name(version: &str) -> String {
    format!("{TAG_PREFIX}{version}")
}

/// A git working tree reached through a command runner
#[derive(Debug)]
pub struct GitRepository<'a, R: CommandRunner> {
    runner: &'a R,
    path: PathBuf,
}

impl<'a, R: CommandRunner> GitRepository<'a, R> {
    /// Open the working tree rooted at `path`
    pub fn new(runner: &'a R, path: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            path: path.into(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<Output> {
        let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        self.runner
            .run("git", &args, &self.path)
            .map_err(|e| ReleaseError::Command {
                command: display_command("git", &args),
                reason: e.to_string(),
            })
    }

    /// Modified, staged, deleted and untracked entries, one porcelain line each
    pub fn dirty_entries(&self) -> Result<Vec<String>> {
        let output = self.git(&["status", "--porcelain", "--untracked-files=all"])?;
        if !output.status.success() {
            return Err(ReleaseError::Command {
                command: "git status --porcelain --untracked-files=all".to_string(),
                reason: failure_reason(&output),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Fail with [`ReleaseError::DirtyRepository`] unless the tree is clean
    pub fn ensure_clean(&self) -> Result<()> {
        let entries = self.dirty_entries()?;
        if entries.is_empty() {
            Ok(())
        } else {
            log::debug!("Dirty entries: {entries:?}");
            Err(ReleaseError::DirtyRepository { entries })
        }
    }

    /// Check whether `tag` exists locally
    pub fn tag_exists(&self, tag: &str) -> Result<bool> {
        let reference = format!("refs/tags/{tag}");
        let output = self.git(&["rev-parse", "--quiet", "--verify", reference.as_str()])?;
        Ok(output.status.success())
    }

    /// Create a lightweight tag at HEAD
    pub fn create_tag(&self, tag: &str) -> Result<()> {
        if self.tag_exists(tag)? {
            return Err(TagError::AlreadyExists {
                tag: tag.to_string(),
            }
            .into());
        }

        let output = self.git(&["tag", tag])?;
        if !output.status.success() {
            return Err(TagError::CreateFailed {
                tag: tag.to_string(),
                reason: failure_reason(&output),
            }
            .into());
        }
        Ok(())
    }

    /// Push `tag` to `remote`
    pub fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        let output = self.git(&["push", remote, tag])?;
        if !output.status.success() {
            return Err(TagError::PushRejected {
                tag: tag.to_string(),
                remote: remote.to_string(),
                reason: failure_reason(&output),
            }
            .into());
        }
        Ok(())
    }
}
