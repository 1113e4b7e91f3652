//! Command line argument parsing and validation.
//!
//! One positional version; everything else has a default or an environment
//! fallback so a plain `cut_release 1.2.3` works.

use crate::build::BuildConfig;
use crate::github::{DEFAULT_API_URL, GitHubConfig, parse_repository};
use crate::release::ReleaseConfig;
use clap::Parser;
use std::path::PathBuf;

/// Cut a release: build, tag, publish and upload artifacts
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cut_release",
    version,
    about = "Build, tag and publish a GitHub release with its artifacts",
    long_about = "Build, tag and publish a GitHub release with its artifacts.

Steps, in order, stopping at the first failure:
  1. refuse to run on a dirty working tree (untracked files included)
  2. clear build/ and dist/, stop the gradle daemon, run the packaging task
  3. create tag v<VERSION> and push it to the remote
  4. create the GitHub release for the tag
  5. upload every regular file in dist/ to the release

Usage:
  cut_release 1.2.3
  GITHUB_TRISKEL_TOKEN=... cut_release 1.2.3 --repo owner/name"
)]
pub struct Args {
    /// Version to release; the tag is `v<VERSION>`
    #[arg(id = "release_version", index = 1, value_name = "VERSION")]
    pub version: String,

    /// GitHub repository receiving the release (owner/name)
    #[arg(long, env = "RELEASE_GITHUB_REPO", default_value = "triskellib/ghidra")]
    pub repo: String,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TRISKEL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API root
    #[arg(long, env = "RELEASE_GITHUB_API", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Git remote the tag is pushed to
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Build tool executable
    #[arg(long, env = "RELEASE_BUILD_TOOL", default_value = "gradle")]
    pub build_tool: String,

    /// Build tool task producing the distributables
    #[arg(long, default_value = "distributeExtension")]
    pub build_task: String,

    /// Build output directory, cleared before building
    #[arg(long, default_value = "build")]
    pub build_dir: PathBuf,

    /// Distribution directory whose files are uploaded
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,

    /// Project and git working tree root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Show extra detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.version.trim().is_empty() {
            return Err("Version must not be empty".to_string());
        }
        if self.version.chars().any(char::is_whitespace) {
            return Err(format!(
                "Version '{}' must not contain whitespace",
                self.version
            ));
        }
        if parse_repository(&self.repo).is_err() {
            return Err(format!(
                "Invalid GitHub repository format: '{}'. Expected: owner/repo",
                self.repo
            ));
        }
        Ok(())
    }

    /// Release settings derived from the arguments
    pub fn release_config(&self) -> ReleaseConfig {
        ReleaseConfig {
            version: self.version.clone(),
            repo_path: self.path.clone(),
            remote: self.remote.clone(),
            build: BuildConfig {
                tool: self.build_tool.clone(),
                task: self.build_task.clone(),
                project_dir: self.path.clone(),
                build_dir: self.build_dir.clone(),
                dist_dir: self.dist_dir.clone(),
            },
        }
    }

    /// GitHub connection settings derived from the arguments
    pub fn github_config(&self) -> GitHubConfig {
        GitHubConfig {
            api_url: self.api_url.clone(),
            repository: self.repo.clone(),
            token: self.token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("cut_release").chain(argv.iter().copied()))
    }

    #[test]
    fn version_is_the_only_required_argument() {
        let args = parse(&["1.2.3", "--token", "t"]).unwrap();
        assert_eq!(args.version, "1.2.3");
        assert_eq!(args.remote, "origin");
        assert_eq!(args.build_tool, "gradle");
        assert_eq!(args.build_task, "distributeExtension");
        assert_eq!(args.dist_dir, PathBuf::from("dist"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn version_flag_coexists_with_version_argument() {
        let err = parse(&["--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);

        let args = parse(&["9.9.9"]).unwrap();
        assert_eq!(args.version, "9.9.9");
    }

    #[test]
    fn wrong_arity_is_rejected() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["1.0.0", "2.0.0"]).is_err());
    }

    #[test]
    fn validation_rejects_bad_versions_and_repos() {
        let mut args = parse(&["1.0.0", "--repo", "owner/name"]).unwrap();
        assert!(args.validate().is_ok());

        args.version = "1.0 beta".to_string();
        assert!(args.validate().unwrap_err().contains("whitespace"));

        args.version = "1.0.0".to_string();
        args.repo = "no-slash".to_string();
        assert!(args.validate().unwrap_err().contains("owner/repo"));
    }

    #[test]
    fn configs_resolve_against_project_path() {
        let args = parse(&[
            "4.5.6",
            "--path",
            "/work/ghidra",
            "--dist-dir",
            "out",
            "--api-url",
            "https://ghe.example/api/v3",
            "--token",
            "abc",
        ])
        .unwrap();

        let release = args.release_config();
        assert_eq!(release.version, "4.5.6");
        assert_eq!(release.repo_path, PathBuf::from("/work/ghidra"));
        assert_eq!(release.build.dist_path(), PathBuf::from("/work/ghidra/out"));
        assert_eq!(release.build.build_path(), PathBuf::from("/work/ghidra/build"));

        let github = args.github_config();
        assert_eq!(github.api_url, "https://ghe.example/api/v3");
        assert_eq!(github.token.as_deref(), Some("abc"));
    }
}
