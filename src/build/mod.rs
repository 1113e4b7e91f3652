//! Build step: clear previous output, stop the build daemon, package.

mod fs;

pub use fs::reset_dir;

use crate::error::{BuildError, Result};
use crate::process::{CommandRunner, display_command, failure_reason};
use std::path::{Path, PathBuf};

/// Build tool invocation settings
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Build tool executable
    pub tool: String,
    /// Packaging task producing the distributable files
    pub task: String,
    /// Project root the tool runs in
    pub project_dir: PathBuf,
    /// Intermediate build output, cleared before building
    pub build_dir: PathBuf,
    /// Distribution output holding the release artifacts
    pub dist_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tool: "gradle".to_string(),
            task: "distributeExtension".to_string(),
            project_dir: PathBuf::from("."),
            build_dir: PathBuf::from("build"),
            dist_dir: PathBuf::from("dist"),
        }
    }
}

impl BuildConfig {
    /// Build directory resolved against the project root
    pub fn build_path(&self) -> PathBuf {
        self.project_dir.join(&self.build_dir)
    }

    /// Distribution directory resolved against the project root
    pub fn dist_path(&self) -> PathBuf {
        self.project_dir.join(&self.dist_dir)
    }
}

/// Drives the external build tool
pub struct Builder<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a BuildConfig,
}

impl<'a, R: CommandRunner> Builder<'a, R> {
    /// Create a builder for `config`
    pub fn new(runner: &'a R, config: &'a BuildConfig) -> Self {
        Self { runner, config }
    }

    /// Clear output directories, stop the daemon, then run the packaging task
    pub async fn build(&self) -> Result<()> {
        for dir in [self.config.build_path(), self.config.dist_path()] {
            log::info!("Clearing {}", dir.display());
            reset_dir(&dir).await?;
        }

        self.run_tool(&["--stop".to_string()])?;
        self.run_tool(std::slice::from_ref(&self.config.task))?;
        Ok(())
    }

    fn run_tool(&self, args: &[String]) -> Result<()> {
        let command = display_command(&self.config.tool, args);
        log::info!("Running {command}");

        let output = self
            .runner
            .run(&self.config.tool, args, self.project_dir())
            .map_err(|source| BuildError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BuildError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: failure_reason(&output),
            }
            .into());
        }
        Ok(())
    }

    fn project_dir(&self) -> &Path {
        &self.config.project_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;
    use crate::process::MockCommandRunner;
    use crate::process::test_support::*;

    fn config_in(root: &Path) -> BuildConfig {
        BuildConfig {
            project_dir: root.to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn build_clears_outputs_and_runs_tool_in_order() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        std::fs::create_dir_all(config.dist_path().join("nested")).unwrap();
        std::fs::write(config.dist_path().join("old.zip"), b"stale").unwrap();

        let mut runner = MockCommandRunner::new();
        let mut seq = mockall::Sequence::new();
        runner
            .expect_run()
            .withf(|program, args, _| program == "gradle" && argv(args) == ["--stop"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(output_with_status(0)));
        runner
            .expect_run()
            .withf(|program, args, _| {
                program == "gradle" && argv(args) == ["distributeExtension"]
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(output_with_status(0)));

        Builder::new(&runner, &config).build().await.unwrap();

        assert!(config.dist_path().is_dir());
        assert_eq!(std::fs::read_dir(config.dist_path()).unwrap().count(), 0);
        assert!(config.build_path().is_dir());
    }

    #[tokio::test]
    async fn failing_stop_aborts_before_packaging() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _, _| Ok(output_with_stderr(1, "daemon unreachable")));

        let err = Builder::new(&runner, &config).build().await.unwrap_err();
        match err {
            ReleaseError::Build(BuildError::CommandFailed {
                command, stderr, ..
            }) => {
                assert_eq!(command, "gradle --stop");
                assert_eq!(stderr, "daemon unreachable");
            }
            other => panic!("expected build failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_tool_is_a_spawn_failure() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());

        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_, _, _| {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "gradle not found",
            ))
        });

        let err = Builder::new(&runner, &config).build().await.unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Build(BuildError::SpawnFailed { .. })
        ));
    }
}
