//! # cut_release
//!
//! Cuts a release of a Gradle-built project in one linear pass:
//!
//! 1. refuse to run on a dirty working tree,
//! 2. clear the output directories and run the packaging task,
//! 3. create and push tag `v<version>`,
//! 4. create the GitHub release for that tag,
//! 5. upload every regular file in the distribution directory.
//!
//! The first failing step aborts the run. Nothing is retried or rolled back.
//!
//! ## Usage
//!
//! ```bash
//! GITHUB_TRISKEL_TOKEN=... cut_release 1.2.3
//! cut_release 1.2.3 --repo owner/name --dist-dir build/distributions
//! ```
//!
//! Git and the build tool are reached through [`process::CommandRunner`] and
//! the hosting API through [`github::ReleaseApi`], so
//! [`release::ReleaseOrchestrator`] can be driven with fakes.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod build;
pub mod cli;
pub mod error;
pub mod git;
pub mod github;
pub mod output;
pub mod process;
pub mod release;

pub use cli::Args;
pub use error::{ReleaseError, Result};
pub use github::{GitHubClient, ReleaseApi};
pub use process::{CommandRunner, SystemCommandRunner};
pub use release::{ReleaseConfig, ReleaseOrchestrator, ReleasePhase, ReleaseSummary};
