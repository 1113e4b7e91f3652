//! Git operations for release workflows.
//!
//! All git access shells out to the system `git` through a
//! [`CommandRunner`](crate::process::CommandRunner).

mod repository;

pub use repository::{GitRepository, tag_name};
