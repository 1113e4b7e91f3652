//! Release command execution.

use crate::cli::Args;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::output::OutputManager;
use crate::process::SystemCommandRunner;
use crate::release::ReleaseOrchestrator;

/// Execute release command against the real git, build tool and GitHub
pub(super) async fn execute_release(args: &Args, output: &OutputManager) -> Result<()> {
    let config = args.release_config();
    let github_config = args.github_config();
    if github_config.token.is_none() {
        log::warn!("No GitHub token configured; API requests will be unauthenticated");
    }

    output.verbose(&format!("Repository: {}", github_config.repository));
    output.verbose(&format!("Working tree: {}", config.repo_path.display()));

    let github = GitHubClient::new(&github_config)?;
    let runner = SystemCommandRunner;

    let summary = ReleaseOrchestrator::new(&runner, &github, &config, output)
        .run()
        .await?;

    output.success(&format!("Release {} created successfully!", summary.tag));
    if let Some(url) = &summary.release_url {
        output.indent(url);
    }
    output.verbose(&format!("{} asset(s) uploaded", summary.uploaded.len()));
    Ok(())
}
