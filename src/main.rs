//! cut_release - build, tag and publish a GitHub release with its artifacts.

use cut_release::cli;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    process::exit(cli::run().await);
}
