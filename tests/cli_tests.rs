//! Command line surface of the cut_release binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn cut_release() -> Command {
    let mut cmd = Command::cargo_bin("cut_release").unwrap();
    cmd.env_remove("GITHUB_TRISKEL_TOKEN")
        .env_remove("RELEASE_GITHUB_REPO")
        .env_remove("RELEASE_GITHUB_API")
        .env_remove("RELEASE_BUILD_TOOL");
    cmd
}

#[test]
fn missing_version_prints_usage_and_exits_1() {
    cut_release()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn extra_positional_argument_exits_1() {
    cut_release()
        .args(["1.0.0", "2.0.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_exits_0() {
    cut_release()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<VERSION>"));
}

#[test]
fn version_flag_exits_0() {
    cut_release()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn invalid_version_is_rejected_before_any_step() {
    let temp = tempfile::tempdir().unwrap();

    cut_release()
        .args(["1.0 beta", "--path"])
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"));

    assert!(!temp.path().join("dist").exists());
}

#[test]
fn invalid_repository_is_rejected() {
    cut_release()
        .args(["1.0.0", "--repo", "not-a-repo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("owner/repo"));
}

#[test]
fn outside_a_git_repository_nothing_is_built() {
    let temp = tempfile::tempdir().unwrap();
    let work = temp.path().join("project");
    std::fs::create_dir(&work).unwrap();

    cut_release()
        .env("GIT_CEILING_DIRECTORIES", temp.path())
        .args(["1.0.0", "--api-url", "http://127.0.0.1:9", "--path"])
        .arg(&work)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Release failed during clean-check"));

    assert!(!work.join("build").exists());
    assert!(!work.join("dist").exists());
}
