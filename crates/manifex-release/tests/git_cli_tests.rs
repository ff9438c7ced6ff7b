// Integration tests for the git-backed VersionControl implementation
// These run against real repositories in temporary directories, with a
// bare repository standing in for the remote.

use std::fs;
use std::path::Path;
use std::process::Command;

use manifex_release::{
    run_backup_flow, BackupOptions, CommitOutcome, GitCli, VcsError, VersionControl,
};
use tempfile::TempDir;

/// Helper: run a git command in `dir` and return its trimmed stdout.
fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("git command");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Helper: create a repo with an initial commit on `main` and a `dev`
/// branch checked out, the layout the backup flow expects.
fn create_package_repo(path: &Path) {
    let init = Command::new("git")
        .arg("init")
        .arg(path)
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("git init");
    assert!(init.status.success(), "git init failed");

    for (key, val) in [("user.name", "Test"), ("user.email", "test@test.com")] {
        git(path, &["config", key, val]);
    }

    git(path, &["checkout", "-b", "main"]);
    fs::write(path.join("README.md"), b"hello").expect("write file");
    git(path, &["add", "README.md"]);
    git(path, &["commit", "-m", "initial"]);
    git(path, &["checkout", "-b", "dev"]);
}

/// Helper: create a bare repository and register it as `origin`.
fn add_bare_origin(repo: &Path, bare: &Path) {
    let init = Command::new("git")
        .arg("init")
        .arg("--bare")
        .arg(bare)
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("git init --bare");
    assert!(init.status.success(), "git init --bare failed");

    git(
        repo,
        &["remote", "add", "origin", bare.to_str().expect("utf-8 path")],
    );
}

#[test]
fn test_add_and_commit_reports_committed_then_clean() {
    let temp = TempDir::new().unwrap();
    create_package_repo(temp.path());
    let vcs = GitCli::new(temp.path());

    fs::write(temp.path().join("notes.txt"), b"changed").unwrap();
    let first = vcs.add_and_commit("add notes").unwrap();
    assert_eq!(first, CommitOutcome::Committed);

    let head_after_commit = git(temp.path(), &["rev-parse", "HEAD"]);
    let second = vcs.add_and_commit("nothing new").unwrap();
    assert_eq!(second, CommitOutcome::NothingToCommit);

    // The clean run created no commit and the subject is the first one's
    assert_eq!(git(temp.path(), &["rev-parse", "HEAD"]), head_after_commit);
    let subject = git(temp.path(), &["log", "-1", "--format=%s"]);
    assert_eq!(subject, "add notes");
}

#[test]
fn test_switch_branch_moves_the_working_tree() {
    let temp = TempDir::new().unwrap();
    create_package_repo(temp.path());
    let vcs = GitCli::new(temp.path());

    vcs.switch_branch("main").unwrap();
    assert_eq!(git(temp.path(), &["rev-parse", "--abbrev-ref", "HEAD"]), "main");

    vcs.switch_branch("dev").unwrap();
    assert_eq!(git(temp.path(), &["rev-parse", "--abbrev-ref", "HEAD"]), "dev");
}

#[test]
fn test_switch_to_missing_branch_is_command_failure() {
    let temp = TempDir::new().unwrap();
    create_package_repo(temp.path());
    let vcs = GitCli::new(temp.path());

    let err = vcs.switch_branch("does-not-exist").unwrap_err();

    assert!(matches!(err, VcsError::CommandFailed { .. }));
    assert!(err.to_string().contains("checkout"));
}

#[test]
fn test_push_updates_bare_remote() {
    let repo = TempDir::new().unwrap();
    let bare = TempDir::new().unwrap();
    create_package_repo(repo.path());
    add_bare_origin(repo.path(), bare.path());
    let vcs = GitCli::new(repo.path());

    fs::write(repo.path().join("data.txt"), b"payload").unwrap();
    vcs.add_and_commit("add data").unwrap();
    vcs.push_to_all_remotes("dev").unwrap();

    let local = git(repo.path(), &["rev-parse", "dev"]);
    let remote = git(bare.path(), &["rev-parse", "refs/heads/dev"]);
    assert_eq!(local, remote);
}

#[test]
fn test_backup_flow_with_promotion_against_real_repo() {
    // Given: A repository on dev with uncommitted work and a bare origin
    let repo = TempDir::new().unwrap();
    let bare = TempDir::new().unwrap();
    create_package_repo(repo.path());
    add_bare_origin(repo.path(), bare.path());
    fs::write(repo.path().join("feature.txt"), b"new work").unwrap();
    let vcs = GitCli::new(repo.path());

    // When: We run the backup flow with promotion
    let outcome = run_backup_flow(
        &vcs,
        BackupOptions {
            message: "backup with release".to_string(),
            promote: true,
        },
    )
    .unwrap();

    // Then: The commit landed on both branches and both were pushed
    assert_eq!(outcome.commit, CommitOutcome::Committed);
    assert!(outcome.promoted);

    let dev_rev = git(repo.path(), &["rev-parse", "dev"]);
    assert_eq!(git(bare.path(), &["rev-parse", "refs/heads/dev"]), dev_rev);
    assert_eq!(git(bare.path(), &["rev-parse", "refs/heads/main"]), dev_rev);

    // And: The working tree is back on the backup branch
    assert_eq!(
        git(repo.path(), &["rev-parse", "--abbrev-ref", "HEAD"]),
        "dev"
    );
}
