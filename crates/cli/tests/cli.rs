//! End-to-end tests driving the `githook` binary

#![cfg(unix)]
#![allow(clippy::unwrap_used, clippy::panic)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_githook");

struct Repo {
    temp: TempDir,
}

impl Repo {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("repo/.git")).unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        Self { temp }
    }

    fn git_dir(&self) -> PathBuf {
        self.temp.path().join("repo/.git")
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.temp.path().join(rel)
    }

    /// `githook` isolated from the user's config and environment
    fn cmd(&self) -> Command {
        let mut cmd = Command::new(BIN);
        cmd.current_dir(self.temp.path().join("repo"))
            .env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env("GITHOOK_GIT_DIR", self.git_dir())
            .env("PATH", path_with_binary())
            .env_remove("GITHOOK_CONFIG")
            .env_remove("GITHOOK_LOG_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn install(&self, timing: &str, source: &Path, name: &str) {
        self.cmd()
            .args(["install", timing])
            .arg(source)
            .args(["--name", name])
            .assert()
            .success();
    }
}

/// PATH with the built binary first, so generated stubs find `githook`
fn path_with_binary() -> OsString {
    let bin_dir = Path::new(BIN).parent().unwrap().to_path_buf();
    let existing = std::env::var_os("PATH").unwrap_or_default();
    std::env::join_paths(std::iter::once(bin_dir).chain(std::env::split_paths(&existing)))
        .unwrap()
}

#[test]
fn test_install_copies_hook_and_creates_stub() {
    let repo = Repo::new();
    let source = repo.script("lint.sh", "exit 0");

    repo.cmd()
        .args(["install", "pre-commit"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed lint.sh for pre-commit"));

    let installed = repo.git_dir().join("hooks/installed/pre-commit/lint.sh");
    assert_eq!(fs::read(&installed).unwrap(), fs::read(&source).unwrap());

    let stub = fs::read_to_string(repo.git_dir().join("hooks/pre-commit")).unwrap();
    assert!(stub.starts_with("#!/bin/sh\n"));
    assert!(stub.contains("exec githook dispatch pre-commit \"$@\""));
}

#[test]
fn test_list_prints_timing_and_names() {
    let repo = Repo::new();
    let source = repo.script("hook", "exit 0");
    repo.install("pre-commit", &source, "b-second");
    repo.install("pre-commit", &source, "a-first");

    repo.cmd()
        .args(["list", "pre-commit", "commit-msg"])
        .assert()
        .success()
        .stdout("pre-commit:\n  a-first\n  b-second\ncommit-msg:\n");
}

#[test]
fn test_list_json() {
    let repo = Repo::new();
    let source = repo.script("hook", "exit 0");
    repo.install("pre-push", &source, "check");

    let output = repo
        .cmd()
        .args(["list", "pre-push", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "timing": "pre-push", "hooks": ["check"] }])
    );
}

#[test]
fn test_install_collision_fails_without_force() {
    let repo = Repo::new();
    let first = repo.script("first", "echo first");
    let second = repo.script("second", "echo second");
    repo.install("pre-commit", &first, "check");

    repo.cmd()
        .args(["install", "pre-commit"])
        .arg(&second)
        .args(["--name", "check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already installed"));

    let installed = repo.git_dir().join("hooks/installed/pre-commit/check");
    assert_eq!(fs::read(&installed).unwrap(), fs::read(&first).unwrap());

    repo.cmd()
        .args(["install", "pre-commit"])
        .arg(&second)
        .args(["--name", "check", "--force"])
        .assert()
        .success();
    assert_eq!(fs::read(&installed).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_unknown_timing_is_usage_error() {
    let repo = Repo::new();
    repo.cmd()
        .args(["install", "pre-comit", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pre-comit"));
}

#[test]
fn test_url_without_name_needs_explicit_name() {
    let repo = Repo::new();
    repo.cmd()
        .args(["install", "pre-commit", "https://example.invalid/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn test_missing_source_file_fails() {
    let repo = Repo::new();
    repo.cmd()
        .args(["install", "pre-commit", "./does-not-exist.sh"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unavailable"));
    assert!(!repo.git_dir().join("hooks/pre-commit").exists());
}

#[test]
fn test_uninstall() {
    let repo = Repo::new();
    let source = repo.script("hook", "exit 0");
    repo.install("post-merge", &source, "notify");

    repo.cmd()
        .args(["uninstall", "post-merge", "notify"])
        .assert()
        .success();
    assert!(!repo.git_dir().join("hooks/installed/post-merge/notify").exists());

    repo.cmd()
        .args(["uninstall", "post-merge", "notify"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn test_dispatch_stops_at_first_failure() {
    let repo = Repo::new();
    let marker_a = repo.path("a.ran");
    let marker_c = repo.path("c.ran");
    let a = repo.script("a", &format!("touch '{}'", marker_a.display()));
    let b = repo.script("b", "exit 3");
    let c = repo.script("c", &format!("touch '{}'", marker_c.display()));
    repo.install("pre-commit", &a, "a");
    repo.install("pre-commit", &b, "b");
    repo.install("pre-commit", &c, "c");

    repo.cmd()
        .args(["dispatch", "pre-commit"])
        .assert()
        .code(3);

    assert!(marker_a.exists());
    assert!(!marker_c.exists());
}

#[test]
fn test_dispatch_without_hooks_succeeds() {
    let repo = Repo::new();
    repo.cmd()
        .args(["dispatch", "post-checkout", "abc", "def", "1"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_dispatch_feeds_stdin_to_every_hook() {
    let repo = Repo::new();
    let first = repo.path("first.in");
    let second = repo.path("second.in");
    let one = repo.script("one", &format!("cat > '{}'", first.display()));
    let two = repo.script("two", &format!("cat > '{}'", second.display()));
    repo.install("pre-push", &one, "1");
    repo.install("pre-push", &two, "2");

    let input = "refs/heads/main 1111 refs/heads/main 2222\n";
    repo.cmd()
        .args(["dispatch", "pre-push", "origin", "git@example.com:repo.git"])
        .write_stdin(input)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(first).unwrap(), input);
    assert_eq!(fs::read_to_string(second).unwrap(), input);
}

#[test]
fn test_test_command_runs_native_hook() {
    let repo = Repo::new();
    let log = repo.path("args.log");
    let hook = repo.script("msg", &format!("echo \"$@\" > '{}'; exit 5", log.display()));
    repo.install("commit-msg", &hook, "check-msg");

    repo.cmd()
        .args(["test", "commit-msg", ".git/COMMIT_EDITMSG"])
        .assert()
        .code(5);

    assert_eq!(fs::read_to_string(log).unwrap(), ".git/COMMIT_EDITMSG\n");
}

#[test]
fn test_test_command_without_native_hook() {
    let repo = Repo::new();
    repo.cmd()
        .args(["test", "pre-rebase"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn test_foreign_native_hook_is_preserved() {
    let repo = Repo::new();
    let native = repo.git_dir().join("hooks/pre-commit");
    fs::create_dir_all(native.parent().unwrap()).unwrap();
    fs::write(&native, "#!/bin/sh\nmake check\n").unwrap();

    let source = repo.script("hook", "exit 0");
    repo.install("pre-commit", &source, "hook");

    assert_eq!(fs::read_to_string(native).unwrap(), "#!/bin/sh\nmake check\n");
}

#[test]
fn test_explicit_missing_config_is_error() {
    let repo = Repo::new();
    repo.cmd()
        .args(["list", "--config"])
        .arg(repo.path("nope.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_info_json() {
    let repo = Repo::new();
    let source = repo.script("hook", "exit 0");
    repo.install("pre-commit", &source, "hook");

    let output = repo.cmd().args(["info", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let pre_commit = json["timings"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["timing"] == "pre-commit")
        .unwrap();
    assert_eq!(pre_commit["stub"], "generated");
    assert_eq!(pre_commit["hooks"], 1);
}
