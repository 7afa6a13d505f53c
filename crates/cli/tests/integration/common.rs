//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment with its own registry file.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn registry_path(&self) -> PathBuf {
    self.temp.path().join("registry.json")
  }

  /// A `winalias` command bound to this environment's registry.
  pub fn cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("winalias");
    cmd.env("WINALIAS_REGISTRY_FILE", self.registry_path());
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Add an alias and assert success.
  pub fn add(&self, name: &str, path: &str, scope: &str) {
    self.cmd().args(["add", name, path, "--scope", scope]).assert().success();
  }

  /// Run a command with `-o json` and parse its stdout.
  pub fn json(&self, args: &[&str]) -> serde_json::Value {
    let output = self.cmd().args(args).args(["-o", "json"]).output().unwrap();
    assert!(
      output.status.success(),
      "command {:?} failed: {}",
      args,
      String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
  }
}
