//! Tests for alias management commands.

use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn list_on_empty_registry() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("HKEY_LOCAL_MACHINE"))
    .stdout(predicate::str::contains("HKEY_CURRENT_USER"))
    .stdout(predicate::str::contains("(no aliases)"));

  assert!(!env.registry_path().exists());
}

#[test]
fn added_alias_is_listed_under_its_scope() {
  let env = TestEnv::new();
  env.add("myapp", r"C:\Tools\app.exe", "user");

  env
    .cmd()
    .args(["list", "--scope", "user"])
    .assert()
    .success()
    .stdout(predicate::str::contains("myapp.exe"))
    .stdout(predicate::str::contains(r"C:\Tools\app.exe"));

  let listing = env.json(&["list"]);
  let scopes = listing["scopes"].as_array().unwrap();
  assert_eq!(scopes.len(), 2);
  assert_eq!(scopes[0]["scope"], "machine");
  assert!(scopes[0]["aliases"].as_array().unwrap().is_empty());
  assert_eq!(scopes[1]["scope"], "user");
  assert_eq!(scopes[1]["aliases"][0]["name"], "myapp.exe");
}

#[test]
fn add_reports_search_path() {
  let env = TestEnv::new();

  let entry = env.json(&["add", "tool", r"C:\Program Files\Tool\bin\tool.exe", "--scope", "machine"]);
  assert_eq!(entry["scope"], "machine");
  assert_eq!(entry["name"], "tool.exe");
  assert_eq!(entry["target_path"], r"C:\Program Files\Tool\bin\tool.exe");
  assert_eq!(entry["search_path"], r"C:\Program Files\Tool\bin");
}

#[test]
fn scope_aliases_are_accepted() {
  let env = TestEnv::new();
  env.add("tool", r"C:\x\tool.exe", "HKLM");

  let entry = env.json(&["show", "tool", "--scope", "machine"]);
  assert_eq!(entry["target_path"], r"C:\x\tool.exe");
}

#[test]
fn show_missing_alias_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["show", "ghost"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[test]
fn show_prints_values() {
  let env = TestEnv::new();
  env.add("myapp", r"C:\Tools\app.exe", "user");

  env
    .cmd()
    .args(["show", "myapp"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r"C:\Tools\app.exe"))
    .stdout(predicate::str::contains(r"C:\Tools"));
}

#[test]
fn empty_name_is_rejected() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["add", "  ", r"C:\x.exe"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn edit_renames_and_keeps_target() {
  let env = TestEnv::new();
  env.add("old", r"C:\Tools\app.exe", "user");

  let entry = env.json(&["edit", "old", "--rename", "new"]);
  assert_eq!(entry["name"], "new.exe");
  assert_eq!(entry["target_path"], r"C:\Tools\app.exe");

  env.cmd().args(["show", "old"]).assert().failure();
  env.cmd().args(["show", "new"]).assert().success();
}

#[test]
fn edit_retargets_and_updates_search_path() {
  let env = TestEnv::new();
  env.add("app", r"C:\Old\app.exe", "user");

  let entry = env.json(&["edit", "app", "--path", r"D:\New\app.exe"]);
  assert_eq!(entry["name"], "app.exe");
  assert_eq!(entry["search_path"], r"D:\New");
}

#[test]
fn edit_without_changes_fails() {
  let env = TestEnv::new();
  env.add("app", r"C:\app.exe", "user");

  env
    .cmd()
    .args(["edit", "app"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn remove_with_force() {
  let env = TestEnv::new();
  env.add("app", r"C:\app.exe", "user");

  env
    .cmd()
    .args(["remove", "app", "--force"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed"));

  let listing = env.json(&["list", "--scope", "user"]);
  assert!(listing["scopes"][0]["aliases"].as_array().unwrap().is_empty());
}

#[test]
fn remove_missing_alias_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["remove", "ghost", "--force"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[test]
fn remove_without_force_refuses_to_prompt() {
  let env = TestEnv::new();
  env.add("app", r"C:\app.exe", "user");

  env
    .cmd()
    .args(["remove", "app"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("non-interactive"));

  env.cmd().args(["show", "app"]).assert().success();
}

#[test]
fn scopes_are_independent() {
  let env = TestEnv::new();
  env.add("app", r"C:\machine\app.exe", "machine");

  env.cmd().args(["show", "app", "--scope", "user"]).assert().failure();
  env
    .cmd()
    .args(["remove", "app", "--scope", "user", "--force"])
    .assert()
    .failure();
  env.cmd().args(["show", "app", "--scope", "machine"]).assert().success();
}

#[test]
fn corrupt_registry_file_reports_error() {
  let env = TestEnv::new();
  std::fs::write(env.registry_path(), "not json").unwrap();

  env
    .cmd()
    .args(["list", "--scope", "user"])
    .assert()
    .failure();

  env
    .cmd()
    .arg("list")
    .assert()
    .success()
    .stderr(predicate::str::contains("Could not read"));
}

#[test]
fn info_reports_backend() {
  let env = TestEnv::new();

  let info = env.json(&["info"]);
  assert!(info["backend"].as_str().unwrap().starts_with("registry file"));
  assert_eq!(info["roots"][0]["scope"], "machine");
  assert!(
    info["roots"][1]["key"]
      .as_str()
      .unwrap()
      .starts_with(r"HKEY_CURRENT_USER\SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths")
  );
}

#[test]
fn registry_failure_cause_is_printed_once() {
  let env = TestEnv::new();
  std::fs::write(env.registry_path(), "not json").unwrap();

  let output = env.cmd().args(["list", "--scope", "user"]).output().unwrap();
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert_eq!(stderr.matches("failed to parse registry file").count(), 1, "{stderr}");
  assert_eq!(stderr.matches("line 1 column").count(), 1, "{stderr}");
}

#[test]
fn show_reports_stored_key_name() {
  let env = TestEnv::new();
  env.add("tool", r"C:\Tools\tool.exe", "user");

  let entry = env.json(&["show", "TOOL"]);
  assert_eq!(entry["name"], "tool.exe");

  env
    .cmd()
    .args(["show", "TOOL"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r"App Paths\tool.exe"))
    .stdout(predicate::str::contains("TOOL.exe").not());
}
