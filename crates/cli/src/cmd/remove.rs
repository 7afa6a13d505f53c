use anyhow::{Context, Result};
use serde::Serialize;
use winalias_lib::alias::{AliasError, Scope, normalize_name};

use super::open_store;
use crate::output::{OutputFormat, print_info, print_json, print_success};
use crate::prompts::confirm;

#[derive(Debug, Serialize)]
struct RemoveResult {
  scope: Scope,
  name: String,
  removed: bool,
}

pub fn cmd_remove(name: &str, scope: Scope, force: bool, output: OutputFormat) -> Result<()> {
  let store = open_store();
  let name = normalize_name(name)?;

  let entry = store
    .get(scope, &name)?
    .ok_or_else(|| AliasError::NotFound { scope, name })?;

  let question = format!("Remove {} alias '{}' ({})?", entry.scope, entry.name, entry.target_path);
  let removed = confirm(&question, force)?;

  if removed {
    store
      .delete(scope, &entry.name)
      .with_context(|| format!("Failed to remove alias '{}'", entry.name))?;
  }

  if output.is_json() {
    return print_json(&RemoveResult {
      scope,
      name: entry.name,
      removed,
    });
  }

  if removed {
    print_success(&format!("Removed {} alias {}", scope, entry.name));
  } else {
    print_info("Aborted.");
  }

  Ok(())
}
