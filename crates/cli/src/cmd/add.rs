use anyhow::{Context, Result};
use winalias_lib::alias::Scope;

use super::open_store;
use crate::output::{OutputFormat, print_alias, print_json, print_stat, print_success};

pub fn cmd_add(name: &str, path: &str, scope: Scope, output: OutputFormat) -> Result<()> {
  let store = open_store();

  let entry = store
    .create(scope, name, path)
    .with_context(|| format!("Failed to add alias '{}'", name.trim()))?;

  if output.is_json() {
    return print_json(&entry);
  }

  print_success(&format!("Added {} alias {}", entry.scope, entry.name));
  print_alias(&entry.name, &entry.target_path);
  if let Some(search_path) = entry.search_path.as_deref().filter(|p| !p.is_empty()) {
    print_stat("Path", search_path);
  }

  Ok(())
}
