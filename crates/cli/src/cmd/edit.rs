use anyhow::{Context, Result, bail};
use winalias_lib::alias::{AliasError, Scope, normalize_name};

use super::open_store;
use crate::output::{OutputFormat, print_alias, print_json, print_success};

/// Rename and/or retarget an alias. Fields not given keep their current value.
pub fn cmd_edit(
  name: &str,
  rename: Option<&str>,
  path: Option<&str>,
  scope: Scope,
  output: OutputFormat,
) -> Result<()> {
  if rename.is_none() && path.is_none() {
    bail!("Nothing to change: pass --rename and/or --path");
  }

  let store = open_store();
  let name = normalize_name(name)?;

  let current = store
    .get(scope, &name)?
    .ok_or_else(|| AliasError::NotFound { scope, name })?;

  let new_name = rename.unwrap_or(current.name.as_str());
  let new_path = path.unwrap_or(current.target_path.as_str());

  let entry = store
    .update(scope, &current.name, new_name, new_path)
    .with_context(|| format!("Failed to update alias '{}'", current.name))?;

  if output.is_json() {
    return print_json(&entry);
  }

  if entry.name == current.name {
    print_success(&format!("Updated {} alias {}", entry.scope, entry.name));
  } else {
    print_success(&format!(
      "Renamed {} alias {} to {}",
      entry.scope, current.name, entry.name
    ));
  }
  print_alias(&entry.name, &entry.target_path);

  Ok(())
}
