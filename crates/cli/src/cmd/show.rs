use anyhow::Result;
use winalias_lib::alias::{AliasError, Scope, normalize_name};

use super::open_store;
use crate::output::{OutputFormat, or_unset, print_info, print_json, print_stat};

pub fn cmd_show(name: &str, scope: Scope, output: OutputFormat) -> Result<()> {
  let store = open_store();
  let name = normalize_name(name)?;

  let entry = store
    .get(scope, &name)?
    .ok_or_else(|| AliasError::NotFound { scope, name })?;

  if output.is_json() {
    return print_json(&entry);
  }

  print_info(&format!("{} ({})", entry.name, entry.scope));
  print_stat("Target", or_unset(&entry.target_path));
  print_stat("Path", entry.search_path.as_deref().unwrap_or("(none)"));
  print_stat("Key", &format!("{}\\{}", entry.scope.display_root(), entry.name));

  Ok(())
}
