use anyhow::Result;
use serde::Serialize;
use winalias_lib::alias::{AliasEntry, Scope, ScopeListing};

use super::open_store;
use crate::output::{OutputFormat, or_unset, print_alias, print_info, print_json, print_warning};

#[derive(Debug, Serialize)]
struct ListOutput {
  scopes: Vec<ScopeOutput>,
}

#[derive(Debug, Serialize)]
struct ScopeOutput {
  scope: Scope,
  root: String,
  aliases: Vec<AliasEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<String>,
}

impl From<ScopeListing> for ScopeOutput {
  fn from(listing: ScopeListing) -> Self {
    let (aliases, error) = match listing.entries {
      Ok(entries) => (entries, None),
      Err(err) => (Vec::new(), Some(format!("{:#}", anyhow::Error::new(err)))),
    };
    ScopeOutput {
      scope: listing.scope,
      root: listing.scope.display_root(),
      aliases,
      error,
    }
  }
}

/// List aliases in one scope, or in both grouped by location.
///
/// An explicit scope that cannot be read is an error. Without one, a failing
/// scope is reported and the other is still listed.
pub fn cmd_list(scope: Option<Scope>, output: OutputFormat) -> Result<()> {
  let store = open_store();

  let listings = match scope {
    Some(scope) => vec![ScopeListing {
      scope,
      entries: Ok(store.list(scope)?),
    }],
    None => store.list_all(),
  };

  let result = ListOutput {
    scopes: listings.into_iter().map(ScopeOutput::from).collect(),
  };

  if output.is_json() {
    return print_json(&result);
  }

  for (i, group) in result.scopes.iter().enumerate() {
    if i > 0 {
      println!();
    }
    print_info(&format!("{} ({})", group.root, group.scope));

    if let Some(error) = &group.error {
      print_warning(&format!("Could not read {} aliases: {}", group.scope, error));
      continue;
    }
    if group.aliases.is_empty() {
      println!("  (no aliases)");
      continue;
    }
    for entry in &group.aliases {
      print_alias(&entry.name, or_unset(&entry.target_path));
    }
  }

  Ok(())
}
