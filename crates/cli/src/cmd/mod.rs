mod add;
mod edit;
mod info;
mod list;
mod remove;
mod show;

pub use add::cmd_add;
pub use edit::cmd_edit;
pub use info::cmd_info;
pub use list::cmd_list;
pub use remove::cmd_remove;
pub use show::cmd_show;

use tracing::debug;
use winalias_lib::alias::{AliasError, AliasStore, Scope};
use winalias_lib::platform;
use winalias_lib::registry::{self, Registry};

const ELEVATION_HINT: &str =
  "Machine-scope aliases live under HKEY_LOCAL_MACHINE. Rerun from an elevated (Run as administrator) prompt.";

fn open_store() -> AliasStore<Box<dyn Registry>> {
  let registry = registry::open_default();
  debug!(backend = %registry.describe(), "registry opened");
  AliasStore::new(registry)
}

/// Hint to print after `err`, if it is a machine-scope access denial.
pub fn elevation_hint(err: &anyhow::Error) -> Option<&'static str> {
  let alias_err = err.downcast_ref::<AliasError>()?;
  needs_elevation(alias_err, platform::is_elevated()).then_some(ELEVATION_HINT)
}

fn needs_elevation(err: &AliasError, elevated: bool) -> bool {
  !elevated && err.is_access_denied() && err.scope() == Some(Scope::Machine)
}

#[cfg(test)]
mod tests {
  use super::*;
  use anyhow::Context;
  use winalias_lib::registry::{ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, RegistryError};

  fn denied(scope: Scope, code: u32) -> AliasError {
    AliasError::registry(scope, "SOFTWARE", RegistryError::os(code, "denied"))
  }

  #[test]
  fn hint_only_for_unelevated_machine_denials() {
    assert!(needs_elevation(&denied(Scope::Machine, ERROR_ACCESS_DENIED), false));
    assert!(!needs_elevation(&denied(Scope::Machine, ERROR_ACCESS_DENIED), true));
    assert!(!needs_elevation(&denied(Scope::User, ERROR_ACCESS_DENIED), false));
    assert!(!needs_elevation(&denied(Scope::Machine, ERROR_FILE_NOT_FOUND), false));
  }

  #[test]
  fn hint_sees_through_context() {
    let result: Result<(), AliasError> = Err(denied(Scope::User, ERROR_ACCESS_DENIED));
    let err = result.context("Failed to add alias").unwrap_err();
    assert!(err.downcast_ref::<AliasError>().is_some());
    assert_eq!(elevation_hint(&err), None);
  }
}
