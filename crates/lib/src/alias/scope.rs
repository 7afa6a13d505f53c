use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::APP_PATHS_KEY;
use crate::registry::Hive;

/// Where an alias is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
  /// All users (`HKEY_LOCAL_MACHINE`). Writes need administrator rights.
  Machine,
  /// The current user (`HKEY_CURRENT_USER`).
  User,
}

impl Scope {
  /// Both scopes, machine first.
  pub const ALL: [Scope; 2] = [Scope::Machine, Scope::User];

  pub const fn hive(&self) -> Hive {
    match self {
      Scope::Machine => Hive::LocalMachine,
      Scope::User => Hive::CurrentUser,
    }
  }

  /// Path of the App Paths key, relative to the hive.
  pub const fn root_path(&self) -> &'static str {
    APP_PATHS_KEY
  }

  /// Path of one alias key, relative to the hive.
  pub fn key_path(&self, name: &str) -> String {
    format!("{}\\{}", self.root_path(), name)
  }

  /// Fully qualified App Paths key, including the hive name.
  pub fn display_root(&self) -> String {
    format!("{}\\{}", self.hive(), self.root_path())
  }

  pub const fn as_str(&self) -> &'static str {
    match self {
      Scope::Machine => "machine",
      Scope::User => "user",
    }
  }
}

impl fmt::Display for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scope '{0}' (expected machine, user, HKLM or HKCU)")]
pub struct ParseScopeError(String);

impl FromStr for Scope {
  type Err = ParseScopeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "machine" | "hklm" | "hkey_local_machine" => Ok(Scope::Machine),
      "user" | "hkcu" | "hkey_current_user" => Ok(Scope::User),
      _ => Err(ParseScopeError(s.to_string())),
    }
  }
}
