use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Scope;
use crate::consts::ALIAS_SUFFIX;
use crate::registry::RegistryError;

/// One App Paths alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
  pub scope: Scope,
  /// Key name, normally ending in `.exe`.
  pub name: String,
  /// Executable the alias resolves to (the key's default value).
  pub target_path: String,
  /// The stored `Path` value, if the key has one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub search_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum AliasError {
  #[error("invalid alias: {0}")]
  Validation(String),

  #[error("alias '{name}' not found in {scope} scope")]
  NotFound { scope: Scope, name: String },

  #[error("registry access failed in {scope} scope at {path}")]
  RegistryAccess {
    scope: Scope,
    path: String,
    code: u32,
    #[source]
    source: RegistryError,
  },
}

impl AliasError {
  pub fn registry(scope: Scope, path: &str, source: RegistryError) -> Self {
    AliasError::RegistryAccess {
      scope,
      path: path.to_string(),
      code: source.code(),
      source,
    }
  }

  pub fn is_access_denied(&self) -> bool {
    matches!(self, AliasError::RegistryAccess { source, .. } if source.is_access_denied())
  }

  /// Scope the failing operation targeted, when known.
  pub fn scope(&self) -> Option<Scope> {
    match self {
      AliasError::Validation(_) => None,
      AliasError::NotFound { scope, .. } | AliasError::RegistryAccess { scope, .. } => Some(*scope),
    }
  }
}

fn has_alias_suffix(name: &str) -> bool {
  name
    .len()
    .checked_sub(ALIAS_SUFFIX.len())
    .and_then(|start| name.get(start..))
    .is_some_and(|suffix| suffix.eq_ignore_ascii_case(ALIAS_SUFFIX))
}

/// Trim an alias name and append `.exe` when it lacks the suffix.
///
/// The suffix check ignores ASCII case, unlike a plain `ends_with(".exe")`,
/// so `APP.EXE` is kept rather than becoming `APP.EXE.exe`. Anything else is
/// appended to, so a typo such as `myapp.ex` becomes `myapp.ex.exe`.
pub fn normalize_name(name: &str) -> Result<String, AliasError> {
  let name = name.trim();

  if name.is_empty() {
    return Err(AliasError::Validation("alias name must not be empty".to_string()));
  }
  if name.contains('\\') {
    return Err(AliasError::Validation(format!(
      "alias name '{}' must not contain '\\'",
      name
    )));
  }

  if has_alias_suffix(name) {
    Ok(name.to_string())
  } else {
    Ok(format!("{}{}", name, ALIAS_SUFFIX))
  }
}

/// Trim a target path; reject it when empty. No other checks are made.
pub fn validate_target(target_path: &str) -> Result<String, AliasError> {
  let target_path = target_path.trim();
  if target_path.is_empty() {
    return Err(AliasError::Validation("program path must not be empty".to_string()));
  }
  Ok(target_path.to_string())
}

fn is_bare_drive(dir: &str) -> bool {
  let bytes = dir.as_bytes();
  bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Directory portion of a target path, stored as the alias `Path` value.
///
/// Everything before the last `\` or `/`, or an empty string when there is
/// none. A root directory keeps its separator (`C:\`, `\`).
pub fn search_directory(target_path: &str) -> String {
  match target_path.rfind(['\\', '/']) {
    None => String::new(),
    Some(idx) => {
      let dir = &target_path[..idx];
      if dir.is_empty() || is_bare_drive(dir) {
        target_path[..=idx].to_string()
      } else {
        dir.to_string()
      }
    }
  }
}
