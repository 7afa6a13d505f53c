//! Registry access.
//!
//! The alias store never touches the OS registry directly. It talks to a
//! [`Registry`] implementation handed to it at construction:
//!
//! - [`WindowsRegistry`]: the native registry (Windows only)
//! - [`MemoryRegistry`]: an in-memory tree with fault injection, for tests
//! - [`FileRegistry`]: the same tree persisted as JSON, for non-Windows hosts

mod file;
mod memory;
pub(crate) mod tree;
#[cfg(windows)]
mod windows;

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::REGISTRY_FILE_ENV;

pub use file::FileRegistry;
pub use memory::{MemoryRegistry, RegistryOp};
#[cfg(windows)]
pub use windows::WindowsRegistry;

/// `ERROR_FILE_NOT_FOUND`
pub const ERROR_FILE_NOT_FOUND: u32 = 2;

/// `ERROR_ACCESS_DENIED`
pub const ERROR_ACCESS_DENIED: u32 = 5;

/// A root registry namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hive {
  #[serde(rename = "HKEY_LOCAL_MACHINE")]
  LocalMachine,
  #[serde(rename = "HKEY_CURRENT_USER")]
  CurrentUser,
}

impl Hive {
  /// Full hive name as shown by regedit.
  pub const fn as_str(&self) -> &'static str {
    match self {
      Hive::LocalMachine => "HKEY_LOCAL_MACHINE",
      Hive::CurrentUser => "HKEY_CURRENT_USER",
    }
  }

  /// Abbreviated hive name (`HKLM`, `HKCU`).
  pub const fn short_name(&self) -> &'static str {
    match self {
      Hive::LocalMachine => "HKLM",
      Hive::CurrentUser => "HKCU",
    }
  }
}

impl fmt::Display for Hive {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Failure reported by a registry backend.
#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("{message} (os error {code})")]
  Os { code: u32, message: String },

  #[error("failed to access registry file {path}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse registry file {path}")]
  Format {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("unsupported registry file version {version} in {path}")]
  UnsupportedVersion { path: PathBuf, version: u32 },
}

impl RegistryError {
  pub fn os(code: u32, message: impl Into<String>) -> Self {
    RegistryError::Os {
      code,
      message: message.into(),
    }
  }

  /// The OS error code behind this failure, or 0 when there is none.
  pub fn code(&self) -> u32 {
    match self {
      RegistryError::Os { code, .. } => *code,
      RegistryError::Io { source, .. } => source.raw_os_error().map(|c| c as u32).unwrap_or(0),
      RegistryError::Format { .. } | RegistryError::UnsupportedVersion { .. } => 0,
    }
  }

  pub fn is_access_denied(&self) -> bool {
    match self {
      RegistryError::Io { source, .. } => source.kind() == io::ErrorKind::PermissionDenied,
      _ => self.code() == ERROR_ACCESS_DENIED,
    }
  }
}

/// Key/value operations the alias store needs.
///
/// Paths are backslash-separated and relative to the hive. Key and value
/// names compare case-insensitively. A `None` value name addresses the
/// key's default (unnamed) value. Absence is reported through `Option` or
/// `bool`, never as an error.
pub trait Registry {
  /// Names of the immediate subkeys of `path`, or `None` if the key does not exist.
  fn subkeys(&self, hive: Hive, path: &str) -> Result<Option<Vec<String>>, RegistryError>;

  /// String data of a value, or `None` if the key or the value does not exist.
  fn read_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<Option<String>, RegistryError>;

  fn key_exists(&self, hive: Hive, path: &str) -> Result<bool, RegistryError>;

  /// Create `path` (and any missing parents), or open it if present.
  fn create_key(&self, hive: Hive, path: &str) -> Result<(), RegistryError>;

  /// Write a string value. The key must exist.
  fn write_value(&self, hive: Hive, path: &str, name: Option<&str>, data: &str) -> Result<(), RegistryError>;

  /// Remove a value. Returns `false` if the key or the value was absent.
  fn delete_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<bool, RegistryError>;

  /// Remove a key without subkeys. Returns `false` if it was absent.
  fn delete_key(&self, hive: Hive, path: &str) -> Result<bool, RegistryError>;

  /// Human-readable description of the backend.
  fn describe(&self) -> String;
}

impl<R: Registry + ?Sized> Registry for &R {
  fn subkeys(&self, hive: Hive, path: &str) -> Result<Option<Vec<String>>, RegistryError> {
    (**self).subkeys(hive, path)
  }

  fn read_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<Option<String>, RegistryError> {
    (**self).read_value(hive, path, name)
  }

  fn key_exists(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    (**self).key_exists(hive, path)
  }

  fn create_key(&self, hive: Hive, path: &str) -> Result<(), RegistryError> {
    (**self).create_key(hive, path)
  }

  fn write_value(&self, hive: Hive, path: &str, name: Option<&str>, data: &str) -> Result<(), RegistryError> {
    (**self).write_value(hive, path, name, data)
  }

  fn delete_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<bool, RegistryError> {
    (**self).delete_value(hive, path, name)
  }

  fn delete_key(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    (**self).delete_key(hive, path)
  }

  fn describe(&self) -> String {
    (**self).describe()
  }
}

impl<R: Registry + ?Sized> Registry for Box<R> {
  fn subkeys(&self, hive: Hive, path: &str) -> Result<Option<Vec<String>>, RegistryError> {
    (**self).subkeys(hive, path)
  }

  fn read_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<Option<String>, RegistryError> {
    (**self).read_value(hive, path, name)
  }

  fn key_exists(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    (**self).key_exists(hive, path)
  }

  fn create_key(&self, hive: Hive, path: &str) -> Result<(), RegistryError> {
    (**self).create_key(hive, path)
  }

  fn write_value(&self, hive: Hive, path: &str, name: Option<&str>, data: &str) -> Result<(), RegistryError> {
    (**self).write_value(hive, path, name, data)
  }

  fn delete_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<bool, RegistryError> {
    (**self).delete_value(hive, path, name)
  }

  fn delete_key(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    (**self).delete_key(hive, path)
  }

  fn describe(&self) -> String {
    (**self).describe()
  }
}

/// Open the registry backend selected by the environment.
///
/// `WINALIAS_REGISTRY_FILE` selects a [`FileRegistry`] at that path on any
/// host. Otherwise Windows uses the native registry and other hosts fall
/// back to a file in the data directory.
pub fn open_default() -> Box<dyn Registry> {
  if let Some(path) = std::env::var_os(REGISTRY_FILE_ENV).filter(|v| !v.is_empty()) {
    debug!(path = ?path, "using file-backed registry from environment");
    return Box::new(FileRegistry::new(PathBuf::from(path)));
  }
  native()
}

#[cfg(windows)]
fn native() -> Box<dyn Registry> {
  Box::new(WindowsRegistry::new())
}

#[cfg(not(windows))]
fn native() -> Box<dyn Registry> {
  use crate::consts::REGISTRY_FILE_NAME;
  use crate::platform::paths::data_dir;

  let path = data_dir().join(REGISTRY_FILE_NAME);
  debug!(path = ?path, "no native registry on this host, using file-backed registry");
  Box::new(FileRegistry::new(path))
}
