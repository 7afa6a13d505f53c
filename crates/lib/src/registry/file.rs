//! JSON-persisted registry emulation.
//!
//! # File Layout
//!
//! ```text
//! {
//!   "version": 1,
//!   "hives": {
//!     "HKEY_LOCAL_MACHINE": { "subkeys": { ... } },
//!     "HKEY_CURRENT_USER":  { "subkeys": { "SOFTWARE": { ... } } }
//!   }
//! }
//! ```
//!
//! Each node holds `values` (the default value under the empty name) and
//! `subkeys`. Every mutation reloads the file, applies the change and writes
//! it back through a temp file rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::tree::Hives;
use super::{Hive, Registry, RegistryError};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
  version: u32,
  #[serde(default)]
  hives: Hives,
}

/// Registry stored in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileRegistry {
  path: PathBuf,
}

impl FileRegistry {
  pub fn new(path: PathBuf) -> Self {
    Self { path }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn io_error(&self, source: io::Error) -> RegistryError {
    RegistryError::Io {
      path: self.path.clone(),
      source,
    }
  }

  /// Load the tree. A missing file is an empty registry.
  fn load(&self) -> Result<Hives, RegistryError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Hives::default()),
      Err(e) => return Err(self.io_error(e)),
    };

    let file: RegistryFile = serde_json::from_str(&content).map_err(|source| RegistryError::Format {
      path: self.path.clone(),
      source,
    })?;

    if file.version != FORMAT_VERSION {
      return Err(RegistryError::UnsupportedVersion {
        path: self.path.clone(),
        version: file.version,
      });
    }

    Ok(file.hives)
  }

  fn save(&self, hives: Hives) -> Result<(), RegistryError> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
    }

    let file = RegistryFile {
      version: FORMAT_VERSION,
      hives,
    };
    let content = serde_json::to_string_pretty(&file).map_err(|source| RegistryError::Format {
      path: self.path.clone(),
      source,
    })?;

    let mut temp_name = self.path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content).map_err(|e| self.io_error(e))?;
    fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

    trace!(path = ?self.path, "registry file written");
    Ok(())
  }

  fn mutate<T>(&self, f: impl FnOnce(&mut Hives) -> Result<T, RegistryError>) -> Result<T, RegistryError> {
    let mut hives = self.load()?;
    let before = hives.clone();
    let result = f(&mut hives)?;
    if hives != before {
      self.save(hives)?;
    }
    Ok(result)
  }
}

impl Registry for FileRegistry {
  fn subkeys(&self, hive: Hive, path: &str) -> Result<Option<Vec<String>>, RegistryError> {
    Ok(self.load()?.subkeys(hive, path))
  }

  fn read_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<Option<String>, RegistryError> {
    Ok(self.load()?.read_value(hive, path, name))
  }

  fn key_exists(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    Ok(self.load()?.key_exists(hive, path))
  }

  fn create_key(&self, hive: Hive, path: &str) -> Result<(), RegistryError> {
    self.mutate(|hives| {
      hives.create_key(hive, path);
      Ok(())
    })
  }

  fn write_value(&self, hive: Hive, path: &str, name: Option<&str>, data: &str) -> Result<(), RegistryError> {
    self.mutate(|hives| hives.write_value(hive, path, name, data))
  }

  fn delete_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<bool, RegistryError> {
    self.mutate(|hives| Ok(hives.delete_value(hive, path, name)))
  }

  fn delete_key(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    self.mutate(|hives| hives.delete_key(hive, path))
  }

  fn describe(&self) -> String {
    format!("registry file {}", self.path.display())
  }
}
