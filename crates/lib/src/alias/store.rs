//! CRUD over App Paths aliases.

use tracing::{debug, warn};

use super::types::{normalize_name, search_directory, validate_target};
use super::{AliasEntry, AliasError, Scope};
use crate::consts::PATH_VALUE;
use crate::registry::tree::same_name;
use crate::registry::{Registry, RegistryError};

/// Result of listing one scope as part of [`AliasStore::list_all`].
#[derive(Debug)]
pub struct ScopeListing {
  pub scope: Scope,
  pub entries: Result<Vec<AliasEntry>, AliasError>,
}

/// Values of a key captured before it is overwritten, for rollback.
#[derive(Debug)]
struct StagedKey {
  path: String,
  existed: bool,
  target: Option<String>,
  search: Option<String>,
}

/// Reads and writes aliases through an injected [`Registry`].
///
/// Nothing is cached: every call goes to the registry, which stays the only
/// source of truth. Calls are synchronous and independent; an entry seen by
/// `list` may be gone by the time it is deleted.
#[derive(Debug)]
pub struct AliasStore<R> {
  registry: R,
}

impl<R: Registry> AliasStore<R> {
  pub fn new(registry: R) -> Self {
    Self { registry }
  }

  pub fn registry(&self) -> &R {
    &self.registry
  }

  /// All aliases in `scope`, in registry enumeration order.
  ///
  /// An absent App Paths key yields an empty list. Keys removed between
  /// enumeration and reading are skipped.
  pub fn list(&self, scope: Scope) -> Result<Vec<AliasEntry>, AliasError> {
    let root = scope.root_path();
    let names = self
      .registry
      .subkeys(scope.hive(), root)
      .map_err(|e| AliasError::registry(scope, root, e))?;

    let Some(names) = names else {
      debug!(%scope, "app paths key absent, no aliases");
      return Ok(Vec::new());
    };

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
      match self.read_entry(scope, &name)? {
        Some(entry) => entries.push(entry),
        None => debug!(%scope, alias = %name, "alias vanished while listing, skipping"),
      }
    }

    debug!(%scope, count = entries.len(), "listed aliases");
    Ok(entries)
  }

  /// List machine then user scope. A failing scope does not hide the other.
  pub fn list_all(&self) -> Vec<ScopeListing> {
    Scope::ALL
      .into_iter()
      .map(|scope| ScopeListing {
        scope,
        entries: self.list(scope),
      })
      .collect()
  }

  /// Read one alias. `name` is normalized like in [`AliasStore::create`].
  ///
  /// The returned entry carries the key name as stored, which may differ in
  /// case from `name`.
  pub fn get(&self, scope: Scope, name: &str) -> Result<Option<AliasEntry>, AliasError> {
    let name = normalize_name(name)?;
    match self.stored_name(scope, &name)? {
      Some(stored) => self.read_entry(scope, &stored),
      None => Ok(None),
    }
  }

  /// Create or overwrite an alias.
  ///
  /// If writing a value fails after the key was created, the key stays
  /// behind (possibly empty) and the error is returned.
  pub fn create(&self, scope: Scope, name: &str, target_path: &str) -> Result<AliasEntry, AliasError> {
    let name = normalize_name(name)?;
    let target_path = validate_target(target_path)?;
    let name = self.stored_name(scope, &name)?.unwrap_or(name);

    let entry = self.write_entry(scope, &name, &target_path)?;
    debug!(%scope, alias = %name, target = %target_path, "alias written");
    Ok(entry)
  }

  /// Rename and/or retarget an alias.
  ///
  /// The new entry is written before the old one is removed. If either step
  /// fails, the new key is rolled back to what it held before and the old
  /// entry is left as it was. Renaming to the same name (ignoring case)
  /// rewrites the values in place and keeps the stored name.
  pub fn update(
    &self,
    scope: Scope,
    old_name: &str,
    new_name: &str,
    new_target_path: &str,
  ) -> Result<AliasEntry, AliasError> {
    let old_name = normalize_name(old_name)?;
    let new_name = normalize_name(new_name)?;
    let new_target = validate_target(new_target_path)?;

    let old_name = match self.stored_name(scope, &old_name)? {
      Some(stored) => stored,
      None => return Err(AliasError::NotFound { scope, name: old_name }),
    };
    let hive = scope.hive();
    let old_path = scope.key_path(&old_name);

    if same_name(&old_name, &new_name) {
      let entry = self.write_entry(scope, &old_name, &new_target)?;
      debug!(%scope, alias = %old_name, target = %new_target, "alias updated in place");
      return Ok(entry);
    }

    let new_name = self.stored_name(scope, &new_name)?.unwrap_or(new_name);
    let staged = self.stage(scope, &new_name)?;

    let entry = match self.write_entry(scope, &new_name, &new_target) {
      Ok(entry) => entry,
      Err(err) => {
        self.roll_back(scope, &staged);
        return Err(err);
      }
    };

    match self.registry.delete_key(hive, &old_path) {
      Ok(true) => {}
      Ok(false) => {
        self.roll_back(scope, &staged);
        return Err(AliasError::NotFound { scope, name: old_name });
      }
      Err(e) => {
        self.roll_back(scope, &staged);
        return Err(AliasError::registry(scope, &old_path, e));
      }
    }

    debug!(%scope, from = %old_name, to = %new_name, target = %new_target, "alias renamed");
    Ok(entry)
  }

  /// Remove an alias. `name` is normalized like in [`AliasStore::create`].
  pub fn delete(&self, scope: Scope, name: &str) -> Result<(), AliasError> {
    let name = normalize_name(name)?;
    let path = scope.key_path(&name);

    let removed = self
      .registry
      .delete_key(scope.hive(), &path)
      .map_err(|e| AliasError::registry(scope, &path, e))?;
    if !removed {
      return Err(AliasError::NotFound { scope, name });
    }

    debug!(%scope, alias = %name, "alias removed");
    Ok(())
  }

  /// Key name under the scope root matching `name` ignoring case, as stored.
  fn stored_name(&self, scope: Scope, name: &str) -> Result<Option<String>, AliasError> {
    let root = scope.root_path();
    let names = self
      .registry
      .subkeys(scope.hive(), root)
      .map_err(|e| AliasError::registry(scope, root, e))?;

    Ok(names.into_iter().flatten().find(|stored| same_name(stored, name)))
  }

  fn read_entry(&self, scope: Scope, name: &str) -> Result<Option<AliasEntry>, AliasError> {
    let hive = scope.hive();
    let path = scope.key_path(name);
    let access = |e| AliasError::registry(scope, &path, e);

    if !self.registry.key_exists(hive, &path).map_err(access)? {
      return Ok(None);
    }

    // An unset default value reads as an empty path
    let target_path = self.registry.read_value(hive, &path, None).map_err(access)?.unwrap_or_default();
    let search_path = self.registry.read_value(hive, &path, Some(PATH_VALUE)).map_err(access)?;

    Ok(Some(AliasEntry {
      scope,
      name: name.to_string(),
      target_path,
      search_path,
    }))
  }

  fn write_entry(&self, scope: Scope, name: &str, target_path: &str) -> Result<AliasEntry, AliasError> {
    let hive = scope.hive();
    let path = scope.key_path(name);
    let access = |e| AliasError::registry(scope, &path, e);
    let search_path = search_directory(target_path);

    self.registry.create_key(hive, &path).map_err(access)?;
    self.registry.write_value(hive, &path, None, target_path).map_err(access)?;
    self
      .registry
      .write_value(hive, &path, Some(PATH_VALUE), &search_path)
      .map_err(access)?;

    Ok(AliasEntry {
      scope,
      name: name.to_string(),
      target_path: target_path.to_string(),
      search_path: Some(search_path),
    })
  }

  fn stage(&self, scope: Scope, name: &str) -> Result<StagedKey, AliasError> {
    let hive = scope.hive();
    let path = scope.key_path(name);
    let access = |e| AliasError::registry(scope, &path, e);

    let existed = self.registry.key_exists(hive, &path).map_err(access)?;
    let (target, search) = if existed {
      (
        self.registry.read_value(hive, &path, None).map_err(access)?,
        self.registry.read_value(hive, &path, Some(PATH_VALUE)).map_err(access)?,
      )
    } else {
      (None, None)
    };

    Ok(StagedKey {
      path,
      existed,
      target,
      search,
    })
  }

  fn roll_back(&self, scope: Scope, staged: &StagedKey) {
    let result = if staged.existed {
      self
        .restore_value(scope, &staged.path, None, staged.target.as_deref())
        .and_then(|_| self.restore_value(scope, &staged.path, Some(PATH_VALUE), staged.search.as_deref()))
    } else {
      self.registry.delete_key(scope.hive(), &staged.path).map(|_| ())
    };

    match result {
      Ok(()) => debug!(%scope, path = %staged.path, "rolled back staged alias"),
      Err(e) => warn!(%scope, path = %staged.path, error = %e, "failed to roll back staged alias"),
    }
  }

  fn restore_value(
    &self,
    scope: Scope,
    path: &str,
    name: Option<&str>,
    previous: Option<&str>,
  ) -> Result<(), RegistryError> {
    match previous {
      Some(data) => self.registry.write_value(scope.hive(), path, name, data),
      None => self.registry.delete_value(scope.hive(), path, name).map(|_| ()),
    }
  }
}
