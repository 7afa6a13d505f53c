//! In-memory registry with fault injection.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::tree::Hives;
use super::{Hive, Registry, RegistryError};

/// Operation kinds a fault can be injected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryOp {
  /// `subkeys`
  Enumerate,
  /// `read_value` and `key_exists`
  Read,
  /// `create_key`
  CreateKey,
  /// `write_value`
  WriteValue,
  /// `delete_value` and `delete_key`
  Delete,
}

/// A registry kept entirely in memory.
///
/// Used as the test double for the alias store. [`MemoryRegistry::fail`]
/// makes a given operation on a given hive return an OS error, which is how
/// tests simulate missing privileges or a permission revoked mid-operation.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
  hives: Mutex<Hives>,
  faults: Mutex<HashMap<(RegistryOp, Hive), u32>>,
}

impl MemoryRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Make every `op` on `hive` fail with `code` until cleared.
  pub fn fail(&self, op: RegistryOp, hive: Hive, code: u32) {
    self.faults().insert((op, hive), code);
  }

  /// Remove the fault for `op` on `hive`.
  pub fn recover(&self, op: RegistryOp, hive: Hive) {
    self.faults().remove(&(op, hive));
  }

  pub fn clear_faults(&self) {
    self.faults().clear();
  }

  fn hives(&self) -> MutexGuard<'_, Hives> {
    self.hives.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn faults(&self) -> MutexGuard<'_, HashMap<(RegistryOp, Hive), u32>> {
    self.faults.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn check(&self, op: RegistryOp, hive: Hive, path: &str) -> Result<(), RegistryError> {
    match self.faults().get(&(op, hive)) {
      Some(&code) => Err(RegistryError::os(
        code,
        format!("injected {:?} failure at {}\\{}", op, hive, path),
      )),
      None => Ok(()),
    }
  }
}

impl Registry for MemoryRegistry {
  fn subkeys(&self, hive: Hive, path: &str) -> Result<Option<Vec<String>>, RegistryError> {
    self.check(RegistryOp::Enumerate, hive, path)?;
    Ok(self.hives().subkeys(hive, path))
  }

  fn read_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<Option<String>, RegistryError> {
    self.check(RegistryOp::Read, hive, path)?;
    Ok(self.hives().read_value(hive, path, name))
  }

  fn key_exists(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    self.check(RegistryOp::Read, hive, path)?;
    Ok(self.hives().key_exists(hive, path))
  }

  fn create_key(&self, hive: Hive, path: &str) -> Result<(), RegistryError> {
    self.check(RegistryOp::CreateKey, hive, path)?;
    self.hives().create_key(hive, path);
    Ok(())
  }

  fn write_value(&self, hive: Hive, path: &str, name: Option<&str>, data: &str) -> Result<(), RegistryError> {
    self.check(RegistryOp::WriteValue, hive, path)?;
    self.hives().write_value(hive, path, name, data)
  }

  fn delete_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Result<bool, RegistryError> {
    self.check(RegistryOp::Delete, hive, path)?;
    Ok(self.hives().delete_value(hive, path, name))
  }

  fn delete_key(&self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    self.check(RegistryOp::Delete, hive, path)?;
    self.hives().delete_key(hive, path)
  }

  fn describe(&self) -> String {
    "in-memory registry".to_string()
  }
}
