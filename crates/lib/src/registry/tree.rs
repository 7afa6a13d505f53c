//! Case-insensitive key tree shared by the in-memory and file backends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, Hive, RegistryError};

/// Registry names compare case-insensitively but keep the case they were created with.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
  a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
  path.split('\\').filter(|s| !s.is_empty())
}

/// Split `a\b\c` into (`a\b`, `c`).
fn split_leaf(path: &str) -> (&str, &str) {
  let path = path.trim_end_matches('\\');
  path.rsplit_once('\\').unwrap_or(("", path))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Node {
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  values: BTreeMap<String, String>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  subkeys: BTreeMap<String, Node>,
}

impl Node {
  fn stored_key<'a>(&'a self, name: &str) -> Option<&'a String> {
    self.subkeys.keys().find(|k| same_name(k, name))
  }

  fn stored_value_name<'a>(&'a self, name: &str) -> Option<&'a String> {
    self.values.keys().find(|k| same_name(k, name))
  }

  fn find(&self, path: &str) -> Option<&Node> {
    segments(path).try_fold(self, |node, segment| {
      let key = node.stored_key(segment)?;
      node.subkeys.get(key)
    })
  }

  fn find_mut(&mut self, path: &str) -> Option<&mut Node> {
    let mut node = self;
    for segment in segments(path) {
      let key = node.stored_key(segment)?.clone();
      node = node.subkeys.get_mut(&key)?;
    }
    Some(node)
  }

  fn ensure(&mut self, path: &str) -> &mut Node {
    let mut node = self;
    for segment in segments(path) {
      let key = node.stored_key(segment).cloned().unwrap_or_else(|| segment.to_string());
      node = node.subkeys.entry(key).or_default();
    }
    node
  }

  fn value(&self, name: &str) -> Option<&String> {
    self.stored_value_name(name).and_then(|k| self.values.get(k))
  }

  fn set_value(&mut self, name: &str, data: &str) {
    let key = self.stored_value_name(name).cloned().unwrap_or_else(|| name.to_string());
    self.values.insert(key, data.to_string());
  }

  fn remove_value(&mut self, name: &str) -> bool {
    match self.stored_value_name(name).cloned() {
      Some(key) => self.values.remove(&key).is_some(),
      None => false,
    }
  }
}

/// Both hives of an emulated registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Hives {
  #[serde(rename = "HKEY_LOCAL_MACHINE", default)]
  local_machine: Node,
  #[serde(rename = "HKEY_CURRENT_USER", default)]
  current_user: Node,
}

impl Hives {
  fn root(&self, hive: Hive) -> &Node {
    match hive {
      Hive::LocalMachine => &self.local_machine,
      Hive::CurrentUser => &self.current_user,
    }
  }

  fn root_mut(&mut self, hive: Hive) -> &mut Node {
    match hive {
      Hive::LocalMachine => &mut self.local_machine,
      Hive::CurrentUser => &mut self.current_user,
    }
  }

  pub fn subkeys(&self, hive: Hive, path: &str) -> Option<Vec<String>> {
    self.root(hive).find(path).map(|node| node.subkeys.keys().cloned().collect())
  }

  pub fn read_value(&self, hive: Hive, path: &str, name: Option<&str>) -> Option<String> {
    self.root(hive).find(path)?.value(name.unwrap_or_default()).cloned()
  }

  pub fn key_exists(&self, hive: Hive, path: &str) -> bool {
    self.root(hive).find(path).is_some()
  }

  pub fn create_key(&mut self, hive: Hive, path: &str) {
    self.root_mut(hive).ensure(path);
  }

  pub fn write_value(&mut self, hive: Hive, path: &str, name: Option<&str>, data: &str) -> Result<(), RegistryError> {
    let node = self
      .root_mut(hive)
      .find_mut(path)
      .ok_or_else(|| RegistryError::os(ERROR_FILE_NOT_FOUND, format!("key {}\\{} does not exist", hive, path)))?;
    node.set_value(name.unwrap_or_default(), data);
    Ok(())
  }

  pub fn delete_value(&mut self, hive: Hive, path: &str, name: Option<&str>) -> bool {
    self
      .root_mut(hive)
      .find_mut(path)
      .is_some_and(|node| node.remove_value(name.unwrap_or_default()))
  }

  pub fn delete_key(&mut self, hive: Hive, path: &str) -> Result<bool, RegistryError> {
    let (parent_path, leaf) = split_leaf(path);
    if leaf.is_empty() {
      return Err(RegistryError::os(
        ERROR_ACCESS_DENIED,
        format!("cannot delete the root of {}", hive),
      ));
    }

    let Some(parent) = self.root_mut(hive).find_mut(parent_path) else {
      return Ok(false);
    };
    let Some(key) = parent.stored_key(leaf).cloned() else {
      return Ok(false);
    };

    if parent.subkeys.get(&key).is_some_and(|node| !node.subkeys.is_empty()) {
      return Err(RegistryError::os(
        ERROR_ACCESS_DENIED,
        format!("key {}\\{} has subkeys", hive, path),
      ));
    }

    parent.subkeys.remove(&key);
    Ok(true)
  }
}
