//! Alias store over the JSON-file registry.

use tempfile::TempDir;
use winalias_lib::alias::{AliasStore, Scope};
use winalias_lib::registry::FileRegistry;

#[test]
fn aliases_survive_reopening() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("registry.json");

  {
    let store = AliasStore::new(FileRegistry::new(path.clone()));
    store.create(Scope::Machine, "code", r"C:\Program Files\Code\Code.exe").unwrap();
    store.create(Scope::User, "notes", r"C:\Users\me\notes.exe").unwrap();
  }

  let store = AliasStore::new(FileRegistry::new(path));
  let machine = store.list(Scope::Machine).unwrap();
  assert_eq!(machine.len(), 1);
  assert_eq!(machine[0].name, "code.exe");
  assert_eq!(machine[0].search_path.as_deref(), Some(r"C:\Program Files\Code"));

  let user = store.list(Scope::User).unwrap();
  assert_eq!(user[0].name, "notes.exe");
}

#[test]
fn file_layout_matches_registry_layout() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("registry.json");
  let store = AliasStore::new(FileRegistry::new(path.clone()));
  store.create(Scope::User, "tool", r"D:\t\tool.exe").unwrap();

  let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
  let key = &json["hives"]["HKEY_CURRENT_USER"]["subkeys"]["SOFTWARE"]["subkeys"]["Microsoft"]["subkeys"]["Windows"]
    ["subkeys"]["CurrentVersion"]["subkeys"]["App Paths"]["subkeys"]["tool.exe"];
  assert_eq!(key["values"][""], r"D:\t\tool.exe");
  assert_eq!(key["values"]["Path"], r"D:\t");
}

#[test]
fn update_and_delete_through_file() {
  let temp = TempDir::new().unwrap();
  let store = AliasStore::new(FileRegistry::new(temp.path().join("registry.json")));

  store.create(Scope::User, "a", r"C:\a.exe").unwrap();
  store.update(Scope::User, "a", "b", r"C:\b\b.exe").unwrap();
  assert_eq!(store.get(Scope::User, "a").unwrap(), None);
  assert_eq!(store.get(Scope::User, "b").unwrap().unwrap().target_path, r"C:\b\b.exe");

  store.delete(Scope::User, "b").unwrap();
  assert!(store.list(Scope::User).unwrap().is_empty());
}
