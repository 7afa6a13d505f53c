//! Alias store behaviour against the in-memory registry.

use winalias_lib::alias::{AliasError, AliasStore, Scope};
use winalias_lib::registry::{ERROR_ACCESS_DENIED, Hive, MemoryRegistry, Registry, RegistryOp};

fn store() -> AliasStore<MemoryRegistry> {
  AliasStore::new(MemoryRegistry::new())
}

#[test]
fn created_alias_is_listed_for_every_scope() {
  for scope in Scope::ALL {
    let store = store();
    store.create(scope, "cmdtool", r"C:\bin\cmdtool.exe").unwrap();

    let entries = store.list(scope).unwrap();
    assert!(
      entries
        .iter()
        .any(|e| e.name == "cmdtool.exe" && e.target_path == r"C:\bin\cmdtool.exe"),
      "{scope} scope should list the new alias"
    );
  }
}

#[test]
fn myapp_example() {
  let store = store();
  store.create(Scope::User, "myapp", r"C:\Tools\app.exe").unwrap();

  let entries = store.list(Scope::User).unwrap();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].name, "myapp.exe");
  assert_eq!(entries[0].target_path, r"C:\Tools\app.exe");
  assert_eq!(entries[0].search_path.as_deref(), Some(r"C:\Tools"));
}

#[test]
fn suffixed_and_bare_names_share_a_key() {
  let store = store();
  store.create(Scope::Machine, "tool", r"C:\a\tool.exe").unwrap();
  store.create(Scope::Machine, "tool.exe", r"C:\b\tool.exe").unwrap();

  let keys = store
    .registry()
    .subkeys(Hive::LocalMachine, Scope::Machine.root_path())
    .unwrap()
    .unwrap();
  assert_eq!(keys, vec!["tool.exe".to_string()]);
}

#[test]
fn delete_of_absent_alias_changes_nothing() {
  let store = store();
  store.create(Scope::User, "one", r"C:\one.exe").unwrap();
  store.create(Scope::User, "two", r"C:\two.exe").unwrap();
  let before = store.list(Scope::User).unwrap();

  let err = store.delete(Scope::User, "three").unwrap_err();
  assert!(matches!(err, AliasError::NotFound { .. }));
  assert_eq!(store.list(Scope::User).unwrap(), before);
}

#[test]
fn update_moves_alias() {
  let store = store();
  store.create(Scope::User, "a.exe", r"C:\a.exe").unwrap();
  store.create(Scope::User, "other", r"C:\other.exe").unwrap();

  store.update(Scope::User, "a.exe", "b.exe", r"C:\new\b.exe").unwrap();

  let entries = store.list(Scope::User).unwrap();
  assert!(!entries.iter().any(|e| e.name == "a.exe"));
  let b = entries.iter().find(|e| e.name == "b.exe").unwrap();
  assert_eq!(b.target_path, r"C:\new\b.exe");
  assert!(entries.iter().any(|e| e.name == "other.exe"));
}

#[test]
fn machine_scope_denied_user_scope_allowed() {
  let registry = MemoryRegistry::new();
  registry.fail(RegistryOp::CreateKey, Hive::LocalMachine, ERROR_ACCESS_DENIED);
  let store = AliasStore::new(&registry);

  let err = store.create(Scope::Machine, "tool", r"C:\tool.exe").unwrap_err();
  assert!(err.is_access_denied());
  assert_eq!(err.scope(), Some(Scope::Machine));

  store.create(Scope::User, "tool", r"C:\tool.exe").unwrap();
  assert!(registry.key_exists(Hive::CurrentUser, &Scope::User.key_path("tool.exe")).unwrap());
}

#[test]
fn vanished_entry_is_not_found() {
  let store = store();
  store.create(Scope::User, "tool", r"C:\tool.exe").unwrap();
  let listed = store.list(Scope::User).unwrap();

  // Another process removes it after the listing
  store
    .registry()
    .delete_key(Hive::CurrentUser, &Scope::User.key_path("tool.exe"))
    .unwrap();

  let err = store.delete(Scope::User, &listed[0].name).unwrap_err();
  assert!(matches!(err, AliasError::NotFound { .. }));
}

#[test]
fn alias_without_default_value_lists_empty_target() {
  let store = store();
  store
    .registry()
    .create_key(Hive::CurrentUser, &Scope::User.key_path("bare.exe"))
    .unwrap();

  let entries = store.list(Scope::User).unwrap();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].target_path, "");
  assert_eq!(entries[0].search_path, None);
}
