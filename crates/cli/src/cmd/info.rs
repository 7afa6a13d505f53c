use anyhow::Result;
use serde::Serialize;
use winalias_lib::alias::Scope;
use winalias_lib::platform;
use winalias_lib::registry::Registry;

use super::open_store;
use crate::output::{OutputFormat, print_info, print_json, print_stat};

#[derive(Debug, Serialize)]
struct InfoOutput {
  version: &'static str,
  platform: String,
  elevated: bool,
  backend: String,
  roots: Vec<RootInfo>,
}

#[derive(Debug, Serialize)]
struct RootInfo {
  scope: Scope,
  key: String,
}

pub fn cmd_info(output: OutputFormat) -> Result<()> {
  let store = open_store();

  let info = InfoOutput {
    version: env!("CARGO_PKG_VERSION"),
    platform: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
    elevated: platform::is_elevated(),
    backend: store.registry().describe(),
    roots: Scope::ALL
      .iter()
      .map(|scope| RootInfo {
        scope: *scope,
        key: scope.display_root(),
      })
      .collect(),
  };

  if output.is_json() {
    return print_json(&info);
  }

  print_info(&format!("winalias v{}", info.version));
  print_stat("Platform", &info.platform);
  print_stat("Elevated", if info.elevated { "yes" } else { "no" });
  print_stat("Backend", &info.backend);
  for root in &info.roots {
    print_stat(root.scope.as_str(), &root.key);
  }

  Ok(())
}
