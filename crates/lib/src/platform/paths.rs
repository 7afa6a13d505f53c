use crate::consts::APP_NAME;
use std::path::PathBuf;

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  std::env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> PathBuf {
  let appdata = std::env::var("APPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(|_| PathBuf::from("."));
  appdata.join(APP_NAME)
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> PathBuf {
  let data_home = std::env::var("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}
