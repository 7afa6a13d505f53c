//! Fixed names shared across the crate.

/// Application name, used for data directories.
pub const APP_NAME: &str = "winalias";

/// Key under each hive that holds one subkey per alias.
pub const APP_PATHS_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths";

/// Named value holding the directory Windows prepends to the search path.
pub const PATH_VALUE: &str = "Path";

/// Suffix every alias name carries.
pub const ALIAS_SUFFIX: &str = ".exe";

/// Environment variable selecting the file-backed registry.
pub const REGISTRY_FILE_ENV: &str = "WINALIAS_REGISTRY_FILE";

/// File name of the emulated registry inside the data directory.
pub const REGISTRY_FILE_NAME: &str = "registry.json";
