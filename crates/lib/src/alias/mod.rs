//! App Paths aliases.
//!
//! An alias is a leaf key under `SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths`
//! in either the machine or the current-user hive:
//!
//! ```text
//! <hive>\SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths\<name>.exe
//!     (Default)  REG_SZ  = <path to executable>
//!     Path       REG_SZ  = <directory of that path>
//! ```

mod scope;
mod store;
mod types;

pub use scope::{ParseScopeError, Scope};
pub use store::{AliasStore, ScopeListing};
pub use types::{AliasEntry, AliasError, normalize_name, search_directory, validate_target};
