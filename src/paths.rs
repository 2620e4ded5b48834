//! Path resolution for taskapi data files.
//!
//! Provides XDG-compliant default locations for the database.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "taskapi";

/// Get XDG-compliant data directory for taskapi.
///
/// Uses `$XDG_DATA_HOME/taskapi`, falling back to `~/.local/share/taskapi`,
/// and to `./taskapi` when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|_| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/taskapi.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("taskapi.db")
}
