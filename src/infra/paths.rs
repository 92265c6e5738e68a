// src/infra/paths.rs — Config location
//
// CHICLENS_HOME overrides everything. Otherwise config lives in ~/.chiclens/.

use std::path::PathBuf;

/// Returns the CHICLENS_HOME override, if set.
fn chiclens_home() -> Option<PathBuf> {
    std::env::var_os("CHICLENS_HOME").map(PathBuf::from)
}

/// Home directory, or the current directory when it can't be determined.
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $CHICLENS_HOME/ or ~/.chiclens/
pub fn config_dir() -> PathBuf {
    if let Some(home) = chiclens_home() {
        return home;
    }
    dirs_home().join(".chiclens")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
