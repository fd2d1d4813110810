use std::path::PathBuf;

/// Location of the per-user TCC database, relative to the home directory.
pub const USER_TCC_DB: &str = "Library/Application Support/com.apple.TCC/TCC.db";

/// Get the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Get the user's config directory.
pub fn config_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        home_dir().map(|h| h.join(".config"))
    }
}

/// The invoking user's TCC database.
pub fn default_store_path() -> PathBuf {
    match home_dir() {
        Some(home) => home.join(USER_TCC_DB),
        None => {
            log::warn!("HOME not set; looking for the TCC database relative to the working directory");
            PathBuf::from(USER_TCC_DB)
        }
    }
}
