use std::env;
use std::io;
use std::path::PathBuf;

use crate::repository::DEFAULT_SORT_KEY;

pub const DB_FILE_NAME: &str = "text-clipper.db";
pub const LOG_FILE_NAME: &str = "text-clipper.log";
const APP_DIR: &str = ".text-clipper";

/// Runtime settings, all taken from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    pub sort_key: String,
    pub debug: bool,
    pub log_filter: Option<String>,
    pub clipboard_enabled: bool,
    pub use_color: bool,
}

impl Settings {
    pub fn from_env() -> io::Result<Self> {
        Ok(Self {
            db_path: db_path()?,
            sort_key: env_or("TEXT_CLIPPER_SORT", DEFAULT_SORT_KEY),
            debug: is_set("DEBUG") || is_set("TEXT_CLIPPER_DEBUG"),
            log_filter: env::var("TEXT_CLIPPER_LOG").ok().filter(|v| !v.is_empty()),
            clipboard_enabled: !is_set("TEXT_CLIPPER_NO_CLIPBOARD"),
            use_color: env::var_os("NO_COLOR").is_none(),
        })
    }

    /// Directory holding the database (and the debug log).
    pub fn data_dir(&self) -> PathBuf {
        self.db_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn db_path() -> io::Result<PathBuf> {
    if let Some(path) = env::var_os("TEXT_CLIPPER_DB_PATH").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .ok_or_else(|| io::Error::other("HOME not set; set TEXT_CLIPPER_DB_PATH explicitly"))?;
    Ok(PathBuf::from(home).join(APP_DIR).join(DB_FILE_NAME))
}

/// Value of `name`, or `default` when unset or empty.
pub fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn is_set(name: &str) -> bool {
    env::var_os(name).is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn env_or_falls_back_for_missing_vars() {
        assert_eq!(env_or("TEXT_CLIPPER_SURELY_UNSET_VAR", "fallback"), "fallback");
    }

    #[test]
    fn data_dir_is_database_parent() {
        let settings = Settings {
            db_path: PathBuf::from("/tmp/clips/text-clipper.db"),
            sort_key: DEFAULT_SORT_KEY.into(),
            debug: false,
            log_filter: None,
            clipboard_enabled: false,
            use_color: false,
        };
        assert_eq!(settings.data_dir(), Path::new("/tmp/clips"));

        let bare = Settings { db_path: PathBuf::from("clips.db"), ..settings };
        assert_eq!(bare.data_dir(), Path::new("."));
    }
}
