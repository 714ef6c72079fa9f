//! XDG Base Directory paths for qelves.
//!
//! qelves keeps two things on disk: the user's `config.toml` and the export
//! bundles it writes. Both resolve the same way on every platform, the way
//! tools like gh and kubectl do.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "qelves";

/// File name of the user-level configuration
pub const CONFIG_FILE: &str = "config.toml";

/// One XDG base directory: its env variable and the home-relative fallback
struct BaseDir {
    env: &'static str,
    home_fallback: &'static str,
}

const CONFIG_HOME: BaseDir = BaseDir {
    env: "XDG_CONFIG_HOME",
    home_fallback: ".config",
};

const DATA_HOME: BaseDir = BaseDir {
    env: "XDG_DATA_HOME",
    home_fallback: ".local/share",
};

impl BaseDir {
    /// `<base>/qelves`, where an unset or empty variable falls back to home
    fn app_dir(&self) -> PathBuf {
        resolve(
            std::env::var_os(self.env),
            dirs::home_dir().as_deref(),
            self.home_fallback,
        )
    }
}

fn resolve(xdg: Option<OsString>, home: Option<&Path>, home_fallback: &str) -> PathBuf {
    let base = match (xdg.filter(|value| !value.is_empty()), home) {
        (Some(value), _) => PathBuf::from(value),
        (None, Some(home)) => home.join(home_fallback),
        (None, None) => PathBuf::from(home_fallback),
    };
    base.join(APP_DIR)
}

/// The qelves config directory, `$XDG_CONFIG_HOME/qelves` or `~/.config/qelves`.
pub fn config_dir() -> PathBuf {
    CONFIG_HOME.app_dir()
}

/// Path of the user-level config file.
///
/// ```
/// let path = qelves_paths::config_file();
/// assert!(path.ends_with("qelves/config.toml"));
/// ```
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// The qelves data directory, `$XDG_DATA_HOME/qelves` or `~/.local/share/qelves`.
pub fn data_dir() -> PathBuf {
    DATA_HOME.app_dir()
}

/// Default directory for export bundles, `<data_dir>/exports`.
///
/// Bundles hold captured request bodies, so they live with user data rather
/// than in the working directory.
pub fn exports_dir() -> PathBuf {
    data_dir().join("exports")
}
