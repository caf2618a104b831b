//! Per-user directories for the config file and the host list.
//!
//! | Platform      | [`AppDir::Config`]                    | [`AppDir::Data`]                        |
//! |---------------|---------------------------------------|-----------------------------------------|
//! | Linux / BSD   | `$XDG_CONFIG_HOME/wol`, `~/.config/wol` | `$XDG_DATA_HOME/wol`, `~/.local/share/wol` |
//! | macOS         | `~/Library/Application Support/wol`   | same                                    |
//! | Windows       | `%APPDATA%\wol`                       | same                                    |
//!
//! An empty `XDG_*` variable counts as unset.

use std::ffi::OsString;
use std::path::PathBuf;

/// Subdirectory created under the platform base directory.
pub const APP_DIR_NAME: &str = "wol";

/// Which kind of per-user directory to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// Where `config.toml` lives.
    Config,
    /// Where `hosts.toml` lives.
    Data,
}

/// Resolves the `wol` directory of `kind` from the process environment.
///
/// Returns `None` when the variables the platform relies on are unset.
pub fn app_dir(kind: AppDir) -> Option<PathBuf> {
    app_dir_with(kind, |key| std::env::var_os(key))
}

fn app_dir_with(kind: AppDir, var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    base_dir(kind, &var).map(|base| base.join(APP_DIR_NAME))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn base_dir(kind: AppDir, var: &impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    let (xdg_var, home_fallback) = match kind {
        AppDir::Config => ("XDG_CONFIG_HOME", ".config"),
        AppDir::Data => ("XDG_DATA_HOME", ".local/share"),
    };
    var(xdg_var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(home_fallback)))
}

#[cfg(target_os = "macos")]
fn base_dir(_kind: AppDir, var: &impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    var("HOME").map(|home| {
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
    })
}

#[cfg(windows)]
fn base_dir(_kind: AppDir, var: &impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    var("APPDATA").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn base_dir(_kind: AppDir, _var: &impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
