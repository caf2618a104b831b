//! TOML-backed host list persistence.
//!
//! The host list lives in a single file, by default `hosts.toml` in the
//! per-user data directory (see [`paths`](super::paths)).
//!
//! File layout:
//!
//! ```toml
//! version = "1"
//!
//! [[hosts]]
//! name = "nas"
//! mac = "1c:69:7a:65:2d:98"
//! target = "192.168.4.255:9"
//! ```
//!
//! Every field is a plain string, so the MAC and target come back exactly as
//! they were entered.  Array-of-tables order is preserved, which keeps the
//! insertion order of the list.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use wol_core::HostRecord;

use crate::application::manage_hosts::{HostStore, StorageError};
use crate::infrastructure::storage::paths::{app_dir, AppDir};

/// Name of the host list file inside the data directory.
pub const HOSTS_FILE_NAME: &str = "hosts.toml";

const FORMAT_VERSION: &str = "1";

/// On-disk shape of the host list file.
#[derive(Debug, Serialize, Deserialize)]
struct HostFile {
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    hosts: Vec<HostRecord>,
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

/// Host store backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FileHostStore {
    path: PathBuf,
}

impl FileHostStore {
    /// Uses the file at `path`.  Nothing is read or created until the first
    /// `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `hosts.toml` in the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoPlatformDataDir`] when the directory cannot be
    /// determined from the environment.
    pub fn at_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(default_hosts_path()?))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| HOSTS_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HostStore for FileHostStore {
    fn load(&self) -> Result<Vec<HostRecord>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no host file at {}; starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file: HostFile = toml::from_str(&content).map_err(|e| StorageError::Deserialize {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if file.version != FORMAT_VERSION {
            return Err(StorageError::Deserialize {
                path: self.path.clone(),
                reason: format!("unsupported format version {:?}", file.version),
            });
        }
        Ok(file.hosts)
    }

    fn save(&mut self, records: &[HostRecord]) -> Result<(), StorageError> {
        let file = HostFile {
            version: default_version(),
            hosts: records.to_vec(),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| StorageError::Serialize(e.to_string()))?;

        // Ensure directory exists before writing.
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.temp_path();
        std::fs::write(&tmp, content).map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = std::fs::rename(&tmp, &self.path) {
            std::fs::remove_file(&tmp).ok();
            return Err(StorageError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!("saved {} host(s) to {}", records.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Returns `hosts.toml` inside the per-user `wol` data directory.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformDataDir`] if the environment does not
/// locate one.
pub fn default_hosts_path() -> Result<PathBuf, StorageError> {
    app_dir(AppDir::Data)
        .map(|dir| dir.join(HOSTS_FILE_NAME))
        .ok_or(StorageError::NoPlatformDataDir)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Scratch directory removed on drop.
    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("wol_hosts_test_{}", Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn file(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.0).ok();
        }
    }

    fn sample() -> Vec<HostRecord> {
        vec![
            HostRecord::new("nas", "1C:69:7a:65:2D:98", "192.168.4.255:9"),
            HostRecord::new("desktop", "aabbccddeeff", "desktop.lan:7"),
        ]
    }

    #[test]
    fn test_load_missing_file_returns_empty_list() {
        let dir = TempDir::new();
        let store = FileHostStore::new(dir.file("hosts.toml"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_empty_file_returns_empty_list() {
        let dir = TempDir::new();
        std::fs::write(dir.file("hosts.toml"), "\n  \n").unwrap();
        let store = FileHostStore::new(dir.file("hosts.toml"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips_verbatim() {
        // Arrange
        let dir = TempDir::new();
        let mut store = FileHostStore::new(dir.file("hosts.toml"));

        // Act
        store.save(&sample()).expect("save");
        let loaded = store.load().expect("load");

        // Assert
        assert_eq!(loaded, sample());
        assert_eq!(loaded[0].mac, "1C:69:7a:65:2D:98");
    }

    #[test]
    fn test_resaving_loaded_list_leaves_bytes_unchanged() {
        let dir = TempDir::new();
        let path = dir.file("hosts.toml");
        let mut store = FileHostStore::new(&path);
        store.save(&sample()).unwrap();
        let before = std::fs::read(&path).unwrap();

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_save_creates_missing_parent_directories() {
        let dir = TempDir::new();
        let path = dir.0.join("nested").join("deeper").join("hosts.toml");
        let mut store = FileHostStore::new(&path);

        store.save(&sample()).expect("save");

        assert!(path.exists());
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let dir = TempDir::new();
        let mut store = FileHostStore::new(dir.file("hosts.toml"));
        store.save(&sample()).unwrap();
        assert!(!dir.file("hosts.toml.tmp").exists());
    }

    #[test]
    fn test_save_empty_list_then_load_is_empty() {
        let dir = TempDir::new();
        let mut store = FileHostStore::new(dir.file("hosts.toml"));
        store.save(&sample()).unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_returns_deserialize_error() {
        let dir = TempDir::new();
        std::fs::write(dir.file("hosts.toml"), "[[[ not valid toml").unwrap();
        let store = FileHostStore::new(dir.file("hosts.toml"));

        let result = store.load();

        assert!(matches!(result, Err(StorageError::Deserialize { .. })));
    }

    #[test]
    fn test_load_record_missing_field_returns_deserialize_error() {
        let dir = TempDir::new();
        std::fs::write(
            dir.file("hosts.toml"),
            "version = \"1\"\n[[hosts]]\nname = \"nas\"\nmac = \"1c697a652d98\"\n",
        )
        .unwrap();
        let store = FileHostStore::new(dir.file("hosts.toml"));

        assert!(matches!(store.load(), Err(StorageError::Deserialize { .. })));
    }

    #[test]
    fn test_load_unknown_version_returns_deserialize_error() {
        let dir = TempDir::new();
        std::fs::write(dir.file("hosts.toml"), "version = \"99\"\n").unwrap();
        let store = FileHostStore::new(dir.file("hosts.toml"));

        let err = store.load().unwrap_err();

        assert!(err.to_string().contains("unsupported format version"), "got: {err}");
    }

    #[test]
    fn test_load_directory_path_returns_read_error() {
        let dir = TempDir::new();
        let store = FileHostStore::new(&dir.0);
        assert!(matches!(store.load(), Err(StorageError::Read { .. })));
    }

    #[test]
    fn test_save_into_file_as_directory_returns_write_error() {
        // Arrange: make the parent "directory" a regular file
        let dir = TempDir::new();
        let blocker = dir.file("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let mut store = FileHostStore::new(blocker.join("hosts.toml"));

        // Act
        let result = store.save(&sample());

        // Assert
        assert!(matches!(result, Err(StorageError::Write { .. })));
    }

    #[test]
    fn test_temp_path_is_sibling_of_target() {
        let store = FileHostStore::new("/data/wol/hosts.toml");
        assert_eq!(store.temp_path(), PathBuf::from("/data/wol/hosts.toml.tmp"));
    }

    #[test]
    fn test_default_hosts_path_ends_with_hosts_toml() {
        // A stripped environment without HOME is also acceptable.
        if let Ok(path) = default_hosts_path() {
            assert!(path.ends_with("wol/hosts.toml"), "got {path:?}");
        }
    }
}
