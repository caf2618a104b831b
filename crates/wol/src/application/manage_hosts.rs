//! ManageHostsUseCase: the host repository and its persistence port.
//!
//! The [`HostRepository`] is the single owner of the in-memory host list.
//! Callers read it through [`HostRepository::hosts`] and change it only
//! through [`HostRepository::add`] and [`HostRepository::remove`], each of
//! which rewrites the whole list to the backing [`HostStore`] before
//! returning.
//!
//! # Lifecycle
//!
//! ```text
//! open(store) ──► load() ──► hosts in memory
//!                               │
//!            add / remove ──────┤──► save(all hosts)
//! ```
//!
//! A failed `load` at startup is not fatal: the repository starts empty and
//! the failure is logged.  A failed `save` keeps the in-memory change and
//! returns the error so the caller can tell the user the list is not durable.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};
use wol_core::domain::host::{add_host, find_host, remove_host};
use wol_core::{HostRecord, MacAddress, MacError};

use crate::application::wake_host::WakeError;

/// Error type for host-list persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform data directory could not be determined.
    #[error("could not determine platform data directory")]
    NoPlatformDataDir,

    /// The stored host list exists but could not be read.
    #[error("failed to read host list at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored host list is corrupt or in an incompatible format.
    #[error("host list at {path} is corrupt: {reason}")]
    Deserialize { path: PathBuf, reason: String },

    /// The in-memory host list could not be encoded.
    #[error("failed to serialize host list: {0}")]
    Serialize(String),

    /// The host list could not be written to its storage location.
    #[error("failed to write host list to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type returned by the caller-facing host operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// A host must have a non-blank display name.
    #[error("host name must not be empty")]
    EmptyName,

    /// The MAC address entered for a new host is malformed.
    #[error(transparent)]
    InvalidMacFormat(#[from] MacError),

    /// No stored host has the requested name.
    #[error("no host named {0:?}")]
    NotFound(String),

    /// Building or sending the magic packet failed.
    #[error(transparent)]
    Wake(#[from] WakeError),
}

/// Durable storage for the ordered host list.
///
/// The production implementation is a TOML file; the fixed-device variant
/// keeps the list in memory only.
pub trait HostStore {
    /// Returns the stored list, or an empty list if nothing was stored yet.
    fn load(&self) -> Result<Vec<HostRecord>, StorageError>;

    /// Replaces the stored list with `records`.
    fn save(&mut self, records: &[HostRecord]) -> Result<(), StorageError>;

    /// Human-readable description of where the list lives (for logs).
    fn describe(&self) -> String;
}

/// Validates user input for a new host and builds the record.
///
/// The MAC is checked but stored exactly as entered.  The target is not
/// resolved here; it is resolved when the host is woken.
///
/// # Errors
///
/// Returns [`HostError::EmptyName`] for a blank name and
/// [`HostError::InvalidMacFormat`] for a malformed MAC.
pub fn validate_new_host(name: &str, mac: &str, target: &str) -> Result<HostRecord, HostError> {
    if name.trim().is_empty() {
        return Err(HostError::EmptyName);
    }
    MacAddress::parse(mac)?;
    Ok(HostRecord::new(name, mac, target))
}

/// Single owner of the host list; persists after every mutation.
pub struct HostRepository {
    store: Box<dyn HostStore>,
    hosts: Vec<HostRecord>,
}

impl HostRepository {
    /// Loads the host list from `store`, falling back to an empty list if the
    /// stored data cannot be read.
    pub fn open(store: impl HostStore + 'static) -> Self {
        let hosts = match store.load() {
            Ok(hosts) => {
                info!("loaded {} host(s) from {}", hosts.len(), store.describe());
                hosts
            }
            Err(e) => {
                warn!("starting with an empty host list: {e}");
                Vec::new()
            }
        };
        Self {
            store: Box::new(store),
            hosts,
        }
    }

    /// Loads the host list from `store`, failing on unreadable data.
    ///
    /// # Errors
    ///
    /// Propagates the [`StorageError`] from [`HostStore::load`].
    pub fn try_open(store: impl HostStore + 'static) -> Result<Self, StorageError> {
        let hosts = store.load()?;
        Ok(Self {
            store: Box::new(store),
            hosts,
        })
    }

    /// Returns the hosts in insertion order.
    pub fn hosts(&self) -> &[HostRecord] {
        &self.hosts
    }

    /// Returns the first host named `name`.
    pub fn find(&self, name: &str) -> Option<&HostRecord> {
        find_host(&self.hosts, name)
    }

    /// Appends `record` and persists the full list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; the record stays in
    /// memory regardless.
    pub fn add(&mut self, record: HostRecord) -> Result<(), StorageError> {
        debug!("adding host {:?}", record.name);
        add_host(&mut self.hosts, record);
        self.persist()
    }

    /// Removes the first host named `name` and persists the full list.
    ///
    /// Returns `Ok(None)` without touching storage when no host matches.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; the removal stays in
    /// effect in memory regardless.
    pub fn remove(&mut self, name: &str) -> Result<Option<HostRecord>, StorageError> {
        let Some(removed) = remove_host(&mut self.hosts, name) else {
            debug!("remove: no host named {name:?}");
            return Ok(None);
        };
        debug!("removed host {:?}", removed.name);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Describes the backing store.
    pub fn location(&self) -> String {
        self.store.describe()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.store.save(&self.hosts).map_err(|e| {
            warn!("host list change is not durable: {e}");
            e
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
