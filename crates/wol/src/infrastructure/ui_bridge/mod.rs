//! Command bridge: exposes the caller-facing host operations to a front end.
//!
//! The CLI in `main.rs` is the only consumer today, but nothing here knows
//! about the terminal: every command takes the shared [`AppState`], returns a
//! [`CommandResult`], and leaves rendering to the caller.  A GUI could call the
//! same functions and show `error` in a status label.
//!
//! # Operations
//!
//! | Command         | Effect                                              |
//! |-----------------|-----------------------------------------------------|
//! | [`list_hosts`]  | Hosts in insertion order                            |
//! | [`add_host`]    | Validate, append, persist                           |
//! | [`remove_host`] | Remove first match, persist                         |
//! | [`wake_host`]   | Send the magic packet for a stored host             |
//! | [`send_packet`] | Send a magic packet for an ad-hoc MAC and target    |
//!
//! # `CommandResult<T>` wrapper
//!
//! Every command returns `{ success, data, error }` so a front end can always
//! read `success` first.  The struct is serde-serializable; the CLI prints it
//! as JSON when `--json` is given.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use wol_core::HostRecord;

use crate::application::{
    manage_hosts::{validate_new_host, HostError, HostRepository, StorageError},
    wake_host::{self as wake, PacketSender, WakeOutcome},
};
use crate::infrastructure::{
    network::waker::UdpWaker,
    storage::{
        config::{AppConfig, ConfigError, StorageMode},
        hosts::{default_hosts_path, FileHostStore},
        memory::MemoryHostStore,
    },
};

/// Error type for building the [`AppState`].
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ── Shared application state ──────────────────────────────────────────────────

/// State shared by every command: configuration, the host repository, and
/// the packet sender.
///
/// Commands run one at a time on the caller's thread, so the state is passed
/// by plain reference; mutating commands take `&mut AppState`.
pub struct AppState {
    pub config: AppConfig,
    repository: HostRepository,
    sender: Box<dyn PacketSender>,
}

impl AppState {
    /// Assembles state from already-built parts.
    pub fn new(
        config: AppConfig,
        repository: HostRepository,
        sender: Box<dyn PacketSender>,
    ) -> Self {
        Self {
            config,
            repository,
            sender,
        }
    }

    /// Builds state from `config`, opening the configured host store.
    ///
    /// `hosts_file` overrides `storage.hosts_file` from the config.  In
    /// `memory` mode the repository is seeded from `seed_hosts`, no file is
    /// touched, and a `hosts_file` override is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if `bind_address` is invalid or the default
    /// host file location cannot be determined.  Unreadable host data is not
    /// an error; the repository starts empty.
    pub fn from_config(
        config: AppConfig,
        hosts_file: Option<PathBuf>,
    ) -> Result<Self, StartupError> {
        let sender = UdpWaker::new(config.bind_addr()?);

        let repository = match config.storage.mode {
            StorageMode::Memory => {
                if let Some(path) = &hosts_file {
                    warn!(
                        "storage mode is memory; ignoring host file {}",
                        path.display()
                    );
                }
                debug!("using {} fixed seed host(s)", config.seed_hosts.len());
                HostRepository::open(MemoryHostStore::seeded(config.seed_hosts.clone()))
            }
            StorageMode::File => {
                let path = match hosts_file.or_else(|| config.storage.hosts_file.clone()) {
                    Some(path) => path,
                    None => default_hosts_path()?,
                };
                HostRepository::open(FileHostStore::new(path))
            }
        };

        Ok(Self::new(config, repository, Box::new(sender)))
    }

    /// Read access to the host repository.
    pub fn repository(&self) -> &HostRepository {
        &self.repository
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// DTO representing one stored host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDto {
    pub name: String,
    pub mac: String,
    pub target: String,
}

impl From<&HostRecord> for HostDto {
    fn from(r: &HostRecord) -> Self {
        Self {
            name: r.name.clone(),
            mac: r.mac.clone(),
            target: r.target.clone(),
        }
    }
}

/// DTO describing a completed local send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub mac: String,
    pub destination: String,
    pub status: String,
}

impl From<&WakeOutcome> for WakeDto {
    fn from(o: &WakeOutcome) -> Self {
        Self {
            host: o.host.clone(),
            mac: o.mac.clone(),
            destination: o.destination.to_string(),
            status: o.status_message(),
        }
    }
}

/// Unified response wrapper returned by every command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns every stored host in insertion order.
pub fn list_hosts(state: &AppState) -> CommandResult<Vec<HostDto>> {
    let dtos: Vec<HostDto> = state.repository.hosts().iter().map(HostDto::from).collect();
    CommandResult::ok(dtos)
}

/// Validates and appends a new host, then persists the list.
///
/// `target` falls back to `default_target` from the config.  Duplicate names
/// are accepted.
pub fn add_host(
    state: &mut AppState,
    name: &str,
    mac: &str,
    target: Option<&str>,
) -> CommandResult<HostDto> {
    let target = target
        .unwrap_or(state.config.default_target.as_str())
        .to_string();
    let record = match validate_new_host(name, mac, &target) {
        Ok(record) => record,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    let dto = HostDto::from(&record);
    match state.repository.add(record) {
        Ok(()) => CommandResult::ok(dto),
        Err(e) => CommandResult::err(format!("host added but not saved: {e}")),
    }
}

/// Removes the first host named `name`, then persists the list.
///
/// Unlike the repository, this reports an unknown name as an error, since a
/// front end is expected to remove only hosts it has listed.
pub fn remove_host(state: &mut AppState, name: &str) -> CommandResult<HostDto> {
    match state.repository.remove(name) {
        Ok(Some(removed)) => CommandResult::ok(HostDto::from(&removed)),
        Ok(None) => CommandResult::err(HostError::NotFound(name.to_string()).to_string()),
        Err(e) => CommandResult::err(format!("host removed but not saved: {e}")),
    }
}

/// Sends the magic packet for the first host named `name`.
pub fn wake_host(state: &AppState, name: &str) -> CommandResult<WakeDto> {
    match wake::wake_host(&state.repository, state.sender.as_ref(), name) {
        Ok(outcome) => CommandResult::ok(WakeDto::from(&outcome)),
        Err(e) => {
            warn!("wake {name:?} failed: {e}");
            CommandResult::err(e.to_string())
        }
    }
}

/// Sends a magic packet for `mac` without a stored host.
///
/// `target` falls back to `default_target` from the config.
pub fn send_packet(state: &AppState, mac: &str, target: Option<&str>) -> CommandResult<WakeDto> {
    let target = target.unwrap_or(state.config.default_target.as_str());
    match wake::wake_address(state.sender.as_ref(), mac, target) {
        Ok(outcome) => CommandResult::ok(WakeDto::from(&outcome)),
        Err(e) => {
            warn!("send to {target:?} failed: {e}");
            CommandResult::err(e.to_string())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::manage_hosts::HostStore;
    use crate::application::wake_host::{MockPacketSender, WakeError};
    use mockall::predicate::eq;

    /// Creates a test-isolated AppState backed by memory so that tests never
    /// read from or write to the real platform data directory.
    fn make_state(sender: MockPacketSender, seed: Vec<HostRecord>) -> (AppState, MemoryHostStore) {
        let store = MemoryHostStore::seeded(seed);
        let observer = store.clone();
        let state = AppState::new(
            AppConfig::default(),
            HostRepository::open(store),
            Box::new(sender),
        );
        (state, observer)
    }

    fn nas() -> HostRecord {
        HostRecord::new("nas", "1c:69:7a:65:2d:98", "192.168.4.255:9")
    }

    #[test]
    fn test_list_hosts_returns_dtos_in_order() {
        let seed = vec![nas(), HostRecord::new("pc", "AABBCCDDEEFF", "10.0.0.255:7")];
        let (state, _) = make_state(MockPacketSender::new(), seed);

        let result = list_hosts(&state);

        assert!(result.success);
        let names: Vec<String> = result.data.unwrap().into_iter().map(|h| h.name).collect();
        assert_eq!(names, ["nas", "pc"]);
    }

    #[test]
    fn test_add_host_persists_and_uses_default_target() {
        // Arrange
        let (mut state, observer) = make_state(MockPacketSender::new(), vec![]);

        // Act
        let result = add_host(&mut state, "nas", "1C:69:7A:65:2D:98", None);

        // Assert
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.data.unwrap().target, "255.255.255.255:9");
        assert_eq!(observer.snapshot().len(), 1);
        assert_eq!(observer.snapshot()[0].mac, "1C:69:7A:65:2D:98");
    }

    #[test]
    fn test_add_host_rejects_invalid_mac_without_saving() {
        let (mut state, observer) = make_state(MockPacketSender::new(), vec![]);

        let result = add_host(&mut state, "nas", "zz:69:7a:65:2d:98", Some("10.0.0.255:9"));

        assert!(!result.success);
        assert!(result.error.unwrap().contains("not a hex digit"));
        assert!(observer.snapshot().is_empty());
    }

    #[test]
    fn test_add_host_rejects_empty_name() {
        let (mut state, _) = make_state(MockPacketSender::new(), vec![]);
        let result = add_host(&mut state, "", "1c697a652d98", None);
        assert_eq!(result.error.as_deref(), Some("host name must not be empty"));
    }

    #[test]
    fn test_remove_host_removes_and_persists() {
        let (mut state, observer) = make_state(MockPacketSender::new(), vec![nas()]);

        let result = remove_host(&mut state, "nas");

        assert!(result.success);
        assert!(observer.snapshot().is_empty());
        assert!(list_hosts(&state).data.unwrap().is_empty());
    }

    #[test]
    fn test_remove_host_unknown_name_is_reported() {
        let (mut state, observer) = make_state(MockPacketSender::new(), vec![nas()]);

        let result = remove_host(&mut state, "printer");

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("no host named \"printer\""));
        assert_eq!(observer.snapshot(), vec![nas()]);
    }

    #[test]
    fn test_wake_host_reports_local_send_status() {
        let mut sender = MockPacketSender::new();
        sender
            .expect_send_magic_packet()
            .with(eq("1c:69:7a:65:2d:98"), eq("192.168.4.255:9"))
            .returning(|_, _| Ok("192.168.4.255:9".parse().unwrap()));
        let (state, _) = make_state(sender, vec![nas()]);

        let result = wake_host(&state, "nas");

        let dto = result.data.expect("success");
        assert_eq!(dto.status, "magic packet for nas sent to 192.168.4.255:9");
        assert_eq!(dto.destination, "192.168.4.255:9");
    }

    #[test]
    fn test_wake_host_surfaces_send_error_as_message() {
        let mut sender = MockPacketSender::new();
        sender.expect_send_magic_packet().returning(|_, _| {
            Err(WakeError::Send {
                destination: "192.168.4.255:9".parse().unwrap(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NetworkUnreachable,
                    "network unreachable",
                ),
            })
        });
        let (state, _) = make_state(sender, vec![nas()]);

        let result = wake_host(&state, "nas");

        assert!(!result.success);
        assert!(result.error.unwrap().contains("network unreachable"));
    }

    #[test]
    fn test_send_packet_falls_back_to_default_target() {
        let mut sender = MockPacketSender::new();
        sender
            .expect_send_magic_packet()
            .with(eq("aabbccddeeff"), eq("255.255.255.255:9"))
            .times(1)
            .returning(|_, _| Ok("255.255.255.255:9".parse().unwrap()));
        let (state, _) = make_state(sender, vec![]);

        let result = send_packet(&state, "aabbccddeeff", None);

        assert!(result.success);
        assert_eq!(result.data.unwrap().host, None);
    }

    #[test]
    fn test_from_config_memory_mode_uses_seed_hosts() {
        let mut config = AppConfig::default();
        config.storage.mode = StorageMode::Memory;
        config.seed_hosts = vec![nas()];

        let state = AppState::from_config(config, None).expect("startup");

        assert_eq!(state.repository().hosts(), &[nas()]);
        assert_eq!(state.repository().location(), "memory (not persisted)");
    }

    #[test]
    fn test_from_config_memory_mode_ignores_hosts_file_override() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("wol_bridge_{}", uuid::Uuid::new_v4()));
        let hosts_file = dir.join("hosts.toml");
        let mut config = AppConfig::default();
        config.storage.mode = StorageMode::Memory;

        // Act
        let mut state = AppState::from_config(config, Some(hosts_file.clone())).expect("startup");
        let added = add_host(&mut state, "nas", "1c697a652d98", None);

        // Assert
        assert!(added.success);
        assert_eq!(state.repository().location(), "memory (not persisted)");
        assert!(!hosts_file.exists());
        assert!(!dir.exists());
    }

    /// Store whose saves always fail.
    struct ReadOnlyStore;

    impl HostStore for ReadOnlyStore {
        fn load(&self) -> Result<Vec<HostRecord>, StorageError> {
            Ok(vec![nas()])
        }
        fn save(&mut self, _records: &[HostRecord]) -> Result<(), StorageError> {
            Err(StorageError::Write {
                path: PathBuf::from("/ro/hosts.toml"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
        fn describe(&self) -> String {
            "read-only".to_string()
        }
    }

    fn read_only_state() -> AppState {
        AppState::new(
            AppConfig::default(),
            HostRepository::open(ReadOnlyStore),
            Box::new(MockPacketSender::new()),
        )
    }

    #[test]
    fn test_add_host_reports_unsaved_change_and_keeps_it_listed() {
        let mut state = read_only_state();

        let result = add_host(&mut state, "pc", "AABBCCDDEEFF", Some("10.0.0.255:7"));

        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.starts_with("host added but not saved: "), "{error}");
        assert!(error.contains("read-only"), "{error}");
        assert_eq!(list_hosts(&state).data.unwrap().len(), 2);
    }

    #[test]
    fn test_remove_host_reports_unsaved_change_and_keeps_removal() {
        let mut state = read_only_state();

        let result = remove_host(&mut state, "nas");

        assert!(!result.success);
        assert!(result
            .error
            .unwrap()
            .starts_with("host removed but not saved: "));
        assert!(list_hosts(&state).data.unwrap().is_empty());
    }

    #[test]
    fn test_from_config_rejects_invalid_bind_address() {
        let mut config = AppConfig::default();
        config.bind_address = "nowhere".to_string();

        let result = AppState::from_config(config, None);

        assert!(matches!(result, Err(StartupError::Config(_))));
    }

    #[test]
    fn test_command_result_serializes_to_json_shape() {
        let ok = serde_json::to_value(CommandResult::ok(vec![HostDto::from(&nas())])).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"][0]["mac"], "1c:69:7a:65:2d:98");
        assert!(ok["error"].is_null());

        let err = serde_json::to_value(CommandResult::<()>::err("boom")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "boom");
    }
}
