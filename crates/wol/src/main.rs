//! `wol`: Wake-on-LAN host manager, command-line entry point.
//!
//! Loads the configuration, opens the host repository, runs one command
//! through the [`ui_bridge`](wol_cli::infrastructure::ui_bridge), and prints
//! the result.
//!
//! # Usage
//!
//! ```text
//! wol [OPTIONS] <COMMAND>
//!
//! Commands:
//!   list                      List stored hosts
//!   add <NAME> <MAC> [TARGET] Store a host
//!   remove <NAME>             Remove the first host with this name
//!   wake <NAME>               Send the magic packet for a stored host
//!   send <MAC> [TARGET]       Send a magic packet without storing a host
//!   config path|init          Show or create the config file
//!
//! Options:
//!   --config <PATH>      Config file [env: WOL_CONFIG]
//!   --hosts-file <PATH>  Host list file [env: WOL_HOSTS_FILE]
//!   --json               Print results as JSON
//! ```
//!
//! Logs go to stderr; the level comes from `log_level` in the config and is
//! overridden by `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wol_cli::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, AppConfig,
};
use wol_cli::infrastructure::ui_bridge::{self, AppState, CommandResult};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Store network hosts and wake them with Wake-on-LAN magic packets.
#[derive(Debug, Parser)]
#[command(name = "wol", version)]
struct Cli {
    /// Path to the config file (defaults to the platform config directory).
    #[arg(long, global = true, env = "WOL_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the host list file; overrides `storage.hosts_file`.
    #[arg(long, global = true, env = "WOL_HOSTS_FILE")]
    hosts_file: Option<PathBuf>,

    /// Print each result as a JSON `{ success, data, error }` object.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Host(HostCommand),

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that operate on the host list and need a loaded config.
#[derive(Debug, Subcommand)]
enum HostCommand {
    /// List stored hosts in the order they were added
    List,

    /// Store a host
    Add {
        /// Display name
        name: String,
        /// MAC address, e.g. 1c:69:7a:65:2d:98
        mac: String,
        /// UDP endpoint, e.g. 192.168.4.255:9 (defaults to `default_target`)
        target: Option<String>,
    },

    /// Remove the first host with this name
    Remove {
        name: String,
    },

    /// Send the magic packet for a stored host
    Wake {
        name: String,
    },

    /// Send a magic packet to a MAC address without storing it
    Send {
        /// MAC address, e.g. 1c:69:7a:65:2d:98
        mac: String,
        /// UDP endpoint (defaults to `default_target`)
        target: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config_file_path().context("locating config file")?,
    };

    match cli.command {
        // Handled without loading, so `config init --force` can replace a broken file.
        Command::Config { action } => {
            init_logging("info");
            run_config(&action, &config_path)
        }
        Command::Host(command) => run_host_command(command, &config_path, cli.hosts_file, cli.json),
    }
}

fn run_host_command(
    command: HostCommand,
    config_path: &Path,
    hosts_file: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let config = load_config_from(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    init_logging(&config.log_level);
    debug!("config loaded from {}", config_path.display());

    let mut state =
        AppState::from_config(config, hosts_file).context("initialising host repository")?;
    debug!("host list at {}", state.repository().location());

    match command {
        HostCommand::List => render(&ui_bridge::list_hosts(&state), json, |hosts| {
            if hosts.is_empty() {
                println!("No hosts stored.");
                return;
            }
            println!("{:<20} {:<18} {}", "NAME", "MAC", "TARGET");
            for host in hosts {
                println!("{:<20} {:<18} {}", host.name, host.mac, host.target);
            }
        }),
        HostCommand::Add { name, mac, target } => render(
            &ui_bridge::add_host(&mut state, &name, &mac, target.as_deref()),
            json,
            |host| println!("added {} ({}) -> {}", host.name, host.mac, host.target),
        ),
        HostCommand::Remove { name } => render(
            &ui_bridge::remove_host(&mut state, &name),
            json,
            |host| println!("removed {}", host.name),
        ),
        HostCommand::Wake { name } => render(&ui_bridge::wake_host(&state, &name), json, |w| {
            println!("{}", w.status)
        }),
        HostCommand::Send { mac, target } => render(
            &ui_bridge::send_packet(&state, &mac, target.as_deref()),
            json,
            |w| println!("{}", w.status),
        ),
    }
}

/// Initialises structured logging on stderr.  `RUST_LOG` wins over `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints `result` as JSON or via `human`, and maps failure to exit code 1.
fn render<T: Serialize>(
    result: &CommandResult<T>,
    json: bool,
    human: impl FnOnce(&T),
) -> anyhow::Result<ExitCode> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(result).context("encoding result as JSON")?
        );
    } else if let Some(data) = &result.data {
        human(data);
    } else if let Some(error) = &result.error {
        eprintln!("error: {error}");
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_config(action: &ConfigAction, path: &Path) -> anyhow::Result<ExitCode> {
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                eprintln!("config already exists at {} (use --force)", path.display());
                return Ok(ExitCode::FAILURE);
            }
            save_config_to(path, &AppConfig::default())
                .with_context(|| format!("writing config to {}", path.display()))?;
            println!("wrote default config to {}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
