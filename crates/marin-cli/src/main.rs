//! Marin CLI - a shell stand-in for the widget host.
//!
//! Reads snapshots from the host's preference file and drives the widget
//! pipeline the way the platform and the host application would: explicit
//! refreshes, method calls, and broadcasts. Widgets are rendered to the
//! terminal.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use marin_config::{Config, ConfigResult, ResolvedConfig};
use marin_core::WidgetKind;
use marin_telemetry::{LogConfig, LogFormat, setup_default_logging, setup_logging};

mod commands;
mod pipeline;
mod terminal;
mod theme;

use commands::{broadcast, call, config, preview, refresh};

/// Marin - home-screen widgets for roll-period monitoring
#[derive(Parser)]
#[command(name = "marin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where snapshots are read from and which widgets are placed.
#[derive(clap::Args)]
struct HostArgs {
    /// Host preference file (defaults to `store.prefs_path`)
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Placed widget instance ids, comma separated
    #[arg(long, value_delimiter = ',')]
    instances: Vec<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh every placed widget of one kind
    Refresh {
        /// Widget kind: vessel or alert-history
        kind: WidgetKind,

        #[command(flatten)]
        host: HostArgs,
    },

    /// Deliver a method call from the host application
    Call {
        /// Channel name
        channel: String,

        /// Method name
        method: String,

        #[command(flatten)]
        host: HostArgs,
    },

    /// Deliver a platform broadcast
    Broadcast {
        /// Broadcast action id
        action: String,

        /// Widget kind the broadcast is addressed to
        #[arg(long)]
        target: Option<WidgetKind>,

        #[command(flatten)]
        host: HostArgs,
    },

    /// Show what a widget would display, without rendering
    Preview {
        /// Widget kind: vessel or alert-history
        kind: WidgetKind,

        /// Host preference file (defaults to `store.prefs_path`)
        #[arg(long)]
        prefs: Option<PathBuf>,

        /// Print the slots as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and check configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show {
        /// Also list which layer set each field
        #[arg(long)]
        sources: bool,
    },
    /// Validate the configuration
    Validate,
    /// Show the config file locations
    Paths,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(cli.config.as_deref());
    init_logging(&loaded, cli.verbose);

    match cli.command {
        Commands::Refresh { kind, host } => {
            let config = require_config(&loaded)?;
            refresh::run_refresh(config, kind, host.prefs.as_deref(), &host.instances)?;
        },
        Commands::Call {
            channel,
            method,
            host,
        } => {
            let config = require_config(&loaded)?;
            call::run_call(
                config,
                &channel,
                &method,
                host.prefs.as_deref(),
                &host.instances,
            )?;
        },
        Commands::Broadcast {
            action,
            target,
            host,
        } => {
            let config = require_config(&loaded)?;
            broadcast::run_broadcast(
                config,
                &action,
                target,
                host.prefs.as_deref(),
                &host.instances,
            )?;
        },
        Commands::Preview { kind, prefs, json } => {
            let config = require_config(&loaded)?;
            preview::run_preview(config, kind, prefs.as_deref(), json)?;
        },
        Commands::Config { command } => {
            handle_config(command, loaded)?;
        },
    }

    Ok(())
}

fn require_config(loaded: &ConfigResult<ResolvedConfig>) -> Result<&Config> {
    loaded
        .as_ref()
        .map(|resolved| &resolved.config)
        .map_err(|e| anyhow!("failed to load configuration: {e}"))
}

/// Set up logging from config, with `--verbose` raising the level.
///
/// Without a usable `[logging]` section, warnings go to stderr.
fn init_logging(loaded: &ConfigResult<ResolvedConfig>, verbose: bool) {
    let configured = loaded
        .as_ref()
        .ok()
        .and_then(|resolved| LogConfig::try_from(&resolved.config.logging).ok());

    let result = match configured {
        Some(log_config) if verbose => setup_logging(&log_config.with_level("debug")),
        Some(log_config) => setup_logging(&log_config),
        None if verbose => setup_logging(&LogConfig::new("debug").with_format(LogFormat::Compact)),
        None => setup_default_logging(),
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn handle_config(
    command: Option<ConfigCommands>,
    loaded: ConfigResult<ResolvedConfig>,
) -> Result<()> {
    match command.unwrap_or(ConfigCommands::Show { sources: false }) {
        ConfigCommands::Show { sources } => {
            let resolved = loaded.context("failed to load configuration")?;
            config::show_config(&resolved, sources)
        },
        ConfigCommands::Validate => config::validate_config(loaded),
        ConfigCommands::Paths => config::show_paths(),
    }
}
