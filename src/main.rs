//! isam-updates - manage available updates on an ISAM appliance.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use isam_updates::commands::settings::{get_appliance_settings, save_appliance_settings};
use isam_updates::commands::updates::{
    discover_updates, firmware_settings, install_update, list_updates, upload_update,
};
use isam_updates::updates::{OperationOptions, UpdateIdentity};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "isam-updates",
    about = "List, discover, upload and install available updates on an ISAM appliance",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Directory holding appliance_settings.json
    #[clap(long, global = true, default_value = ".")]
    settings_dir: PathBuf,

    /// Log verbosity (logs are written to stderr)
    #[clap(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Flags shared by every state-changing command.
#[derive(Args, Debug)]
struct ChangeFlags {
    /// Skip the "already done" check and always call the appliance
    #[clap(long)]
    force: bool,

    /// Report whether anything would change without changing it
    #[clap(long)]
    dry_run: bool,
}

impl From<&ChangeFlags> for OperationOptions {
    fn from(flags: &ChangeFlags) -> Self {
        OperationOptions {
            force: flags.force,
            dry_run: flags.dry_run,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List updates known to the appliance
    List,

    /// Ask the appliance to look for newly published updates
    Discover,

    /// Show firmware partitions
    Firmware,

    /// Upload an update package unless it is already present
    Upload {
        /// Package file, e.g. isam_9.0.2.0_20161102-2353.pkg
        file: PathBuf,

        #[clap(flatten)]
        flags: ChangeFlags,
    },

    /// Install an uploaded update if it is installable
    Install {
        /// Update category, e.g. firmware
        #[clap(long = "type")]
        update_type: String,

        /// Update version, e.g. 9.0.3.0
        #[clap(long = "version")]
        update_version: String,

        /// Release date as YYYY-MM-DD
        #[clap(long)]
        release_date: String,

        /// Appliance-internal update name (often the version)
        #[clap(long)]
        name: String,

        #[clap(flatten)]
        flags: ChangeFlags,
    },

    /// Show or update the saved appliance settings
    Configure {
        #[clap(long)]
        hostname: Option<String>,

        #[clap(long)]
        port: Option<u16>,

        #[clap(long)]
        username: Option<String>,

        #[clap(long)]
        password: Option<String>,

        /// Verify the appliance TLS certificate
        #[clap(long)]
        verify_tls: Option<bool>,

        /// Per-request timeout in seconds
        #[clap(long)]
        timeout_secs: Option<u64>,
    },
}

/// Initialize tracing with the CLI log level.
fn initialize_tracing(log_level: &LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries only JSON results
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let settings_dir = cli.settings_dir.as_path();

    match cli.command {
        Command::List => print_json(&list_updates(settings_dir).await.map_err(|e| anyhow!(e))?),
        Command::Discover => {
            print_json(&discover_updates(settings_dir).await.map_err(|e| anyhow!(e))?)
        }
        Command::Firmware => {
            print_json(&firmware_settings(settings_dir).await.map_err(|e| anyhow!(e))?)
        }
        Command::Upload { file, flags } => {
            let result = upload_update(settings_dir, file, OperationOptions::from(&flags))
                .await
                .map_err(|e| anyhow!(e))?;
            print_json(&result)
        }
        Command::Install {
            update_type,
            update_version,
            release_date,
            name,
            flags,
        } => {
            let identity = UpdateIdentity::new(update_type, update_version, release_date, name);
            let outcome = install_update(settings_dir, identity, OperationOptions::from(&flags))
                .await
                .map_err(|e| anyhow!(e))?;
            print_json(&outcome)
        }
        Command::Configure {
            hostname,
            port,
            username,
            password,
            verify_tls,
            timeout_secs,
        } => {
            let mut settings = get_appliance_settings(settings_dir)
                .await
                .map_err(|e| anyhow!(e))?;
            let edited = hostname.is_some()
                || port.is_some()
                || username.is_some()
                || password.is_some()
                || verify_tls.is_some()
                || timeout_secs.is_some();

            if let Some(hostname) = hostname {
                settings.hostname = hostname;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            if let Some(username) = username {
                settings.username = username;
            }
            if let Some(password) = password {
                settings.password = password;
            }
            if let Some(verify_tls) = verify_tls {
                settings.verify_tls = verify_tls;
            }
            if let Some(timeout_secs) = timeout_secs {
                settings.timeout_secs = timeout_secs;
            }

            if edited {
                save_appliance_settings(settings_dir, &settings)
                    .await
                    .map_err(|e| anyhow!(e))?;
            }

            // Never echo the password back.
            settings.password = "*".repeat(settings.password.len().min(8));
            print_json(&settings)
        }
    }
}
