use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ledger_state::{get_ledger_value, set_ledger_value, AppState};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(about = "Ledger promotion state tool", long_about = None)]
struct Cli {
    /// App-state JSON file to read (and write back for mutating commands)
    #[arg(long, global = true, default_value = "ledger_state.json")]
    state: PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fresh `{"ledger": {}}` state file
    Init {
        /// Overwrite an existing state file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print ledger[key] as JSON (null when unset)
    Get { key: String },

    /// Set ledger[key] to a JSON value
    Set { key: String, value: String },

    /// Promotion lifecycle commands
    Promotion {
        #[command(subcommand)]
        cmd: PromotionCmd,
    },

    /// Compute layered settings hash + print canonical JSON
    SettingsHash {
        /// Paths in merge order (defaults -> profile -> user ...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum PromotionCmd {
    /// Merge a promotion payload into the state and re-derive the active state
    Save {
        /// Payload JSON string
        #[arg(long, conflicts_with = "payload_file")]
        payload: Option<String>,

        /// Path to a payload JSON file
        #[arg(long = "payload-file", conflicts_with = "payload")]
        payload_file: Option<String>,

        /// Settings YAML layers in merge order
        #[arg(long = "settings")]
        settings: Vec<String>,
    },

    /// Re-derive the active state
    Classify {
        /// Explicit payments flag; read from settings when omitted
        #[arg(long = "payments-enabled")]
        payments_enabled: Option<bool>,

        /// Settings YAML layers in merge order
        #[arg(long = "settings")]
        settings: Vec<String>,
    },

    /// Print the promotion record
    Show,

    /// Reset the promotion to an empty record
    Remove,

    /// Schedule the reminder (default: 24h from now)
    RemindLater {
        /// Offset from now, in milliseconds
        #[arg(long = "offset-ms")]
        offset_ms: Option<i64>,
    },

    /// Print the about-page view
    About,

    /// Print the active state slice
    Active,

    /// Print the active notification
    Notification,

    /// Set a prop on the active notification (value is JSON)
    SetNotification { key: String, value: String },

    /// Report whether the reminder is due
    Due {
        /// Evaluate at this epoch-millis instead of now
        #[arg(long = "now-ms")]
        now_ms: Option<i64>,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience, e.g. RUST_LOG).
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let state_path = cli.state;

    match cli.cmd {
        Commands::Init { force } => {
            if state_path.exists() && !force {
                bail!(
                    "REFUSING INIT: {} already exists. Re-run with: `ledger init --force`",
                    state_path.display()
                );
            }
            AppState::new().write_to_path(&state_path)?;
            println!("state_initialized={}", state_path.display());
        }

        Commands::Get { key } => {
            let state = AppState::load_from_path(&state_path)?;
            let value = get_ledger_value(&state, Some(key.as_str())).cloned().unwrap_or_default();
            commands::print_json(&value)?;
        }

        Commands::Set { key, value } => {
            let value = commands::parse_json_arg(&value)?;
            let state = AppState::load_from_path(&state_path)?;
            set_ledger_value(state, Some(key.as_str()), value).write_to_path(&state_path)?;
            println!("ledger_value_set={key}");
        }

        Commands::Promotion { cmd } => match cmd {
            PromotionCmd::Save {
                payload,
                payload_file,
                settings,
            } => commands::promotion::save(&state_path, payload, payload_file, &settings)?,
            PromotionCmd::Classify {
                payments_enabled,
                settings,
            } => commands::promotion::classify(&state_path, payments_enabled, &settings)?,
            PromotionCmd::Show => commands::promotion::show(&state_path)?,
            PromotionCmd::Remove => commands::promotion::remove(&state_path)?,
            PromotionCmd::RemindLater { offset_ms } => {
                commands::promotion::remind_later(&state_path, offset_ms)?
            }
            PromotionCmd::About => commands::promotion::about(&state_path)?,
            PromotionCmd::Active => commands::promotion::active(&state_path)?,
            PromotionCmd::Notification => commands::promotion::notification(&state_path)?,
            PromotionCmd::SetNotification { key, value } => {
                commands::promotion::set_notification(&state_path, &key, &value)?
            }
            PromotionCmd::Due { now_ms } => commands::promotion::due(&state_path, now_ms)?,
        },

        Commands::SettingsHash { paths } => {
            let loaded = commands::load_settings(&paths)?;
            println!("settings_hash={}", loaded.settings_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
