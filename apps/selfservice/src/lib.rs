//! # Netcom Self-Service Library
//!
//! The `netcom` command-line client: sign up, log in, look at lines, plans
//! and usage, and keep payment cards on this device.
//!
//! ## Module Organization
//! ```text
//! netcom_selfservice/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions
//! ├── context.rs      ◄─── AppContext: config + hydrated stores
//! ├── state/
//! │   ├── mod.rs      ◄─── Store exports
//! │   ├── storage.rs  ◄─── StateStorage, versioned envelope
//! │   ├── cell.rs     ◄─── Persist-then-commit cell
//! │   ├── auth.rs     ◄─── Session store
//! │   ├── registration.rs ◄─ Sign-up draft store
//! │   └── cards.rs    ◄─── Saved cards store
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch + rendering
//! │   └── ...         ◄─── validate, auth, lines, register, cards
//! └── error.rs        ◄─── CommandError for the user
//! ```

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod state;

use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use netcom_api::ApiConfig;
use netcom_db::{Database, DbConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use context::AppContext;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG overrides the default)         │
/// │                                                                         │
/// │  2. Load API config ─── --config, else platform config dir, then       │
/// │                         NETCOM_* environment overrides                  │
/// │                                                                         │
/// │  3. Open Database ───── NETCOM_DB_PATH, else platform data dir          │
/// │                         migrations applied on open                      │
/// │                                                                         │
/// │  4. Hydrate stores ──── auth, registration, cards                       │
/// │                                                                         │
/// │  5. Dispatch ────────── output to stdout, errors to stderr (exit 1)     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_tracing();

    let config = ApiConfig::load(cli.config.clone()).context("falha ao carregar a configuração da API")?;

    let db_path = database_path()?;
    debug!(?db_path, "Database path determined");
    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("falha ao abrir {}", db_path.display()))?;

    let ctx = AppContext::open(&db, config)
        .await
        .context("falha ao carregar os dados locais")?;

    let outcome = commands::dispatch(&ctx, cli.command, cli.json).await;
    db.close().await;

    match outcome {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            info!(code = ?err.code, "Command failed");
            if cli.json {
                eprintln!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                eprintln!("{err}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// clean for command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=netcom=trace` - Show trace for netcom crates only
/// - Default: warnings, plus INFO for netcom crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,netcom=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/br.netcom.selfservice/netcom.db`
/// - **Windows**: `%APPDATA%\netcom\selfservice\data\netcom.db`
/// - **Linux**: `~/.local/share/selfservice/netcom.db`
///
/// ## Override
/// Set `NETCOM_DB_PATH` to use a custom path.
pub fn database_path() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var("NETCOM_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("br", "netcom", "selfservice")
        .ok_or_else(|| anyhow!("não foi possível determinar o diretório de dados"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("falha ao criar {}", data_dir.display()))?;

    Ok(data_dir.join("netcom.db"))
}
