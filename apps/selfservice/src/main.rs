//! # Netcom Self-Service Entry Point
//!
//! ```text
//! netcom [--json] [--config PATH] <command>
//!
//!   validate cpf|birth-date      login / logout / whoami
//!   lines / usage / plan         products
//!   register <step>              cards list|add|remove
//! ```
//!
//! The actual setup is in lib.rs.

use clap::Parser;
use netcom_selfservice::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    netcom_selfservice::run(Cli::parse()).await
}
