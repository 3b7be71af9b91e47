//! Farmhand CLI - farm records from the terminal
//!
//! Attendance, inventory, expenses, contacts and calendar, kept in step with
//! the farm backend.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::attendance::run_attendance;
use crate::commands::auth_cmd::run_auth;
use crate::commands::calendar::run_calendar;
use crate::commands::common::{login_hint, CommandContext};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::contacts::run_contacts;
use crate::commands::expenses::run_expenses;
use crate::commands::medicines::run_medicines;
use crate::commands::seeds::run_seeds;
use crate::commands::weather::run_weather;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        if let Some(hint) = login_hint(&error) {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::from_default_env();
    let filter = match "farmhand=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Config { command } => run_config(command, profile, cli.json),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
        command => {
            let context = CommandContext::load(profile, cli.json)?;
            match command {
                Commands::Auth { command } => run_auth(command, &context).await,
                Commands::Attendance { command } => run_attendance(command, &context).await,
                Commands::Medicines { command } => run_medicines(command, &context).await,
                Commands::Seeds { command } => run_seeds(command, &context).await,
                Commands::Expenses { command } => run_expenses(command, &context).await,
                Commands::Contacts { command } => run_contacts(command, &context).await,
                Commands::Calendar { command } => run_calendar(command, &context).await,
                Commands::Weather { location } => run_weather(&location, &context).await,
                Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
            }
        }
    }
}
