//! WealthFlow CLI - a terminal front end for the WealthFlow personal-finance API.
//!
//! Signs in against the backend, keeps the session in local storage between
//! runs, and lists or creates the user's financial records.

mod commands;
mod config;
mod format;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wealthflow_core::{FileStore, KeyValueStore, KeyringStore, SessionStore, Transport};

use config::Config;

#[derive(Parser)]
#[command(name = "wealthflow")]
#[command(version)]
#[command(about = "Personal finance from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL, e.g. http://localhost:8000/api/v1
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Keep the session in the OS keychain instead of the cache directory
    #[arg(long, global = true)]
    keyring: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        /// Account email (defaults to the last one used)
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Create an account and sign in to it
    Register {
        #[arg(short, long)]
        email: String,

        /// Full name shown in greetings
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// List accounts and balances
    Accounts,
    /// List spending and income categories
    Categories,
    /// List transactions, newest first
    Transactions(TransactionArgs),
    /// Show budgets with their spending
    Budgets,
    /// Show savings goals and progress
    Goals,
    /// Show investments, or the portfolio summary
    Investments {
        #[arg(long)]
        summary: bool,
    },
    /// Balances, budget usage, recent activity and insights
    Dashboard,
    /// Show generated insights
    Insights,
    /// Open a new account
    AddAccount {
        #[arg(long)]
        name: String,

        /// checking, savings, credit_card, investment, ...
        #[arg(long = "type", value_name = "TYPE")]
        account_type: String,

        #[arg(long)]
        balance: Option<f64>,

        /// ISO currency code (backend default is USD)
        #[arg(long)]
        currency: Option<String>,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct TransactionArgs {
    #[arg(long)]
    limit: Option<u32>,

    #[arg(long)]
    skip: Option<u32>,

    /// Only this account id
    #[arg(long, value_name = "ID")]
    account: Option<i64>,

    /// Only this category id
    #[arg(long, value_name = "ID")]
    category: Option<i64>,

    /// First day included (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_start_of_day)]
    from: Option<NaiveDateTime>,

    /// Last day included (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_end_of_day)]
    to: Option<NaiveDateTime>,
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_start_of_day(s: &str) -> Result<NaiveDateTime, String> {
    parse_day(s)?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| "invalid time".to_string())
}

fn parse_end_of_day(s: &str) -> Result<NaiveDateTime, String> {
    parse_day(s)?
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| "invalid time".to_string())
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // RUST_LOG controls the level (e.g. RUST_LOG=wealthflow_core=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn open_storage(use_keyring: bool) -> Result<Arc<dyn KeyValueStore>> {
    if use_keyring {
        debug!("Using OS keychain for session storage");
        return Ok(Arc::new(KeyringStore::new()));
    }
    let store = FileStore::in_cache_dir().context("Could not locate the cache directory")?;
    debug!(path = %store.path().display(), "Using file session storage");
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable config");
        Config::default()
    });

    let client_config = config.client_config(cli.api_url.as_deref());
    info!(api_url = %client_config.base_url(), "wealthflow starting");

    let storage = open_storage(cli.keyring)?;
    let redirect = |_route: &str| {
        eprintln!("Session expired. Run `wealthflow login` to sign in again.");
    };
    let transport = Transport::new(client_config, storage, Arc::new(redirect))
        .context("Failed to build HTTP client")?;

    let session = SessionStore::new(transport);
    session.init().await;

    match cli.command {
        Commands::Login { email } => commands::login(&session, &mut config, email).await,
        Commands::Register { email, name } => {
            commands::register(&session, &mut config, email, name).await
        }
        Commands::Logout => {
            session.logout().await;
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => commands::whoami(&session),
        Commands::Accounts => commands::accounts(&session).await,
        Commands::Categories => commands::categories(&session).await,
        Commands::Transactions(args) => commands::transactions(&session, &args).await,
        Commands::Budgets => commands::budgets(&session).await,
        Commands::Goals => commands::goals(&session).await,
        Commands::Investments { summary } => commands::investments(&session, summary).await,
        Commands::Dashboard => commands::dashboard(&session).await,
        Commands::Insights => commands::insights(&session).await,
        Commands::AddAccount {
            name,
            account_type,
            balance,
            currency,
        } => commands::add_account(&session, name, account_type, balance, currency).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transaction_date_bounds() {
        let cli = Cli::try_parse_from([
            "wealthflow",
            "transactions",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "--limit",
            "5",
        ])
        .unwrap();
        let Commands::Transactions(args) = cli.command else {
            panic!("expected transactions");
        };
        assert_eq!(args.from.unwrap().to_string(), "2024-01-01 00:00:00");
        assert_eq!(args.to.unwrap().to_string(), "2024-01-31 23:59:59");
        assert_eq!(args.limit, Some(5));
    }

    #[test]
    fn test_rejects_bad_date() {
        let parsed = Cli::try_parse_from(["wealthflow", "transactions", "--from", "01/02/2024"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wealthflow",
            "accounts",
            "--keyring",
            "--api-url",
            "http://x",
        ])
        .unwrap();
        assert!(cli.keyring);
        assert_eq!(cli.api_url.as_deref(), Some("http://x"));
    }
}
