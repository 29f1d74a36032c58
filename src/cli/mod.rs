use std::io::{self, StdoutLock};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::application::{public_key_report, InspectorService};
use crate::horizon::{Network, DEFAULT_TIMEOUT_SECS};
use crate::io::{
    default_account_filename, default_public_key_filename, default_transaction_filename,
    default_trustlines_filename, emit_json, render_account, render_public_key,
    render_transaction, render_trustlines, resolve_target,
};

/// stellar-inspect - read-only Stellar account and transaction inspector
#[derive(Parser, Debug)]
#[command(name = "stellar-inspect")]
#[command(about = "Inspect Stellar accounts, trustlines and transactions via Horizon")]
#[command(version)]
pub struct Cli {
    /// Network: public, testnet, or a custom Horizon URL
    #[arg(short, long, global = true, env = "STELLAR_NETWORK", default_value = "public")]
    pub network: Network,

    /// Print the report as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Write JSON output to a file (default name if FILE is omitted, "." for stdout)
    #[arg(long, global = true, value_name = "FILE", num_args = 0..=1)]
    pub out: Option<Option<String>>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "STELLAR_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show balances, signers and recent activity of an account
    #[command(visible_alias = "get-account-info")]
    Account {
        /// Public account address (G...)
        #[arg(long, env = "STELLAR_ACCOUNT")]
        account: String,

        /// Include the last 5 transactions
        #[arg(long, alias = "get-transactions")]
        transactions: bool,
    },

    /// Show a transaction and its operations
    #[command(visible_alias = "get-transaction-info")]
    Transaction {
        /// Transaction hash (64 hex characters)
        #[arg(long)]
        transaction: String,
    },

    /// List the non-native trustlines of an account, flagging zero balances
    #[command(visible_alias = "audit-trustlines")]
    Trustlines {
        /// Public account address (G...)
        #[arg(long, env = "STELLAR_ACCOUNT")]
        account: String,
    },

    /// Derive the public key of a secret key, optionally comparing it
    #[command(visible_alias = "get-public")]
    PublicKey {
        /// Secret key (S...)
        #[arg(long, env = "STELLAR_SECRET", hide_env_values = true)]
        secret: String,

        /// Public key to compare with the derived one; exits non-zero on mismatch
        #[arg(long = "public", value_name = "PUBLIC_KEY")]
        public: Option<String>,
    },
}

/// Resolved presentation options.
struct OutputOptions {
    json: bool,
    out: Option<Option<String>>,
}

impl Cli {
    fn output_options(&self) -> OutputOptions {
        OutputOptions {
            // Asking for a file implies JSON
            json: self.json || self.out.is_some(),
            out: self.out.clone(),
        }
    }

    pub async fn run(self) -> Result<()> {
        let output = self.output_options();
        let timeout = Duration::from_secs(self.timeout);
        let connect = |network: &Network| {
            InspectorService::connect(network, timeout).context("Failed to set up Horizon client")
        };

        match self.command {
            Commands::Account {
                account,
                transactions,
            } => {
                let service = connect(&self.network)?;
                let report = service
                    .account_report(account.trim(), transactions)
                    .await
                    .context("Failed to fetch account info")?;
                let now = Utc::now();
                present(
                    &report,
                    &output,
                    || default_account_filename(&report.account, now),
                    |r, out| render_account(r, out),
                )?;
            }

            Commands::Transaction { transaction } => {
                let service = connect(&self.network)?;
                let report = service
                    .transaction_report(transaction.trim())
                    .await
                    .context("Failed to fetch transaction info")?;
                let now = Utc::now();
                present(
                    &report,
                    &output,
                    || default_transaction_filename(&report.hash, now),
                    |r, out| render_transaction(r, out),
                )?;
            }

            Commands::Trustlines { account } => {
                let service = connect(&self.network)?;
                let report = service
                    .trustline_report(account.trim())
                    .await
                    .context("Failed to audit trustlines")?;
                let now = Utc::now();
                present(
                    &report,
                    &output,
                    || default_trustlines_filename(&report.account, now),
                    |r, out| render_trustlines(r, out),
                )?;
            }

            Commands::PublicKey { secret, public } => {
                let report = public_key_report(&secret, public.as_deref())
                    .context("Failed to derive public key")?;
                let now = Utc::now();
                present(
                    &report,
                    &output,
                    || default_public_key_filename(&report.public_key, now),
                    |r, out| render_public_key(r, out),
                )?;
                if report.is_mismatch() {
                    bail!("Derived public key does not match the given public key");
                }
            }
        }

        Ok(())
    }
}

fn present<T: Serialize>(
    report: &T,
    output: &OutputOptions,
    default_name: impl FnOnce() -> String,
    render: impl FnOnce(&T, &mut StdoutLock<'static>) -> io::Result<()>,
) -> Result<()> {
    if output.json {
        let target = resolve_target(output.out.clone(), default_name);
        if let Some(path) = emit_json(report, &target)? {
            eprintln!("JSON saved to {}", path.display());
        }
    } else {
        let mut stdout = io::stdout().lock();
        render(report, &mut stdout).context("Failed to write report")?;
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence; otherwise
/// `--verbose` enables debug output for this crate.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "stellar_inspect=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
