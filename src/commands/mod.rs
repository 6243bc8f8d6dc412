pub mod balance;
pub mod search;
pub mod token;
pub mod transaction;
pub mod transfer;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use truewallet::{TransactionSearch, WalletClient, WalletConfig, WalletError};

/// Query a mobile-wallet account's transaction history
#[derive(Parser, Debug)]
#[command(name = "truewallet")]
#[command(about = "Search a mobile-wallet account's transaction history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// All transfers with a phone number (dates: none = today, one day, or start and end)
    Search {
        #[arg(value_name = "PHONE")]
        phone: String,
        #[arg(value_name = "DATE", num_args = 0..=2, help = "YYYY-MM-DD")]
        dates: Vec<String>,
    },
    /// First incoming transfer from a phone number with an exact amount
    LastTransfer {
        #[arg(value_name = "PHONE")]
        phone: String,
        #[arg(value_name = "AMOUNT")]
        amount: f64,
        #[arg(value_name = "DATE", num_args = 0..=2, help = "YYYY-MM-DD")]
        dates: Vec<String>,
    },
    /// Most recent incoming transfer from a phone number with an exact amount, looking back
    /// WALLET_LOOKBACK_DAYS days
    Check {
        #[arg(value_name = "PHONE")]
        phone: String,
        #[arg(value_name = "AMOUNT")]
        amount: f64,
    },
    /// One raw page of history
    History {
        #[arg(long, default_value_t = 100)]
        limit: usize,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        action: Option<String>,
        #[arg(value_name = "DATE", num_args = 0..=2, help = "YYYY-MM-DD")]
        dates: Vec<String>,
    },
    /// Detail of one activity by report id
    Report {
        #[arg(value_name = "REPORT_ID")]
        report_id: String,
    },
    /// Current balance
    Balance,
    /// Account holder profile
    Profile,
    /// Seal an access token with TOKEN_ENCRYPTION_KEY for use as WALLET_ACCESS_TOKEN_SEALED
    SealToken {
        #[arg(value_name = "TOKEN")]
        token: String,
    },
}

/// Borrow owned CLI date strings as the `&[&str]` the services take
pub fn date_args(dates: &[String]) -> Vec<&str> {
    dates.iter().map(String::as_str).collect()
}

pub async fn run(cli: Cli, config: WalletConfig) -> Result<(), WalletError> {
    if let Command::SealToken { token } = &cli.command {
        return token::execute(token);
    }

    let client = Arc::new(WalletClient::new(&config)?);
    let search = TransactionSearch::new(Arc::clone(&client)).with_lookback_days(config.lookback_days);

    match cli.command {
        Command::Search { phone, dates } => search::execute(&search, &phone, &dates).await,
        Command::LastTransfer { phone, amount, dates } => {
            transfer::execute_last(&search, &phone, amount, &dates).await
        }
        Command::Check { phone, amount } => transfer::execute_check(&search, &phone, amount).await,
        Command::History { limit, page, kind, action, dates } => {
            transaction::execute_history(&client, limit, page, kind, action, &dates).await
        }
        Command::Report { report_id } => transaction::execute_report(&client, &report_id).await,
        Command::Balance => balance::execute_balance(&client).await,
        Command::Profile => balance::execute_profile(&client).await,
        Command::SealToken { .. } => Ok(()),
    }
}
