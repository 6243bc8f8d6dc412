use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use truewallet::WalletConfig;

mod commands;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so command output on stdout stays pipeable
    let mut filter = EnvFilter::from_default_env();
    for directive in ["truewallet=info", "reqwest=warn", "hyper=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let cli = commands::Cli::parse();

    let config = match WalletConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    info!("Using wallet gateway at {}", config.base_url);

    if let Err(e) = commands::run(cli, config).await {
        if e.is_token_error() {
            error!("{} (log in again and update WALLET_ACCESS_TOKEN)", e);
        } else {
            error!("{}", e);
        }
        std::process::exit(1);
    }
}
