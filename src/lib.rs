//! Client for a mobile-wallet gateway.
//!
//! The interesting part is [`services::TransactionSearch`]: it learns how many history
//! records a query has, fans out a fixed number of parallel page fetches to cover them in
//! one wave and filters every record by counterparty phone and, optionally, amount.
//!
//! ```no_run
//! use std::sync::Arc;
//! use truewallet::{TransactionSearch, WalletClient, WalletConfig};
//!
//! # async fn run() -> Result<(), truewallet::WalletError> {
//! let config = WalletConfig::from_env()?;
//! let search = TransactionSearch::new(Arc::new(WalletClient::new(&config)?));
//!
//! let outcome = search.search("081-234-5678", &["2018-12-01", "2018-12-02"]).await?;
//! println!("{} match(es), complete: {}", outcome.activities.len(), outcome.is_complete());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use api::{TransactionSource, WalletClient};
pub use config::WalletConfig;
pub use models::{Activity, DateRange, Page, PageQuery, SearchCriteria, SearchOutcome};
pub use services::TransactionSearch;
pub use utils::WalletError;
