pub mod client;
pub mod models;

pub use client::{HeaderSnapshot, WalletClient};
pub use models::{Profile, ReportDetail};
