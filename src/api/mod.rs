pub mod truemoney;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{Page, PageQuery};
use crate::utils::WalletError;

pub use truemoney::WalletClient;

/// Anything that can serve one page of transaction history.
///
/// Implementations may be slow or rate limited and may report a different total on every
/// call; the search services never re-validate totals.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, WalletError>;
}

#[async_trait]
impl<S: TransactionSource + ?Sized> TransactionSource for Arc<S> {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, WalletError> {
        (**self).fetch_page(query).await
    }
}
