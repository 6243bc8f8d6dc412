use truewallet::utils::Table;
use truewallet::{SearchOutcome, TransactionSearch, WalletClient, WalletError};

use super::date_args;

pub async fn execute(
    search: &TransactionSearch<WalletClient>,
    phone: &str,
    dates: &[String],
) -> Result<(), WalletError> {
    let outcome = search.search(phone, &date_args(dates)).await?;
    print!("{}", render(&outcome));
    Ok(())
}

/// Table of matches plus a summary line; calls out failed pages
pub fn render(outcome: &SearchOutcome) -> String {
    let mut output = String::new();

    if outcome.is_empty() {
        output.push_str("No matching transactions\n");
    } else {
        output.push_str(&Table::from_activities(&outcome.activities).render());
    }

    output.push_str(&format!(
        "{} match(es) out of {} record(s)\n",
        outcome.activities.len(),
        outcome.total
    ));

    if !outcome.is_complete() {
        output.push_str(&format!(
            "WARNING: pages {:?} failed to load, results may be incomplete\n",
            outcome.failed_pages
        ));
    }

    output
}
