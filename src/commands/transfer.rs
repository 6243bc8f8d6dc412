use tracing::info;
use truewallet::utils::Table;
use truewallet::{TransactionSearch, WalletClient, WalletError};

use super::date_args;

pub async fn execute_last(
    search: &TransactionSearch<WalletClient>,
    phone: &str,
    amount: f64,
    dates: &[String],
) -> Result<(), WalletError> {
    match search.find_last_transfer(phone, amount, &date_args(dates)).await? {
        Some(activity) => print!("{}", Table::from_activities([&activity]).render()),
        None => println!("No transfer of {:.2} from {}", amount, phone),
    }
    Ok(())
}

pub async fn execute_check(
    search: &TransactionSearch<WalletClient>,
    phone: &str,
    amount: f64,
) -> Result<(), WalletError> {
    let activity = search.check_transaction(phone, amount).await?;
    info!("Transfer {} confirmed", activity.report_id);
    print!("{}", Table::from_activities([&activity]).render());
    Ok(())
}
