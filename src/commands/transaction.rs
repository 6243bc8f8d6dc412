use truewallet::services::today;
use truewallet::utils::Table;
use truewallet::{DateRange, PageQuery, WalletClient, WalletError};

use super::date_args;

/// One raw page of history with whatever filters were given
pub async fn execute_history(
    client: &WalletClient,
    limit: usize,
    page: usize,
    kind: Option<String>,
    action: Option<String>,
    dates: &[String],
) -> Result<(), WalletError> {
    if limit == 0 || page == 0 {
        return Err(WalletError::InvalidArgument(
            "--limit and --page must be at least 1".to_string(),
        ));
    }

    let range = DateRange::resolve(&date_args(dates), today())?;
    let query = PageQuery::new(range, limit, page)
        .kind(kind.as_deref())
        .action(action.as_deref());

    let result = client.fetch_transactions(&query).await?;

    print!("{}", Table::from_activities(&result.activities).render());
    println!(
        "page {} of {} ({} record(s) in {})",
        page, result.total_page, result.total, range
    );
    Ok(())
}

pub async fn execute_report(client: &WalletClient, report_id: &str) -> Result<(), WalletError> {
    let report = client.get_report(report_id).await?;

    let mut table = Table::new(&["Field", "Value"]);
    table.add_row(vec!["service".to_string(), report.service_type.clone()]);
    table.add_row(vec!["amount".to_string(), format!("{:.2}", report.amount)]);
    for cell in report.cells() {
        table.add_row(vec![cell.title.clone(), cell.value.clone()]);
    }

    print!("{}", table.render());
    Ok(())
}
