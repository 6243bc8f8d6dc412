use chrono::{Days, Local, NaiveDate};

use crate::models::{DateRange, DATE_FORMAT};
use crate::utils::WalletError;

/// Today in the local timezone, which is the gateway's notion of "today"
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date(raw: &str) -> Result<NaiveDate, WalletError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        WalletError::InvalidArgument(format!("'{}' is not a YYYY-MM-DD date", raw))
    })
}

/// One-day window starting at `day`
pub fn day_window(day: NaiveDate) -> Result<DateRange, WalletError> {
    let end = day
        .checked_add_days(Days::new(1))
        .ok_or_else(|| WalletError::InvalidArgument(format!("No day after {}", day)))?;
    Ok(DateRange::new(day, end))
}

impl DateRange {
    /// Resolve user-supplied date arguments into the window used by every fetch of a search.
    ///
    /// * no argument: today until tomorrow
    /// * one argument: that day until the day after
    /// * two arguments: start and end as given
    ///
    /// More than two arguments, or any argument that is not `YYYY-MM-DD`, is rejected.
    pub fn resolve(args: &[&str], today: NaiveDate) -> Result<DateRange, WalletError> {
        match args {
            [] => day_window(today),
            [start] => day_window(parse_date(start)?),
            [start, end] => Ok(DateRange::new(parse_date(start)?, parse_date(end)?)),
            _ => Err(WalletError::InvalidArgument(format!(
                "Expected at most 2 date arguments, got {}",
                args.len()
            ))),
        }
    }
}
