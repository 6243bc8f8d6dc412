//! Concurrent paginated transaction search.
//!
//! A search first asks the source for a single record to learn the reported total, then
//! splits that total across a fixed number of parallel page fetches and filters every
//! fetched record through an [`ActivityMatcher`].
//!
//! The total is read once. If new activity lands between the exploratory fetch and the
//! fan-out, records near page boundaries can be missed or seen twice.

use std::sync::{Arc, Mutex};

use chrono::{Days, NaiveDate};
use tracing::{debug, error, info, warn};

use super::date_range::{day_window, today};
use super::matcher::{format_amount, normalize_phone, ActivityMatcher};
use super::page_planner::{PagePlan, CHECK_FAN_OUT, LAST_TRANSFER_PAGE_SIZE, SEARCH_FAN_OUT};
use crate::api::TransactionSource;
use crate::models::{Activity, DateRange, SearchCriteria, SearchOutcome};
use crate::utils::WalletError;

pub const TRANSFER_TYPE: &str = "transfer";
pub const CREDITOR_ACTION: &str = "creditor";

/// Search front-end over any [`TransactionSource`]
pub struct TransactionSearch<S> {
    source: Arc<S>,
    lookback_days: u32,
}

impl<S> Clone for TransactionSearch<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            lookback_days: self.lookback_days,
        }
    }
}

impl<S: TransactionSource + 'static> TransactionSearch<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            lookback_days: 2,
        }
    }

    /// Number of day windows `check_transaction` scans, today included (at least 1)
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days.max(1);
        self
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// All transfers to or from `phone` within the resolved date window.
    ///
    /// # Arguments
    /// * `phone` - Counterparty phone, separators allowed
    /// * `date_args` - Zero, one or two `YYYY-MM-DD` dates (see [`DateRange::resolve`])
    ///
    /// # Returns
    /// * `Ok(SearchOutcome)` - Matches in no particular order; check `is_complete()`
    /// * `Err(WalletError)` - Bad arguments, or the exploratory fetch failed
    pub async fn search(&self, phone: &str, date_args: &[&str]) -> Result<SearchOutcome, WalletError> {
        let criteria = SearchCriteria {
            phone: normalize_phone(phone),
            amount: None,
            range: DateRange::resolve(date_args, today())?,
            kind: Some(TRANSFER_TYPE.to_string()),
            action: None,
        };

        self.fan_out_search(&criteria, SEARCH_FAN_OUT).await
    }

    /// Exploratory fetch, then `fan_out` parallel page fetches joined before returning.
    ///
    /// Every worker runs to completion. A worker whose fetch fails contributes nothing and
    /// its page number is reported in `failed_pages`; only a failure of the exploratory
    /// fetch is returned as an error.
    pub async fn fan_out_search(
        &self,
        criteria: &SearchCriteria,
        fan_out: usize,
    ) -> Result<SearchOutcome, WalletError> {
        let probe = self.source.fetch_page(&criteria.page_query(1, 1)).await?;

        let plan = match PagePlan::for_total(probe.total, fan_out) {
            Some(plan) => plan,
            None => {
                debug!("No activity for {} in {}", criteria.phone, criteria.range);
                return Ok(SearchOutcome::empty());
            }
        };

        info!(
            "Searching {} records in {}: {} pages of {}",
            probe.total, criteria.range, plan.fan_out, plan.page_size
        );

        let matcher = Arc::new(ActivityMatcher::from_normalized(
            criteria.phone.clone(),
            criteria.amount.clone(),
        ));
        let matches: Arc<Mutex<Vec<Activity>>> = Arc::new(Mutex::new(Vec::new()));

        let mut workers = Vec::with_capacity(plan.fan_out);
        for page in plan.pages() {
            let source = Arc::clone(&self.source);
            let matcher = Arc::clone(&matcher);
            let matches = Arc::clone(&matches);
            let query = criteria.page_query(plan.page_size, page);

            let handle = tokio::spawn(async move {
                let fetched = source.fetch_page(&query).await?;
                let found: Vec<Activity> = fetched
                    .activities
                    .into_iter()
                    .filter(|activity| matcher.matches(activity))
                    .collect();

                let count = found.len();
                matches.lock().unwrap_or_else(|e| e.into_inner()).extend(found);
                Ok::<usize, WalletError>(count)
            });
            workers.push((page, handle));
        }

        let mut failed_pages = Vec::new();
        for (page, handle) in workers {
            match handle.await {
                Ok(Ok(count)) => debug!("Page {} done, {} match(es)", page, count),
                Ok(Err(e)) => {
                    warn!("Page {} fetch failed, results may be incomplete: {}", page, e);
                    failed_pages.push(page);
                }
                Err(e) => {
                    error!("Page {} worker panicked: {}", page, e);
                    failed_pages.push(page);
                }
            }
        }

        let activities = std::mem::take(&mut *matches.lock().unwrap_or_else(|e| e.into_inner()));

        if !failed_pages.is_empty() {
            warn!(
                "{} of {} pages failed for {}",
                failed_pages.len(),
                plan.fan_out,
                criteria.range
            );
        }

        Ok(SearchOutcome {
            activities,
            total: probe.total,
            page_size: plan.page_size,
            failed_pages,
        })
    }

    /// First incoming transfer from `phone` of exactly `amount`.
    ///
    /// Scans the first 30 records; if nothing matches but the source reported records,
    /// fetches everything in one page of `total` records and scans again.
    ///
    /// # Returns
    /// * `Ok(Some(Activity))` - Matching transfer
    /// * `Ok(None)` - No match in the window
    /// * `Err(WalletError)` - Bad arguments or a failed fetch
    pub async fn find_last_transfer(
        &self,
        phone: &str,
        amount: f64,
        date_args: &[&str],
    ) -> Result<Option<Activity>, WalletError> {
        let criteria = SearchCriteria {
            phone: normalize_phone(phone),
            amount: Some(validated_amount(amount)?),
            range: DateRange::resolve(date_args, today())?,
            kind: Some(TRANSFER_TYPE.to_string()),
            action: Some(CREDITOR_ACTION.to_string()),
        };
        let matcher = ActivityMatcher::from_normalized(criteria.phone.clone(), criteria.amount.clone());

        let first = self
            .source
            .fetch_page(&criteria.page_query(LAST_TRANSFER_PAGE_SIZE, 1))
            .await?;

        let total = first.total;
        if let Some(found) = first.activities.into_iter().find(|a| matcher.matches(a)) {
            return Ok(Some(found));
        }

        if total == 0 {
            return Ok(None);
        }

        debug!("No match in first {} records, refetching all {}", LAST_TRANSFER_PAGE_SIZE, total);

        let everything = self.source.fetch_page(&criteria.page_query(total, 1)).await?;
        Ok(everything.activities.into_iter().find(|a| matcher.matches(a)))
    }

    /// Most recent incoming transfer from `phone` of exactly `amount`, looking back over
    /// the configured number of days starting today.
    pub async fn check_transaction(&self, phone: &str, amount: f64) -> Result<Activity, WalletError> {
        self.check_transaction_on(phone, amount, today()).await
    }

    /// [`Self::check_transaction`] with an explicit "today".
    ///
    /// Day windows are scanned newest first and the scan stops at the first window with
    /// candidates: windows do not overlap, so any candidate there is later than anything
    /// an older window could hold. Among candidates the latest `date_time` wins, ties go
    /// to the greater report id.
    pub async fn check_transaction_on(
        &self,
        phone: &str,
        amount: f64,
        today: NaiveDate,
    ) -> Result<Activity, WalletError> {
        let amount = validated_amount(amount)?;
        let phone = normalize_phone(phone);

        for offset in 0..self.lookback_days {
            let day = today.checked_sub_days(Days::new(offset.into())).ok_or_else(|| {
                WalletError::InvalidArgument(format!("Cannot look back {} days from {}", offset, today))
            })?;

            let criteria = SearchCriteria {
                phone: phone.clone(),
                amount: Some(amount.clone()),
                range: day_window(day)?,
                kind: Some(TRANSFER_TYPE.to_string()),
                action: Some(CREDITOR_ACTION.to_string()),
            };

            let outcome = self.fan_out_search(&criteria, CHECK_FAN_OUT).await?;
            if !outcome.is_complete() {
                warn!("Check on {} ran with failed pages {:?}", day, outcome.failed_pages);
            }

            if let Some(latest) = latest_activity(outcome.activities) {
                info!("Found transfer {} on {}", latest.report_id, day);
                return Ok(latest);
            }

            debug!("No candidates on {}", day);
        }

        Err(WalletError::NotFound(format!(
            "No transfer of {} from {} in the last {} day(s)",
            amount, phone, self.lookback_days
        )))
    }
}

/// Amounts must be finite and non-negative; returns the two-decimal target string
fn validated_amount(amount: f64) -> Result<String, WalletError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(WalletError::InvalidArgument(format!(
            "Amount must be a non-negative number, got {}",
            amount
        )));
    }
    Ok(format_amount(amount))
}

/// Candidate with the latest timestamp; unparseable timestamps rank lowest and equal
/// timestamps fall back to report id order.
pub fn latest_activity(candidates: impl IntoIterator<Item = Activity>) -> Option<Activity> {
    candidates.into_iter().max_by(|a, b| {
        a.timestamp()
            .unwrap_or(i64::MIN)
            .cmp(&b.timestamp().unwrap_or(i64::MIN))
            .then_with(|| a.report_id.cmp(&b.report_id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(report_id: &str, date_time: &str) -> Activity {
        Activity {
            report_id: report_id.to_string(),
            date_time: date_time.to_string(),
            amount: "+100.00".to_string(),
            phone: "0812345678".to_string(),
            action: CREDITOR_ACTION.to_string(),
        }
    }

    #[test]
    fn test_latest_by_timestamp() {
        let latest = latest_activity(vec![
            candidate("a", "01/12/18 10:30"),
            candidate("b", "01/12/18 23:59"),
            candidate("c", "30/11/18 23:59"),
        ])
        .unwrap();
        assert_eq!(latest.report_id, "b");
    }

    #[test]
    fn test_equal_timestamps_break_on_report_id() {
        let forward = latest_activity(vec![
            candidate("100", "01/12/18 10:30"),
            candidate("200", "01/12/18 10:30"),
        ]);
        let backward = latest_activity(vec![
            candidate("200", "01/12/18 10:30"),
            candidate("100", "01/12/18 10:30"),
        ]);

        assert_eq!(forward.unwrap().report_id, "200");
        assert_eq!(backward.unwrap().report_id, "200");
    }

    #[test]
    fn test_unparseable_timestamp_ranks_lowest() {
        let latest = latest_activity(vec![
            candidate("z", "not a date"),
            candidate("a", "01/01/00 00:00"),
        ])
        .unwrap();
        assert_eq!(latest.report_id, "a");
    }

    #[test]
    fn test_no_candidates() {
        assert!(latest_activity(Vec::new()).is_none());
    }

    #[test]
    fn test_validated_amount() {
        assert_eq!(validated_amount(100.0).unwrap(), "100.00");
        assert!(validated_amount(-0.01).is_err());
        assert!(validated_amount(f64::NAN).is_err());
    }
}
