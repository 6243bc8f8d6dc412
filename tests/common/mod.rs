#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use truewallet::{Activity, Page, PageQuery, TransactionSource, WalletError};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn activity(report_id: &str, date_time: &str, amount: &str, phone: &str) -> Activity {
    Activity {
        report_id: report_id.to_string(),
        date_time: date_time.to_string(),
        amount: amount.to_string(),
        phone: phone.to_string(),
        action: "creditor".to_string(),
    }
}

/// `count` filler records from a counterparty nobody searches for
pub fn filler(prefix: &str, count: usize) -> Vec<Activity> {
    (0..count)
        .map(|i| activity(&format!("{}-{:03}", prefix, i), "01/12/18 09:00", "+1.00", "099-999-9999"))
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Token,
    Unknown,
    Request,
}

impl Failure {
    fn to_error(self) -> WalletError {
        match self {
            Failure::Token => WalletError::Token("Token not found.".to_string()),
            Failure::Unknown => WalletError::Unknown { code: "UPC-500".to_string() },
            Failure::Request => WalletError::Request("connection reset".to_string()),
        }
    }
}

/// In-memory history keyed by the start date of the requested window.
///
/// The first call a search makes is its exploratory fetch; `fail_probe` applies to that
/// call only and `fail_pages` to every later call for the listed page numbers.
#[derive(Default)]
pub struct MockSource {
    days: HashMap<NaiveDate, Vec<Activity>>,
    fail_pages: HashSet<usize>,
    fail_probe: Option<Failure>,
    shuffle: bool,
    calls: Mutex<Vec<PageQuery>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: NaiveDate, records: Vec<Activity>) -> Self {
        self.days.insert(day, records);
        self
    }

    pub fn failing_pages(mut self, pages: &[usize]) -> Self {
        self.fail_pages = pages.iter().copied().collect();
        self
    }

    pub fn failing_probe(mut self, failure: Failure) -> Self {
        self.fail_probe = Some(failure);
        self
    }

    /// Later pages answer first, so completion order is the reverse of page order
    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }

    pub fn calls(&self) -> Vec<PageQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionSource for MockSource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, WalletError> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(query.clone());
            calls.len() - 1
        };

        if self.shuffle {
            let delay = 5 * 12usize.saturating_sub(query.page) as u64;
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if call_index == 0 {
            if let Some(failure) = self.fail_probe {
                return Err(failure.to_error());
            }
        } else if self.fail_pages.contains(&query.page) {
            return Err(Failure::Request.to_error());
        }

        let records = self.days.get(&query.range.start).cloned().unwrap_or_default();
        let total = records.len();
        let start = (query.page - 1).saturating_mul(query.limit).min(total);
        let end = start.saturating_add(query.limit).min(total);

        Ok(Page {
            total,
            total_page: if query.limit == 0 { 0 } else { (total + query.limit - 1) / query.limit },
            activities: records[start..end].to_vec(),
        })
    }
}
