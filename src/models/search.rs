//! Search inputs and outputs

use std::fmt;

use chrono::NaiveDate;

use super::Activity;

/// Wire format of every date sent to the gateway
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `[start, end]` date window applied to every fetch of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_param(), self.end_param())
    }
}

/// Parameters of one page request to the transaction source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub range: DateRange,
    /// Page size
    pub limit: usize,
    /// 1-based
    pub page: usize,
    /// Sent as the `type` filter, e.g. `transfer`
    pub kind: Option<String>,
    /// Sent as the `action` filter, e.g. `creditor`
    pub action: Option<String>,
}

impl PageQuery {
    pub fn new(range: DateRange, limit: usize, page: usize) -> Self {
        Self {
            range,
            limit,
            page,
            kind: None,
            action: None,
        }
    }

    pub fn kind(mut self, kind: Option<&str>) -> Self {
        self.kind = kind.map(str::to_string);
        self
    }

    pub fn action(mut self, action: Option<&str>) -> Self {
        self.action = action.map(str::to_string);
        self
    }
}

/// Immutable input of one search, built once per call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    /// Target phone with separators removed
    pub phone: String,
    /// Target amount already formatted to two decimals
    pub amount: Option<String>,
    pub range: DateRange,
    pub kind: Option<String>,
    pub action: Option<String>,
}

impl SearchCriteria {
    /// Query for `page` of this search at the given page size
    pub fn page_query(&self, limit: usize, page: usize) -> PageQuery {
        PageQuery::new(self.range, limit, page)
            .kind(self.kind.as_deref())
            .action(self.action.as_deref())
    }
}

/// Matches gathered by a fan-out search.
///
/// Pages whose fetch failed are listed in `failed_pages`; when that list is non-empty the
/// result may be missing records.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub activities: Vec<Activity>,
    /// Total reported by the exploratory fetch
    pub total: usize,
    /// Page size used for the fan-out, 0 when no fan-out was needed
    pub page_size: usize,
    pub failed_pages: Vec<usize>,
}

impl SearchOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
