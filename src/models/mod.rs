//! Data models for the wallet client and search services

pub mod activity;
pub mod search;

pub use activity::{Activity, Page, ACTIVITY_TIME_FORMAT};
pub use search::{DateRange, PageQuery, SearchCriteria, SearchOutcome, DATE_FORMAT};
