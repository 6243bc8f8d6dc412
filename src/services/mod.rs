//! Transaction search services: date resolution, page planning, matching and the
//! concurrent fetch orchestration built on top of them

pub mod date_range;
pub mod matcher;
pub mod page_planner;
pub mod search_service;

pub use date_range::{day_window, parse_date, today};
pub use matcher::{format_amount, normalize_amount, normalize_phone, ActivityMatcher};
pub use page_planner::{PagePlan, CHECK_FAN_OUT, LAST_TRANSFER_PAGE_SIZE, SEARCH_FAN_OUT};
pub use search_service::{latest_activity, TransactionSearch, CREDITOR_ACTION, TRANSFER_TYPE};
