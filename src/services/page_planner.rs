/// Parallel page fetches issued by a phone search
pub const SEARCH_FAN_OUT: usize = 8;
/// Parallel page fetches issued per day window by `check_transaction`
pub const CHECK_FAN_OUT: usize = 10;
/// Fixed first-attempt page size of `find_last_transfer`
pub const LAST_TRANSFER_PAGE_SIZE: usize = 30;

/// How one search splits a reported total across its parallel fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub page_size: usize,
    pub fan_out: usize,
}

impl PagePlan {
    /// `page_size = total / fan_out + 1`, so `fan_out` pages always cover `total` in one wave.
    /// Returns `None` when there is nothing to fetch.
    pub fn for_total(total: usize, fan_out: usize) -> Option<PagePlan> {
        if total == 0 {
            return None;
        }

        let fan_out = fan_out.max(1);
        Some(PagePlan {
            page_size: total / fan_out + 1,
            fan_out,
        })
    }

    /// 1-based page numbers to request
    pub fn pages(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.fan_out
    }

    pub fn capacity(&self) -> usize {
        self.page_size * self.fan_out
    }
}
