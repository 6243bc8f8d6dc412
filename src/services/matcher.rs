//! Record predicate for transaction searches.
//!
//! Both comparisons are exact string equality after normalization. Amounts in particular
//! are never compared numerically: the gateway formats amounts with two decimals and the
//! target is formatted the same way, so a gateway value such as `1000.0` will not match a
//! target of `1000`. Malformed input never errors, it just does not match.

use crate::models::Activity;

/// Leading glyphs the gateway puts in front of amounts
const AMOUNT_PREFIXES: &[char] = &['+', '-', '฿'];

/// Strip `-` separators from a phone number
pub fn normalize_phone(phone: &str) -> String {
    phone.replace('-', "")
}

/// Strip thousands separators and the sign/currency prefix from a gateway amount
pub fn normalize_amount(amount: &str) -> String {
    amount
        .replace(',', "")
        .trim()
        .trim_start_matches(AMOUNT_PREFIXES)
        .to_string()
}

/// Format a caller-supplied amount the way the gateway prints it
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityMatcher {
    phone: String,
    amount: Option<String>,
}

impl ActivityMatcher {
    pub fn new(phone: &str, amount: Option<f64>) -> Self {
        Self::from_normalized(normalize_phone(phone), amount.map(format_amount))
    }

    /// Matcher over values that are already normalized (see `SearchCriteria`)
    pub fn from_normalized(phone: String, amount: Option<String>) -> Self {
        Self { phone, amount }
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        if normalize_phone(&activity.phone) != self.phone {
            return false;
        }

        match &self.amount {
            Some(target) => normalize_amount(&activity.amount) == *target,
            None => true,
        }
    }
}
