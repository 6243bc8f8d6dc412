//! Runtime configuration, read from the environment (and `.env` via dotenv in the binary)

use std::time::Duration;

use crate::utils::{TokenCipher, WalletError};

pub const DEFAULT_BASE_URL: &str = "https://mobile-api-gateway.truemoney.com/mobile-api-gateway";
pub const DEFAULT_USER_AGENT: &str = "okhttp/3.8.0";

#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub max_requests_per_sec: usize,
    /// Day windows scanned by `check_transaction`, today included
    pub lookback_days: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            max_requests_per_sec: 20,
            lookback_days: 2,
        }
    }
}

impl WalletConfig {
    pub fn from_env() -> Result<Self, WalletError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup.
    ///
    /// `WALLET_ACCESS_TOKEN` wins over `WALLET_ACCESS_TOKEN_SEALED`; the sealed form needs
    /// `TOKEN_ENCRYPTION_KEY`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WalletError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = match (var("WALLET_ACCESS_TOKEN"), var("WALLET_ACCESS_TOKEN_SEALED")) {
            (Some(token), _) => Some(token),
            (None, Some(sealed)) => {
                let key = var("TOKEN_ENCRYPTION_KEY").ok_or_else(|| {
                    WalletError::Config(
                        "TOKEN_ENCRYPTION_KEY not set but WALLET_ACCESS_TOKEN_SEALED is".to_string(),
                    )
                })?;
                Some(TokenCipher::from_hex_key(&key)?.open(&sealed)?)
            }
            (None, None) => None,
        };

        let request_timeout = match var("WALLET_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number(&raw, "WALLET_TIMEOUT_SECS")?),
            None => defaults.request_timeout,
        };

        let max_requests_per_sec = match var("WALLET_MAX_REQUESTS_PER_SEC") {
            Some(raw) => parse_number(&raw, "WALLET_MAX_REQUESTS_PER_SEC")?,
            None => defaults.max_requests_per_sec,
        };

        let lookback_days = match var("WALLET_LOOKBACK_DAYS") {
            Some(raw) => parse_number(&raw, "WALLET_LOOKBACK_DAYS")?,
            None => defaults.lookback_days,
        };

        Ok(Self {
            base_url: var("WALLET_BASE_URL").unwrap_or(defaults.base_url),
            access_token,
            user_agent: var("WALLET_USER_AGENT").unwrap_or(defaults.user_agent),
            request_timeout,
            max_requests_per_sec,
            lookback_days,
        })
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, WalletError> {
    raw.trim()
        .parse()
        .map_err(|_| WalletError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw)))
}
