use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{BalanceResponse, Profile, ProfileResponse, ReportDetail, ReportResponse, TransactionResponse};
use crate::api::TransactionSource;
use crate::config::WalletConfig;
use crate::models::{Page, PageQuery};
use crate::utils::{RequestThrottle, StatusCode, WalletError};

const HISTORY_PATH: &str = "/user-profile-composite/v1/users/transactions/history";
const PROFILE_PATH: &str = "/api/v1/profile";

/// Headers for one request, copied out of the session when the request starts.
///
/// Requests never read the session again after taking their snapshot, so replacing or
/// invalidating the token cannot change a request that is already in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSnapshot {
    access_token: String,
    user_agent: String,
}

impl HeaderSnapshot {
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    fn to_header_map(&self) -> Result<HeaderMap, WalletError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| WalletError::Config(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let auth = HeaderValue::from_str(&self.access_token)
            .map_err(|e| WalletError::Token(format!("Access token is not a valid header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth);

        Ok(headers)
    }
}

/// HTTP client for the wallet gateway
pub struct WalletClient {
    http_client: HttpClient,
    base_url: String,
    user_agent: String,
    access_token: RwLock<Option<String>>,
    throttle: RequestThrottle,
}

impl WalletClient {
    pub fn new(config: &WalletConfig) -> Result<Self, WalletError> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| WalletError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            access_token: RwLock::new(config.access_token.clone()),
            throttle: RequestThrottle::per_second(config.max_requests_per_sec),
        })
    }

    /// Client against a custom base URL with default settings (for testing)
    pub fn with_base_url(base_url: &str, access_token: Option<String>) -> Result<Self, WalletError> {
        let config = WalletConfig {
            base_url: base_url.to_string(),
            access_token,
            ..WalletConfig::default()
        };
        Self::new(&config)
    }

    /// Replace the session token. Requests already in flight keep the old one.
    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut slot = self.access_token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    /// Drop the session token; subsequent calls fail with a token error until a new
    /// token is set.
    pub fn invalidate_token(&self) {
        let mut slot = self.access_token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Take an immutable header snapshot for one request
    pub fn snapshot(&self) -> Result<HeaderSnapshot, WalletError> {
        match self.access_token() {
            Some(token) if !token.is_empty() => Ok(HeaderSnapshot {
                access_token: token,
                user_agent: self.user_agent.clone(),
            }),
            _ => Err(WalletError::Token("Token not found.".to_string())),
        }
    }

    /// GET a JSON body. Gateway errors arrive as a `code` in the body, often with a
    /// non-2xx status, so the body is decoded before the HTTP status is considered.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &HeaderSnapshot,
    ) -> Result<T, WalletError> {
        self.throttle.acquire().await;

        let response = self
            .http_client
            .get(url)
            .headers(headers.to_header_map()?)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WalletError::Request(format!("Request timed out: {}", e))
                } else {
                    WalletError::Request(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WalletError::Request(format!("Failed to read response: {}", e)))?;

        serde_json::from_str::<T>(&body).map_err(|e| {
            if status.is_success() {
                WalletError::Deserialization(format!("Failed to parse response: {}", e))
            } else {
                warn!("Gateway returned HTTP {} with undecodable body", status);
                WalletError::Request(format!("HTTP {}: {}", status.as_u16(), body))
            }
        })
    }

    /// GET the transaction history for one page query
    ///
    /// # Returns
    /// * `Ok(Page)` - Activities plus the reported total and page count
    /// * `Err(WalletError::Token)` - No token held, or the gateway rejected it
    /// * `Err(WalletError::Unknown)` - Any other gateway code
    pub async fn fetch_transactions(&self, query: &PageQuery) -> Result<Page, WalletError> {
        let headers = self.snapshot()?;
        let url = format!("{}{}", self.base_url, HISTORY_PATH);

        let mut params = vec![
            ("start_date", query.range.start_param()),
            ("end_date", query.range.end_param()),
            ("limit", query.limit.to_string()),
            ("page", query.page.to_string()),
        ];
        if let Some(kind) = &query.kind {
            params.push(("type", kind.clone()));
        }
        if let Some(action) = &query.action {
            params.push(("action", action.clone()));
        }

        debug!(
            "Fetching history {} page {} (limit {})",
            query.range, query.page, query.limit
        );

        let response: TransactionResponse = self.get_json(&url, &params, &headers).await?;
        StatusCode::check(&response.code)?;

        Ok(response.data.unwrap_or_default())
    }

    /// GET /transactions/history/detail/{report_id}
    pub async fn get_report(&self, report_id: &str) -> Result<ReportDetail, WalletError> {
        let headers = self.snapshot()?;
        let url = format!("{}{}/detail/{}", self.base_url, HISTORY_PATH, report_id);

        let response: ReportResponse = self.get_json(&url, &[], &headers).await?;
        reject_token_code(&response.code)?;

        response.data.ok_or(WalletError::Unknown { code: response.code })
    }

    /// GET /profile/{token}
    pub async fn get_profile(&self) -> Result<Profile, WalletError> {
        let headers = self.snapshot()?;
        let url = format!("{}{}/{}", self.base_url, PROFILE_PATH, headers.access_token());

        let response: ProfileResponse = self.get_json(&url, &[], &headers).await?;
        reject_token_code(&response.code)?;

        response.data.ok_or(WalletError::Unknown { code: response.code })
    }

    /// GET /profile/balance/{token}
    ///
    /// A response without a balance reads as `"0"`.
    pub async fn get_balance(&self) -> Result<String, WalletError> {
        let headers = self.snapshot()?;
        let url = format!("{}{}/balance/{}", self.base_url, PROFILE_PATH, headers.access_token());

        let response: BalanceResponse = self.get_json(&url, &[], &headers).await?;
        reject_token_code(&response.code)?;

        Ok(response
            .data
            .and_then(|data| data.current_balance)
            .unwrap_or_else(|| "0".to_string()))
    }
}

/// Profile-side endpoints do not share the history API's success code, so only a token
/// rejection is treated as an error there.
fn reject_token_code(code: &str) -> Result<(), WalletError> {
    match StatusCode::classify(code) {
        StatusCode::TokenInvalid => Err(WalletError::Token("Token not found.".to_string())),
        _ => Ok(()),
    }
}

#[async_trait]
impl TransactionSource for WalletClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, WalletError> {
        self.fetch_transactions(query).await
    }
}
