use thiserror::Error;

use super::encryption::CryptoError;

/// Errors surfaced by the wallet client and the transaction search services
#[derive(Debug, Error)]
pub enum WalletError {
    /// Transport-level failure reaching the gateway (connect, timeout, non-JSON status)
    #[error("Request error: {0}")]
    Request(String),
    /// Session token missing, invalid or expired; the caller must log in again
    #[error("Token error: {0}")]
    Token(String),
    /// Gateway answered with a status code we do not recognise
    #[error("Unknown error code {code}")]
    Unknown { code: String },
    /// Malformed date range, amount or argument count
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Nothing matched the search
    #[error("Not found: {0}")]
    NotFound(String),
    /// Response body could not be decoded
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// Missing or malformed configuration value
    #[error("Config error: {0}")]
    Config(String),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl WalletError {
    /// True for errors that mean the caller has to re-authenticate
    pub fn is_token_error(&self) -> bool {
        matches!(self, WalletError::Token(_))
    }
}

/// Gateway status codes, as carried in the `code` field of every response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    Success,
    TokenInvalid,
    Other(String),
}

impl StatusCode {
    /// Classify a raw gateway code.
    ///
    /// `UPC-200` is the success code of the transaction APIs and plain `200` is what the
    /// legacy profile endpoints return.
    pub fn classify(code: &str) -> Self {
        match code {
            "UPC-200" | "200" => StatusCode::Success,
            "UPC-400" | "MAS-401" => StatusCode::TokenInvalid,
            other => StatusCode::Other(other.to_string()),
        }
    }

    /// Map a raw code to `Ok(())` or the matching error
    pub fn check(code: &str) -> Result<(), WalletError> {
        match Self::classify(code) {
            StatusCode::Success => Ok(()),
            StatusCode::TokenInvalid => Err(WalletError::Token("Token not found.".to_string())),
            StatusCode::Other(code) => Err(WalletError::Unknown { code }),
        }
    }
}
