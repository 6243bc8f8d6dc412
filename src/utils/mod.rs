pub mod encryption;
pub mod errors;
pub mod ratelimit;
pub mod table;

pub use encryption::{CryptoError, TokenCipher};
pub use errors::{StatusCode, WalletError};
pub use ratelimit::RequestThrottle;
pub use table::Table;
