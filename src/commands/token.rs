use truewallet::utils::TokenCipher;
use truewallet::WalletError;

/// Print the sealed form of `token` under TOKEN_ENCRYPTION_KEY
pub fn execute(token: &str) -> Result<(), WalletError> {
    let key = std::env::var("TOKEN_ENCRYPTION_KEY")
        .map_err(|_| WalletError::Config("TOKEN_ENCRYPTION_KEY not set in environment".to_string()))?;

    let sealed = TokenCipher::from_hex_key(&key)?.seal(token)?;
    println!("{}", sealed);
    Ok(())
}
