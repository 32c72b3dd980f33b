//! API key lookup: environment first, then the system keyring

use keyring::Entry;

use super::error::ClaudeError;

/// Service name for keyring storage
const SERVICE_NAME: &str = "neethub";
/// Entry name for the API key
const API_KEY_ENTRY: &str = "anthropic-api-key";
/// Environment variable checked before the keyring
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Manages Claude API key storage
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Resolve the API key from the environment or the keyring
    pub fn get_api_key() -> Result<String, ClaudeError> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            let key = key.trim().to_string();
            if !key.is_empty() {
                return Ok(key);
            }
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| ClaudeError::KeyringError(e.to_string()))?;

        entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => ClaudeError::ApiKeyNotFound,
            _ => ClaudeError::KeyringError(e.to_string()),
        })
    }

    /// Store the API key in system keyring
    pub fn set_api_key(key: &str) -> Result<(), ClaudeError> {
        if !Self::validate_key_format(key) {
            return Err(ClaudeError::InvalidApiKey);
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| ClaudeError::KeyringError(e.to_string()))?;

        entry.set_password(key).map_err(|e| ClaudeError::KeyringError(e.to_string()))
    }

    /// Anthropic API keys start with "sk-ant-"
    fn validate_key_format(key: &str) -> bool {
        key.starts_with("sk-ant-") && key.len() > 20
    }

    /// Mask an API key for display
    pub fn mask_key(key: &str) -> String {
        if key.len() <= 12 {
            return "*".repeat(key.len());
        }
        format!("{}...{}", &key[..8], &key[key.len() - 4..])
    }
}
