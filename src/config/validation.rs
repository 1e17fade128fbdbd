use url::Url;

use crate::config::WalkConfig;
use crate::ConfigError;

/// Validates a walk configuration.
///
/// Runs synchronously before any network access: a config that fails here
/// never reaches the fetcher.
pub fn validate(config: &WalkConfig) -> Result<(), ConfigError> {
    validate_address(&config.address)
}

/// Validates the starting address: present and parseable as an absolute URL.
fn validate_address(address: &str) -> Result<(), ConfigError> {
    if address.is_empty() {
        return Err(ConfigError::MissingAddress);
    }

    Url::parse(address).map_err(|source| ConfigError::InvalidAddress {
        address: address.to_string(),
        source,
    })?;

    Ok(())
}
