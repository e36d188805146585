// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::FixlineConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &FixlineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if let Some(token) = &config.server.bearer_token {
        if token.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "server.bearer_token must not be empty when set (omit it to disable auth)"
                    .to_string(),
            });
        }
    }

    const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{}` is not one of: {}",
                config.service.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = FixlineConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_host_fails_validation() {
        let mut config = FixlineConfig::default();
        config.server.host = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("server.host"))));
    }

    #[test]
    fn empty_bearer_token_fails_validation() {
        let mut config = FixlineConfig::default();
        config.server.bearer_token = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("bearer_token"))));
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = FixlineConfig::default();
        config.service.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = FixlineConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.bearer_token = Some("secret".to_string());
        config.storage.database_path = "/tmp/fixline.db".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
