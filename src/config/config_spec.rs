use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

/// Configuration specification with environment override → default priority
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Load a setting value with source tracking
    ///
    /// The environment variable wins when present, otherwise the default is used.
    /// Values from either source go through the same validation.
    pub fn load_setting_with_source(&self) -> Result<ConfigValue, ApplicationError> {
        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value, env_var)?;

                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable { name: env_var.clone() },
                });
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default, self.setting_name())?;

            return Ok(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            });
        }

        if self.required {
            return Err(ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason: "Required setting has no value from any source".to_string(),
            });
        }

        Ok(ConfigValue {
            value: String::new(),
            source: ConfigValueSource::Default,
        })
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), ApplicationError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason,
            })?;
        }

        Ok(())
    }
}

/// Parsing and validation helpers for setting values
impl ConfigSpec {
    /// Parse a port number, rejecting 0
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ApplicationError> {
        let port = value.trim().parse::<u16>().map_err(|e| ApplicationError::ParseError {
            setting_name: setting_name.to_string(),
            error: format!("Expected port number (1-65535), got '{}': {}", value, e),
        })?;

        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port number must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }

    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let port = value
            .parse::<u32>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if port < min as u32 || port > max as u32 {
            return Err(format!("Port {} is outside valid range {}-{}", port, min, max));
        }

        Ok(())
    }

    /// Accepts IPv4, IPv6 and hostnames; dotted quads are range-checked
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.contains(':') {
            if value.starts_with('[') && value.ends_with(']') && value.len() == 2 {
                return Err("Invalid IPv6 address format".to_string());
            }
            return Ok(());
        }

        let parts: Vec<&str> = value.split('.').collect();
        if parts.len() == 4 && parts.iter().all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())) {
            return Self::validate_ipv4_address(&parts);
        }

        if value.chars().any(char::is_whitespace) {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        Ok(())
    }

    fn validate_ipv4_address(octets: &[&str]) -> Result<(), String> {
        for octet in octets {
            if octet.len() > 1 && octet.starts_with('0') {
                return Err(format!("IPv4 octet '{}' has a leading zero", octet));
            }
            if octet.parse::<u8>().is_err() {
                return Err(format!("IPv4 octet '{}' is out of range", octet));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn spec_with(vars: &[(&str, &str)]) -> ConfigSpec {
        let env = vars
            .iter()
            .fold(MockEnvironment::empty(), |env, (k, v)| env.with_var(k, v));
        ConfigSpec::new(Arc::new(env))
    }

    #[test]
    fn test_env_override_takes_priority_over_default() {
        let value = spec_with(&[("PORT", "8080")])
            .env_override("PORT")
            .default_value("3000")
            .load_setting_with_source()
            .unwrap();

        assert_eq!(value.value, "8080");
        assert_eq!(value.source, ConfigValueSource::EnvironmentVariable { name: "PORT".to_string() });
    }

    #[test]
    fn test_default_used_when_env_missing() {
        let value = spec_with(&[])
            .env_override("PORT")
            .default_value("3000")
            .load_setting_with_source()
            .unwrap();

        assert_eq!(value.value, "3000");
        assert_eq!(value.source, ConfigValueSource::Default);
    }

    #[test]
    fn test_required_setting_without_value_fails() {
        let result = spec_with(&[])
            .env_override("PASSWORD_PEPPER")
            .required(true)
            .load_setting_with_source();

        match result {
            Err(ApplicationError::InvalidSetting { setting_name, .. }) => {
                assert_eq!(setting_name, "PASSWORD_PEPPER");
            }
            other => panic!("Expected InvalidSetting, got {:?}", other),
        }
    }

    #[test]
    fn test_min_length_applies_to_env_values() {
        let result = spec_with(&[("PASSWORD_PEPPER", "short")])
            .env_override("PASSWORD_PEPPER")
            .min_length(16)
            .load_setting_with_source();

        assert!(matches!(result, Err(ApplicationError::InvalidSetting { .. })));
    }

    #[test]
    fn test_host_validation() {
        assert!(ConfigSpec::validate_host_address("127.0.0.1").is_ok());
        assert!(ConfigSpec::validate_host_address("localhost").is_ok());
        assert!(ConfigSpec::validate_host_address("::1").is_ok());
        assert!(ConfigSpec::validate_host_address("256.1.1.1").is_err());
        assert!(ConfigSpec::validate_host_address("192.168.01.1").is_err());
        assert!(ConfigSpec::validate_host_address("").is_err());
    }

    #[test]
    fn test_port_range_validation() {
        assert!(ConfigSpec::validate_port_range("1", 1, 65535).is_ok());
        assert!(ConfigSpec::validate_port_range("65535", 1, 65535).is_ok());
        assert!(ConfigSpec::validate_port_range("0", 1, 65535).is_err());
        assert!(ConfigSpec::validate_port_range("65536", 1, 65535).is_err());
        assert!(ConfigSpec::validate_port_range("abc", 1, 65535).is_err());
    }
}
