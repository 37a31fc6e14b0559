//! # Configuration
//!
//! Both binaries read their settings from environment variables:
//!
//! * `GREETER_ADDRESS`: listen address (server) or target address (client).
//! * `GREETER_TIMEOUT_MS`: client call deadline in milliseconds.
//! * `GREETER_REFLECTION`: whether the server exposes gRPC reflection.
use greeter_core::client::DEFAULT_DEADLINE;
use std::time::Duration;

pub const ADDRESS_VAR: &str = "GREETER_ADDRESS";
pub const TIMEOUT_VAR: &str = "GREETER_TIMEOUT_MS";
pub const REFLECTION_VAR: &str = "GREETER_REFLECTION";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:50051";
pub const DEFAULT_CLIENT_ADDRESS: &str = "http://localhost:50051";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub address: String,
    pub reflection: bool,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let address = lookup(ADDRESS_VAR).unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());

        let reflection = match lookup(REFLECTION_VAR) {
            Some(value) => parse_bool(REFLECTION_VAR, value)?,
            None => true,
        };

        Ok(Self {
            address,
            reflection,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub address: String,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let address = lookup(ADDRESS_VAR).unwrap_or_else(|| DEFAULT_CLIENT_ADDRESS.to_string());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(value) => parse_millis(TIMEOUT_VAR, value)?,
            None => DEFAULT_DEADLINE,
        };

        Ok(Self { address, timeout })
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    let normalized = value.trim().to_ascii_lowercase();

    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_millis(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            var,
            value,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(ConfigError::InvalidValue {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let server = ServerSettings::from_lookup(env(&[])).unwrap();
        assert_eq!(server.address, DEFAULT_SERVER_ADDRESS);
        assert!(server.reflection);

        let client = ClientSettings::from_lookup(env(&[])).unwrap();
        assert_eq!(client.address, DEFAULT_CLIENT_ADDRESS);
        assert_eq!(client.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides() {
        let server = ServerSettings::from_lookup(env(&[
            (ADDRESS_VAR, "127.0.0.1:6000"),
            (REFLECTION_VAR, "off"),
        ]))
        .unwrap();
        assert_eq!(server.address, "127.0.0.1:6000");
        assert!(!server.reflection);

        let client = ClientSettings::from_lookup(env(&[(TIMEOUT_VAR, "250")])).unwrap();
        assert_eq!(client.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ClientSettings::from_lookup(env(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: TIMEOUT_VAR, .. }));

        assert!(ClientSettings::from_lookup(env(&[(TIMEOUT_VAR, "0")])).is_err());
        assert!(ServerSettings::from_lookup(env(&[(REFLECTION_VAR, "maybe")])).is_err());
    }
}
