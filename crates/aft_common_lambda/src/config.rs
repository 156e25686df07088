use std::collections::HashMap;

use aft_common_core::error::{AftError, AftResult};
use serde::Deserialize;

use crate::logging::LoggingConfig;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_FORMAT: &str = "json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Process-level settings for a Lambda binary. Deployment values such as
/// table and role names are read from SSM at call time instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

impl RuntimeConfig {
    /// Reads `LOG_LEVEL` and `LOG_FORMAT` from the process environment.
    pub fn load() -> AftResult<Self> {
        Self::from_environment(config::Environment::default())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> AftResult<Self> {
        Self::from_environment(config::Environment::default().source(Some(vars)))
    }

    fn from_environment(environment: config::Environment) -> AftResult<Self> {
        config::Config::builder()
            .set_default("log_level", DEFAULT_LOG_LEVEL)
            .and_then(|builder| builder.set_default("log_format", DEFAULT_LOG_FORMAT))
            .map_err(|error| AftError::configuration(error.to_string()))?
            .add_source(environment)
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|error| AftError::configuration(format!("invalid runtime config: {error}")))
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_to_info_json() {
        let config = RuntimeConfig::from_vars(HashMap::new()).expect("defaults should load");

        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_level_and_format_from_environment() {
        let config =
            RuntimeConfig::from_vars(vars(&[("LOG_LEVEL", "debug"), ("LOG_FORMAT", "pretty")]))
                .expect("config should load");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.logging().level, "debug");
    }

    #[test]
    fn unknown_format_is_a_configuration_error() {
        let error = RuntimeConfig::from_vars(vars(&[("LOG_FORMAT", "xml")]))
            .expect_err("xml is not a log format");

        assert_eq!(error.kind(), "configuration");
    }
}
