//! Configuration module for the point-of-service core.
//!
//! Configuration is loaded from a TOML file, with `${VAR}` and
//! `${VAR:-default}` environment variable interpolation applied before
//! parsing. Parsing always validates; an invalid configuration never
//! reaches the engine builder.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message, drop the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the point-of-service core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for this point-of-service instance.
	pub pos: PosConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
}

/// Configuration for this point-of-service instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PosConfig {
	/// Identifier for this instance, shown in logs.
	pub id: String,
	/// Artificial login latency in milliseconds, standing in for the
	/// round-trip to an auth service. Defaults to 800.
	#[serde(default = "default_login_delay_ms")]
	pub login_delay_ms: u64,
}

/// Returns the default login delay in milliseconds.
fn default_login_delay_ms() -> u64 {
	800
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable
/// VAR_NAME. Supports default values with ${VAR_NAME:-default_value}.
/// Input is limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).expect("capture 0 always present");
		let var_name = cap.get(1).expect("group 1 always present").as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a file.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let raw = tokio::fs::read_to_string(path).await?;
		raw.parse()
	}

	/// Validates the configuration.
	///
	/// - the instance id must not be empty
	/// - at least one storage implementation must be configured
	/// - the primary storage name must refer to a configured implementation
	fn validate(&self) -> Result<(), ConfigError> {
		if self.pos.id.is_empty() {
			return Err(ConfigError::Validation("Instance id cannot be empty".into()));
		}

		if self.storage.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one storage implementation must be configured".into(),
			));
		}
		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Storage primary implementation cannot be empty".into(),
			));
		}
		if !self
			.storage
			.implementations
			.contains_key(&self.storage.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary storage '{}' not found in implementations",
				self.storage.primary
			)));
		}

		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r#"
[pos]
id = "demo-pos"

[storage]
primary = "memory"
[storage.implementations.memory]
"#;

	#[test]
	fn test_minimal_config_parses() {
		let config: Config = MINIMAL.parse().unwrap();
		assert_eq!(config.pos.id, "demo-pos");
		assert_eq!(config.pos.login_delay_ms, 800);
		assert_eq!(config.storage.primary, "memory");
	}

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("POS_TEST_ID", "till-3");

		let input = "id = \"${POS_TEST_ID}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "id = \"till-3\"");

		std::env::remove_var("POS_TEST_ID");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${POS_MISSING_VAR:-fallback}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"fallback\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${POS_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("POS_MISSING_VAR"));
	}

	#[test]
	fn test_empty_id_rejected() {
		let raw = r#"
[pos]
id = ""

[storage]
primary = "memory"
[storage.implementations.memory]
"#;
		let result: Result<Config, _> = raw.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_unknown_primary_rejected() {
		let raw = r#"
[pos]
id = "demo-pos"

[storage]
primary = "redis"
[storage.implementations.memory]
"#;
		let err = raw.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("redis"));
	}

	#[test]
	fn test_no_implementations_rejected() {
		let raw = r#"
[pos]
id = "demo-pos"

[storage]
primary = "memory"
implementations = {}
"#;
		let result: Result<Config, _> = raw.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_explicit_login_delay() {
		let raw = r#"
[pos]
id = "demo-pos"
login_delay_ms = 50

[storage]
primary = "file"
[storage.implementations.file]
storage_path = "/tmp/pos-data"
"#;
		let config: Config = raw.parse().unwrap();
		assert_eq!(config.pos.login_delay_ms, 50);
		let file_section = &config.storage.implementations["file"];
		assert_eq!(
			file_section.get("storage_path").and_then(|v| v.as_str()),
			Some("/tmp/pos-data")
		);
	}
}
