// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the Lingua server and resolver.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`LINGUA_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use lingua_config::load_config;
//!
//! let config = load_config()?;
//! println!("Default language: {}", config.i18n.default_language);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub i18n: I18nConfig,
}

impl ServerConfig {
	/// Address the demo server listens on.
	pub fn socket_addr(&self) -> String {
		self.http.socket_addr()
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`LINGUA_SERVER_*`)
/// 2. Config file (`/etc/lingua/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![Box::new(EnvSource)])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and finalize.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let i18n = layer.i18n.unwrap_or_default().finalize();

	validate_config(&i18n)?;

	info!(
		host = %http.host,
		port = http.port,
		domain = %i18n.domain,
		directory = %i18n.directory.display(),
		default_language = %i18n.default_language,
		redirect_on_parameter = i18n.redirect_on_parameter,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		logging,
		i18n,
	})
}

/// Cookie and parameter names end up in headers and URLs verbatim.
fn validate_config(i18n: &I18nConfig) -> Result<(), ConfigError> {
	for (key, value) in [
		("i18n.cookie_name", &i18n.cookie_name),
		("i18n.parameter_name", &i18n.parameter_name),
	] {
		if !value.chars().all(is_token_char) {
			return Err(ConfigError::InvalidSetting {
				key,
				reason: format!("must only contain letters, digits, '-', '_' or '.', got '{value}'"),
			});
		}
	}

	if i18n.sub_path.contains('?') {
		return Err(ConfigError::InvalidSetting {
			key: "i18n.sub_path",
			reason: format!("must not contain a query string, got '{}'", i18n.sub_path),
		});
	}

	Ok(())
}

fn is_token_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FixedSource(Precedence, ServerConfigLayer);

	impl ConfigSource for FixedSource {
		fn name(&self) -> &'static str {
			"fixed"
		}

		fn precedence(&self) -> Precedence {
			self.0
		}

		fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
			Ok(self.1.clone())
		}
	}

	fn i18n_layer(domain: &str) -> ServerConfigLayer {
		ServerConfigLayer {
			i18n: Some(I18nConfigLayer {
				domain: Some(domain.to_string()),
				..Default::default()
			}),
			..Default::default()
		}
	}

	#[test]
	fn test_higher_precedence_wins_regardless_of_order() {
		let config = load_from_sources(vec![
			Box::new(FixedSource(Precedence::Environment, i18n_layer("from-env"))),
			Box::new(FixedSource(Precedence::ConfigFile, i18n_layer("from-file"))),
		])
		.unwrap();
		assert_eq!(config.i18n.domain, "from-env");
	}

	#[test]
	fn test_empty_sources_yield_defaults() {
		let config = load_from_sources(Vec::new()).unwrap();
		assert_eq!(config.i18n, I18nConfig::default());
		assert_eq!(config.socket_addr(), "0.0.0.0:3000");
	}

	#[test]
	fn test_invalid_cookie_name_rejected() {
		let i18n = I18nConfig {
			cookie_name: "lang; Path=/evil".to_string(),
			..Default::default()
		};
		let result = validate_config(&i18n);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("i18n.cookie_name"));
	}

	#[test]
	fn test_sub_path_with_query_rejected() {
		let i18n = I18nConfig {
			sub_path: "/app?x=1".to_string(),
			..Default::default()
		};
		assert!(validate_config(&i18n).is_err());
	}

	#[test]
	fn test_default_config_is_valid() {
		assert!(validate_config(&I18nConfig::default()).is_ok());
	}

	#[test]
	fn test_load_config_with_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("server.toml");
		std::fs::write(&path, "[i18n]\ndefault_language = \"en-US\"\n").unwrap();

		let config = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(TomlSource::new(&path)),
		])
		.unwrap();
		assert_eq!(config.i18n.default_language, "en-US");
	}
}
