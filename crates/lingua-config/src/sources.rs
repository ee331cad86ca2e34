// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{HttpConfigLayer, I18nConfigLayer, LoggingConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/lingua/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: LINGUA_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl EnvSource {
	/// Build a layer from an arbitrary variable lookup.
	pub fn load_with<F>(lookup: F) -> Result<ServerConfigLayer, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let vars = EnvVars { lookup };
		Ok(ServerConfigLayer {
			http: Some(load_http(&vars)?),
			logging: Some(load_logging(&vars)),
			i18n: Some(load_i18n(&vars)),
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Self::load_with(|name| std::env::var(name).ok())
	}
}

struct EnvVars<F> {
	lookup: F,
}

impl<F> EnvVars<F>
where
	F: Fn(&str) -> Option<String>,
{
	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self
			.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn u16(&self, name: &str) -> Result<Option<u16>, ConfigError> {
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidEnvVar {
				var: name.to_string(),
				value: v,
				expected: "port number",
			}),
			None => Ok(None),
		}
	}
}

fn load_http<F>(vars: &EnvVars<F>) -> Result<HttpConfigLayer, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	Ok(HttpConfigLayer {
		host: vars.var("LINGUA_SERVER_HOST"),
		port: vars.u16("LINGUA_SERVER_PORT")?,
	})
}

fn load_logging<F>(vars: &EnvVars<F>) -> LoggingConfigLayer
where
	F: Fn(&str) -> Option<String>,
{
	LoggingConfigLayer {
		level: vars.var("LINGUA_SERVER_LOG_LEVEL"),
	}
}

fn load_i18n<F>(vars: &EnvVars<F>) -> I18nConfigLayer
where
	F: Fn(&str) -> Option<String>,
{
	I18nConfigLayer {
		domain: vars.var("LINGUA_SERVER_I18N_DOMAIN"),
		directory: vars.var("LINGUA_SERVER_I18N_DIRECTORY").map(PathBuf::from),
		default_language: vars.var("LINGUA_SERVER_I18N_DEFAULT_LANGUAGE"),
		sub_path: vars.var("LINGUA_SERVER_I18N_SUB_PATH"),
		cookie_name: vars.var("LINGUA_SERVER_I18N_COOKIE_NAME"),
		parameter_name: vars.var("LINGUA_SERVER_I18N_PARAMETER_NAME"),
		redirect_on_parameter: vars.bool("LINGUA_SERVER_I18N_REDIRECT_ON_PARAMETER"),
		context_binding_name: vars.var("LINGUA_SERVER_I18N_CONTEXT_BINDING_NAME"),
		cookie_domain: vars.var("LINGUA_SERVER_I18N_COOKIE_DOMAIN"),
		cookie_secure: vars.bool("LINGUA_SERVER_I18N_COOKIE_SECURE"),
		cookie_http_only: vars.bool("LINGUA_SERVER_I18N_COOKIE_HTTP_ONLY"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name| vars.get(name).cloned()
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.i18n.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let source = TomlSource::new("/nonexistent/config.toml");
		let layer = source.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.i18n.is_none());
	}

	#[test]
	fn test_toml_source_reads_sections() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("server.toml");
		std::fs::write(
			&path,
			r#"
[http]
port = 9000

[i18n]
domain = "example"
parameter_name = "lang"
"#,
		)
		.unwrap();

		let layer = TomlSource::new(&path).load().unwrap();
		assert_eq!(layer.http.unwrap().port, Some(9000));
		let i18n = layer.i18n.unwrap();
		assert_eq!(i18n.domain.as_deref(), Some("example"));
		assert_eq!(i18n.parameter_name.as_deref(), Some("lang"));
	}

	#[test]
	fn test_toml_source_invalid_file_errors() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("server.toml");
		std::fs::write(&path, "[i18n\ndomain = ").unwrap();

		let result = TomlSource::new(&path).load();
		assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn test_env_source_reads_i18n_vars() {
		let layer = EnvSource::load_with(lookup(&[
			("LINGUA_SERVER_I18N_DOMAIN", "example"),
			("LINGUA_SERVER_I18N_PARAMETER_NAME", "lang"),
			("LINGUA_SERVER_I18N_REDIRECT_ON_PARAMETER", "false"),
			("LINGUA_SERVER_I18N_COOKIE_SECURE", "1"),
			("LINGUA_SERVER_I18N_SUB_PATH", ""),
		]))
		.unwrap();

		let i18n = layer.i18n.unwrap();
		assert_eq!(i18n.domain.as_deref(), Some("example"));
		assert_eq!(i18n.parameter_name.as_deref(), Some("lang"));
		assert_eq!(i18n.redirect_on_parameter, Some(false));
		assert_eq!(i18n.cookie_secure, Some(true));
		assert!(i18n.sub_path.is_none());
		assert!(i18n.cookie_name.is_none());
	}

	#[test]
	fn test_env_source_invalid_port() {
		let result = EnvSource::load_with(lookup(&[("LINGUA_SERVER_PORT", "eighty")]));
		match result {
			Err(ConfigError::InvalidEnvVar { var, value, .. }) => {
				assert_eq!(var, "LINGUA_SERVER_PORT");
				assert_eq!(value, "eighty");
			}
			other => panic!("expected InvalidEnvVar, got {other:?}"),
		}
	}
}
