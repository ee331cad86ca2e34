// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Errors raised while loading or validating the server configuration.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A `LINGUA_SERVER_*` variable did not parse as the type it configures.
	#[error("environment variable {var}='{value}' is not a valid {expected}")]
	InvalidEnvVar {
		var: String,
		value: String,
		expected: &'static str,
	},

	#[error("config file {path} is not valid TOML: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("cannot read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A resolved setting would produce a broken header, URL or listener.
	#[error("{key} {reason}")]
	InvalidSetting { key: &'static str, reason: String },
}
