// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Language resolution configuration.

use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_DOMAIN: &str = "martini";
pub const DEFAULT_DIRECTORY: &str = "locale";
pub const DEFAULT_LANGUAGE: &str = "zh_CN";
pub const DEFAULT_COOKIE_NAME: &str = "_language";
pub const DEFAULT_PARAMETER_NAME: &str = "_language";
pub const DEFAULT_CONTEXT_BINDING_NAME: &str = "trans";

/// Language resolution configuration (runtime, fully resolved).
///
/// Resolved once per resolver and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nConfig {
	/// Catalog domain (the `.mo` file stem).
	pub domain: String,
	/// Catalog search path, laid out as `<locale>/LC_MESSAGES/<domain>.mo`.
	pub directory: PathBuf,
	/// Language used when the request names none.
	pub default_language: String,
	/// URL prefix the application is mounted under, without a trailing `/`.
	pub sub_path: String,
	pub cookie_name: String,
	/// Query parameter that overrides the language.
	pub parameter_name: String,
	/// Redirect to the bare path after a query parameter override.
	pub redirect_on_parameter: bool,
	/// Name downstream templates expose the translator under.
	pub context_binding_name: String,
	pub cookie_domain: Option<String>,
	pub cookie_secure: bool,
	pub cookie_http_only: bool,
}

impl Default for I18nConfig {
	fn default() -> Self {
		I18nConfigLayer::default().finalize()
	}
}

impl I18nConfig {
	/// Path attribute for the language cookie.
	pub fn cookie_path(&self) -> String {
		format!("/{}", self.sub_path.trim_start_matches('/'))
	}
}

/// Language resolution configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct I18nConfigLayer {
	#[serde(default)]
	pub domain: Option<String>,
	#[serde(default)]
	pub directory: Option<PathBuf>,
	#[serde(default)]
	pub default_language: Option<String>,
	#[serde(default)]
	pub sub_path: Option<String>,
	#[serde(default)]
	pub cookie_name: Option<String>,
	#[serde(default)]
	pub parameter_name: Option<String>,
	#[serde(default)]
	pub redirect_on_parameter: Option<bool>,
	#[serde(default)]
	pub context_binding_name: Option<String>,
	#[serde(default)]
	pub cookie_domain: Option<String>,
	#[serde(default)]
	pub cookie_secure: Option<bool>,
	#[serde(default)]
	pub cookie_http_only: Option<bool>,
}

impl I18nConfigLayer {
	pub fn merge(&mut self, other: I18nConfigLayer) {
		if other.domain.is_some() {
			self.domain = other.domain;
		}
		if other.directory.is_some() {
			self.directory = other.directory;
		}
		if other.default_language.is_some() {
			self.default_language = other.default_language;
		}
		if other.sub_path.is_some() {
			self.sub_path = other.sub_path;
		}
		if other.cookie_name.is_some() {
			self.cookie_name = other.cookie_name;
		}
		if other.parameter_name.is_some() {
			self.parameter_name = other.parameter_name;
		}
		if other.redirect_on_parameter.is_some() {
			self.redirect_on_parameter = other.redirect_on_parameter;
		}
		if other.context_binding_name.is_some() {
			self.context_binding_name = other.context_binding_name;
		}
		if other.cookie_domain.is_some() {
			self.cookie_domain = other.cookie_domain;
		}
		if other.cookie_secure.is_some() {
			self.cookie_secure = other.cookie_secure;
		}
		if other.cookie_http_only.is_some() {
			self.cookie_http_only = other.cookie_http_only;
		}
	}

	/// Resolve into a runtime config. Empty strings count as unset.
	pub fn finalize(self) -> I18nConfig {
		I18nConfig {
			domain: non_empty_or(self.domain, DEFAULT_DOMAIN),
			directory: self
				.directory
				.filter(|d| !d.as_os_str().is_empty())
				.unwrap_or_else(|| PathBuf::from(DEFAULT_DIRECTORY)),
			default_language: non_empty_or(self.default_language, DEFAULT_LANGUAGE),
			sub_path: self
				.sub_path
				.map(|s| s.trim_end_matches('/').to_string())
				.unwrap_or_default(),
			cookie_name: non_empty_or(self.cookie_name, DEFAULT_COOKIE_NAME),
			parameter_name: non_empty_or(self.parameter_name, DEFAULT_PARAMETER_NAME),
			redirect_on_parameter: self.redirect_on_parameter.unwrap_or(true),
			context_binding_name: non_empty_or(
				self.context_binding_name,
				DEFAULT_CONTEXT_BINDING_NAME,
			),
			cookie_domain: self.cookie_domain.filter(|d| !d.is_empty()),
			cookie_secure: self.cookie_secure.unwrap_or(false),
			cookie_http_only: self.cookie_http_only.unwrap_or(false),
		}
	}
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
	value
		.filter(|v| !v.is_empty())
		.unwrap_or_else(|| default.to_string())
}
