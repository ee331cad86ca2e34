// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reading and writing the language cookie.

use std::fmt::Write as _;

use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};
use lingua_config::I18nConfig;

/// Largest positive 32-bit second count; the cookie effectively never expires.
pub const PERSISTENT_MAX_AGE: i64 = i32::MAX as i64;

/// Attributes of a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
	pub name: String,
	/// Plain value; percent-encoded when rendered.
	pub value: String,
	/// `Max-Age` in seconds. `None` makes a session cookie.
	pub max_age: Option<i64>,
	/// Defaults to `/`.
	pub path: String,
	pub domain: Option<String>,
	pub secure: bool,
	pub http_only: bool,
}

impl CookieOptions {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			max_age: None,
			path: "/".to_string(),
			domain: None,
			secure: false,
			http_only: false,
		}
	}

	/// The persistent language cookie described by `config`.
	pub fn language(config: &I18nConfig, lang: &str) -> Self {
		Self {
			max_age: Some(PERSISTENT_MAX_AGE),
			path: config.cookie_path(),
			domain: config.cookie_domain.clone(),
			secure: config.cookie_secure,
			http_only: config.cookie_http_only,
			..Self::new(config.cookie_name.as_str(), lang)
		}
	}

	pub fn with_max_age(mut self, seconds: i64) -> Self {
		self.max_age = Some(seconds);
		self
	}

	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
		self.domain = Some(domain.into());
		self
	}

	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	pub fn with_http_only(mut self, http_only: bool) -> Self {
		self.http_only = http_only;
		self
	}

	/// Render the `Set-Cookie` header value.
	pub fn to_header_string(&self) -> String {
		let mut out = format!("{}={}", self.name, urlencoding::encode(&self.value));
		if let Some(max_age) = self.max_age {
			let _ = write!(out, "; Max-Age={max_age}");
		}
		if !self.path.is_empty() {
			let _ = write!(out, "; Path={}", self.path);
		}
		if let Some(domain) = &self.domain {
			let _ = write!(out, "; Domain={domain}");
		}
		if self.secure {
			out.push_str("; Secure");
		}
		if self.http_only {
			out.push_str("; HttpOnly");
		}
		out
	}

	/// Render as a header value, or `None` if a configured attribute holds
	/// bytes a header cannot carry.
	pub fn to_header_value(&self) -> Option<HeaderValue> {
		HeaderValue::from_str(&self.to_header_string()).ok()
	}
}

/// Read cookie `name` from every `Cookie` header and percent-decode it.
///
/// Returns `None` when the cookie is absent or does not decode to UTF-8.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
	let raw = headers
		.get_all(COOKIE)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|value| value.split(';'))
		.find_map(|cookie| {
			let (key, value) = cookie.trim().split_once('=')?;
			(key == name).then_some(value)
		})?;

	let raw = raw.trim_matches('"');
	urlencoding::decode(raw).ok().map(|value| value.into_owned())
}
