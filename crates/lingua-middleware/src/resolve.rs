// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The language precedence chain.
//!
//! ```text
//! ?_language=xx-yy ──► Cookie _language ──► Accept-Language ──► default
//!   (redirect)           (no cookie write)    (first 5 chars)     (never redirects)
//! ```
//!
//! The first source that yields a non-empty value wins.

use std::fmt;
use std::sync::Arc;

use http::header::ACCEPT_LANGUAGE;
use http::request::Parts;
use http::{HeaderMap, Request, Uri};
use lingua_catalog::{BindStatus, CatalogBinding, EmbeddedCatalogs, TranslationEngine};
use lingua_config::I18nConfig;
use lingua_locale::{locale_to_tag, tag_to_locale};
use tracing::debug;

use crate::cookie::{read_cookie, CookieOptions};
use crate::locale::{Locale, Translator};

/// Accept-Language values shorter than this are ignored.
const MIN_ACCEPT_LANGUAGE_LEN: usize = 5;

/// Where the chosen language came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageSource {
	Parameter,
	Cookie,
	Header,
	Default,
}

impl LanguageSource {
	pub fn as_str(&self) -> &'static str {
		match self {
			LanguageSource::Parameter => "parameter",
			LanguageSource::Cookie => "cookie",
			LanguageSource::Header => "header",
			LanguageSource::Default => "default",
		}
	}
}

impl fmt::Display for LanguageSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Decision reached for one request, before any side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
	/// The tag as read from its source, not yet normalized.
	pub language_tag: String,
	pub source: LanguageSource,
	pub needs_cookie_write: bool,
	pub needs_redirect: bool,
}

impl ResolutionOutcome {
	/// Walk the precedence chain over already-extracted request values.
	///
	/// `cookie` must already be percent-decoded; `None` covers both absent
	/// and undecodable cookies.
	pub fn decide(
		default_language: &str,
		parameter: Option<&str>,
		cookie: Option<&str>,
		accept_language: Option<&str>,
	) -> Self {
		let non_empty = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);

		let (language_tag, source) = if let Some(tag) = non_empty(parameter) {
			(tag, LanguageSource::Parameter)
		} else if let Some(tag) = non_empty(cookie) {
			(tag, LanguageSource::Cookie)
		} else if let Some(tag) = accept_language.and_then(accept_language_prefix) {
			(tag, LanguageSource::Header)
		} else {
			(default_language.to_string(), LanguageSource::Default)
		};

		Self {
			language_tag,
			source,
			needs_cookie_write: source != LanguageSource::Cookie,
			needs_redirect: source == LanguageSource::Parameter,
		}
	}
}

/// Only the leading `xx-YY` of the header is considered.
fn accept_language_prefix(header: &str) -> Option<String> {
	if header.chars().count() < MIN_ACCEPT_LANGUAGE_LEN {
		return None;
	}
	Some(header.chars().take(MIN_ACCEPT_LANGUAGE_LEN).collect())
}

/// Everything the middleware needs to finish a request.
#[derive(Debug, Clone)]
pub struct Resolution {
	pub outcome: ResolutionOutcome,
	/// Locale identifier handed to the engine (`en_US`).
	pub locale_id: String,
	/// Canonical tag published to downstream handlers.
	pub locale: Locale,
	pub set_cookie: Option<CookieOptions>,
	/// `Location` of the redirect, when one should be issued.
	pub redirect_to: Option<String>,
}

/// Resolves the governing language of each request.
///
/// Cheap to clone; clones share configuration, engine and catalog binding.
#[derive(Clone)]
pub struct LanguageResolver {
	config: Arc<I18nConfig>,
	engine: Arc<dyn TranslationEngine>,
	binding: Arc<CatalogBinding>,
	binding_name: Arc<str>,
}

impl fmt::Debug for LanguageResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LanguageResolver")
			.field("config", &self.config)
			.field("binding", &self.binding)
			.finish_non_exhaustive()
	}
}

impl LanguageResolver {
	pub fn new(mut config: I18nConfig, engine: Arc<dyn TranslationEngine>) -> Self {
		let trimmed = config.sub_path.trim_end_matches('/').len();
		config.sub_path.truncate(trimmed);

		let binding = CatalogBinding::new(config.domain.clone(), config.directory.clone());
		Self {
			binding_name: Arc::from(config.context_binding_name.as_str()),
			binding: Arc::new(binding),
			config: Arc::new(config),
			engine,
		}
	}

	/// Bind embedded catalogs along with the configured directory.
	///
	/// Replaces the catalog binding, so call it before the resolver is shared.
	pub fn with_embedded_catalogs(mut self, embedded: EmbeddedCatalogs) -> Self {
		self.binding = Arc::new(
			CatalogBinding::new(self.config.domain.clone(), self.config.directory.clone())
				.with_embedded(embedded),
		);
		self
	}

	pub fn config(&self) -> &I18nConfig {
		&self.config
	}

	pub fn engine(&self) -> &Arc<dyn TranslationEngine> {
		&self.engine
	}

	/// Bind the catalog domain now instead of on the first request.
	pub fn bind_catalog(&self) -> BindStatus {
		self.binding.ensure_bound(self.engine.as_ref())
	}

	pub fn resolve_request<B>(&self, request: &Request<B>) -> Resolution {
		self.resolve(request.uri(), request.headers())
	}

	pub fn resolve_parts(&self, parts: &Parts) -> Resolution {
		self.resolve(&parts.uri, &parts.headers)
	}

	/// Run the precedence chain for one request and activate its locale.
	pub fn resolve(&self, uri: &Uri, headers: &HeaderMap) -> Resolution {
		self.resolve_with_form(uri, headers, None)
	}

	/// Like [`LanguageResolver::resolve`], also consulting a
	/// `application/x-www-form-urlencoded` body.
	///
	/// A parameter present in the body wins over the query string.
	pub fn resolve_with_form(
		&self,
		uri: &Uri,
		headers: &HeaderMap,
		form: Option<&[u8]>,
	) -> Resolution {
		let config = self.config.as_ref();

		let parameter = form
			.and_then(|body| form_value(body, &config.parameter_name))
			.or_else(|| {
				uri.query()
					.and_then(|query| form_value(query.as_bytes(), &config.parameter_name))
			});
		let cookie = read_cookie(headers, &config.cookie_name);
		let accept_language = headers
			.get(ACCEPT_LANGUAGE)
			.and_then(|value| value.to_str().ok());

		let outcome = ResolutionOutcome::decide(
			&config.default_language,
			parameter.as_deref(),
			cookie.as_deref(),
			accept_language,
		);

		let locale_id = tag_to_locale(&outcome.language_tag, false);
		self.bind_catalog();
		self.engine.set_active_locale(&locale_id);

		let locale = Locale {
			lang: locale_to_tag(&locale_id),
		};

		let set_cookie = outcome
			.needs_cookie_write
			.then(|| CookieOptions::language(config, &locale.lang));

		let redirect_to = (outcome.needs_redirect && config.redirect_on_parameter)
			.then(|| format!("{}{}", config.sub_path, uri.path()));

		debug!(
			source = %outcome.source,
			tag = %outcome.language_tag,
			locale = %locale_id,
			lang = %locale.lang,
			write_cookie = outcome.needs_cookie_write,
			redirect = redirect_to.is_some(),
			"resolved request language"
		);

		Resolution {
			outcome,
			locale_id,
			locale,
			set_cookie,
			redirect_to,
		}
	}

	/// A translator bound to the locale of `resolution`.
	pub fn translator(&self, resolution: &Resolution) -> Translator {
		Translator::new(
			resolution.locale.lang.clone(),
			resolution.locale_id.clone(),
			Arc::clone(&self.binding_name),
			Arc::clone(&self.engine),
		)
	}
}

/// First value of `name` in a URL-encoded query string or form body.
fn form_value(encoded: &[u8], name: &str) -> Option<String> {
	url::form_urlencoded::parse(encoded)
		.find(|(key, _)| key == name)
		.map(|(_, value)| value.into_owned())
}
