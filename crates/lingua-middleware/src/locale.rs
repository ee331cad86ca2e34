// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-request language values published by [`crate::I18nLayer`].
//!
//! Handlers pick them up as extractors:
//!
//! ```ignore
//! async fn hello(locale: Locale, trans: Translator) -> String {
//!     format!("[{}] {}", locale.lang, trans.gettext("Hello world!"))
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lingua_catalog::TranslationEngine;
use lingua_locale::{locale_to_tag, tag_to_locale};
use tracing::{instrument, warn};

/// The governing language of the current request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
	/// Canonical lower-case language tag, e.g. `en-us`.
	pub lang: String,
}

impl Locale {
	pub fn new(lang: impl Into<String>) -> Self {
		Self { lang: lang.into() }
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.lang)
	}
}

/// Looks messages up in the request's locale.
///
/// Lookups always name the locale explicitly, so concurrent requests in
/// different languages never observe each other's active locale.
#[derive(Clone)]
pub struct Translator {
	lang: String,
	locale_id: String,
	binding_name: Arc<str>,
	engine: Arc<dyn TranslationEngine>,
}

impl fmt::Debug for Translator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Translator")
			.field("lang", &self.lang)
			.field("locale_id", &self.locale_id)
			.field("binding_name", &self.binding_name)
			.finish_non_exhaustive()
	}
}

impl Translator {
	pub fn new(
		lang: impl Into<String>,
		locale_id: impl Into<String>,
		binding_name: Arc<str>,
		engine: Arc<dyn TranslationEngine>,
	) -> Self {
		Self {
			lang: lang.into(),
			locale_id: locale_id.into(),
			binding_name,
			engine,
		}
	}

	pub fn lang(&self) -> &str {
		&self.lang
	}

	pub fn locale_id(&self) -> &str {
		&self.locale_id
	}

	/// Name templates should expose this translator under.
	pub fn binding_name(&self) -> &str {
		&self.binding_name
	}

	/// A translator for another language tag, sharing this one's engine.
	///
	/// Only lookups made through the returned translator change language;
	/// the request's published [`Locale`] and cookie are untouched.
	pub fn with_locale(&self, tag: &str) -> Translator {
		let locale_id = tag_to_locale(tag, false);
		Translator {
			lang: locale_to_tag(&locale_id),
			locale_id,
			binding_name: Arc::clone(&self.binding_name),
			engine: Arc::clone(&self.engine),
		}
	}

	pub fn gettext(&self, msgid: &str) -> String {
		self.engine.gettext_for(&self.locale_id, msgid)
	}

	/// An empty `context` behaves like [`Translator::gettext`].
	pub fn pgettext(&self, context: &str, msgid: &str) -> String {
		self.engine.pgettext_for(&self.locale_id, context, msgid)
	}
}

fn missing_layer(kind: &'static str) -> Response {
	warn!(kind, "language extractor used on a route without I18nLayer");
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		"language resolution is not configured for this route",
	)
		.into_response()
}

impl<S> FromRequestParts<S> for Locale
where
	S: Send + Sync,
{
	type Rejection = Response;

	#[instrument(name = "Locale::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<Locale>()
			.cloned()
			.ok_or_else(|| missing_layer("locale"))
	}
}

impl<S> FromRequestParts<S> for Translator
where
	S: Send + Sync,
{
	type Rejection = Response;

	#[instrument(name = "Translator::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<Translator>()
			.cloned()
			.ok_or_else(|| missing_layer("translator"))
	}
}
