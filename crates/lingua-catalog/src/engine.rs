// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The translation engine interface consumed by the resolver.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::CatalogError;

/// Compiled `.mo` catalogs shipped inside the binary, keyed by locale identifier.
///
/// Embedded catalogs take precedence over files found in the catalog directory.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedCatalogs {
	catalogs: HashMap<String, Arc<[u8]>>,
}

impl EmbeddedCatalogs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a catalog for `locale` (e.g. `en_US`).
	pub fn with_catalog(mut self, locale: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
		self.insert(locale, data);
		self
	}

	pub fn insert(&mut self, locale: impl Into<String>, data: impl Into<Arc<[u8]>>) {
		self.catalogs.insert(locale.into(), data.into());
	}

	pub fn get(&self, locale: &str) -> Option<&[u8]> {
		self.catalogs.get(locale).map(|data| data.as_ref())
	}

	pub fn locales(&self) -> impl Iterator<Item = &str> {
		self.catalogs.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.catalogs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.catalogs.is_empty()
	}
}

/// A process-wide message catalog engine.
///
/// The resolver binds the configured domain once, then sets the active
/// locale on every request. Handlers that must not race with other requests
/// should use the `*_for` lookups, which take the locale explicitly.
pub trait TranslationEngine: Send + Sync {
	/// Register where catalogs for `domain` live.
	fn bind_catalog(
		&self,
		domain: &str,
		directory: &Path,
		embedded: Option<&EmbeddedCatalogs>,
	) -> Result<(), CatalogError>;

	fn set_active_domain(&self, domain: &str);

	fn set_active_locale(&self, locale: &str);

	fn active_locale(&self) -> Option<String>;

	/// Look up `msgid` under `context` in the active domain for `locale`.
	///
	/// An empty context means no context. Returns `msgid` unchanged when no
	/// translation exists.
	fn pgettext_for(&self, locale: &str, context: &str, msgid: &str) -> String;

	fn gettext_for(&self, locale: &str, msgid: &str) -> String {
		self.pgettext_for(locale, "", msgid)
	}

	/// Look up `msgid` for the active locale.
	fn gettext(&self, msgid: &str) -> String {
		self.pgettext("", msgid)
	}

	fn pgettext(&self, context: &str, msgid: &str) -> String {
		match self.active_locale() {
			Some(locale) => self.pgettext_for(&locale, context, msgid),
			None => msgid.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_embedded_catalogs_lookup() {
		let embedded = EmbeddedCatalogs::new()
			.with_catalog("en_US", b"en".to_vec())
			.with_catalog("zh_CN", b"zh".to_vec());

		assert_eq!(embedded.len(), 2);
		assert!(!embedded.is_empty());
		assert_eq!(embedded.get("en_US"), Some(&b"en"[..]));
		assert!(embedded.get("fr_FR").is_none());

		let mut locales: Vec<_> = embedded.locales().collect();
		locales.sort_unstable();
		assert_eq!(locales, ["en_US", "zh_CN"]);
	}

	#[test]
	fn test_embedded_catalogs_insert_replaces() {
		let mut embedded = EmbeddedCatalogs::new();
		embedded.insert("de", b"old".to_vec());
		embedded.insert("de", b"new".to_vec());
		assert_eq!(embedded.len(), 1);
		assert_eq!(embedded.get("de"), Some(&b"new"[..]));
	}
}
