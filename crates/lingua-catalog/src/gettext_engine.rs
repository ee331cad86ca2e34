// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Gettext-backed [`TranslationEngine`].
//!
//! Catalogs are looked up as `<directory>/<locale>/LC_MESSAGES/<domain>.mo`,
//! or taken from the embedded payloads registered with the domain. Parsed
//! catalogs are cached per `(domain, locale)` until the domain is rebound.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gettext::Catalog;
use lingua_locale::{locale_to_tag, tag_to_locale, LOCALE_SEPARATOR};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::engine::{EmbeddedCatalogs, TranslationEngine};
use crate::error::CatalogError;

const MESSAGES_DIR: &str = "LC_MESSAGES";

#[derive(Debug, Clone)]
struct DomainBinding {
	directory: PathBuf,
	embedded: Option<EmbeddedCatalogs>,
}

#[derive(Debug, Default)]
struct ActiveState {
	domain: Option<String>,
	locale: Option<String>,
}

/// Translation engine backed by GNU `.mo` catalogs.
#[derive(Default)]
pub struct GettextEngine {
	bindings: RwLock<HashMap<String, DomainBinding>>,
	catalogs: RwLock<HashMap<(String, String), Arc<Catalog>>>,
	active: RwLock<ActiveState>,
}

impl GettextEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn active_domain(&self) -> Option<String> {
		self.active.read().domain.clone()
	}

	/// Return the catalog for `domain` and `locale`, loading it on first use.
	///
	/// Unknown domains and locales without any catalog yield an empty
	/// catalog, which translates every msgid to itself.
	fn catalog(&self, domain: &str, locale: &str) -> Arc<Catalog> {
		let key = (domain.to_string(), locale.to_string());
		if let Some(catalog) = self.catalogs.read().get(&key) {
			return Arc::clone(catalog);
		}

		let binding = self.bindings.read().get(domain).cloned();
		let catalog = Arc::new(match binding {
			Some(binding) => load_catalog(domain, locale, &binding),
			None => {
				debug!(domain, "no catalog bound for domain");
				Catalog::empty()
			}
		});

		Arc::clone(self.catalogs.write().entry(key).or_insert(catalog))
	}
}

impl TranslationEngine for GettextEngine {
	fn bind_catalog(
		&self,
		domain: &str,
		directory: &Path,
		embedded: Option<&EmbeddedCatalogs>,
	) -> Result<(), CatalogError> {
		if domain.is_empty() {
			return Err(CatalogError::InvalidDomain(domain.to_string()));
		}

		let embedded = embedded.filter(|e| !e.is_empty()).cloned();
		if !directory.is_dir() && embedded.is_none() {
			warn!(
				domain,
				directory = %directory.display(),
				"catalog directory not found, messages will not be translated"
			);
		}

		debug!(
			domain,
			directory = %directory.display(),
			embedded = embedded.as_ref().map_or(0, EmbeddedCatalogs::len),
			"binding catalog domain"
		);

		self.bindings.write().insert(
			domain.to_string(),
			DomainBinding {
				directory: directory.to_path_buf(),
				embedded,
			},
		);
		self.catalogs.write().retain(|(d, _), _| d != domain);
		Ok(())
	}

	fn set_active_domain(&self, domain: &str) {
		self.active.write().domain = Some(domain.to_string());
	}

	fn set_active_locale(&self, locale: &str) {
		self.active.write().locale = Some(locale.to_string());
	}

	fn active_locale(&self) -> Option<String> {
		self.active.read().locale.clone()
	}

	fn pgettext_for(&self, locale: &str, context: &str, msgid: &str) -> String {
		let Some(domain) = self.active_domain() else {
			return msgid.to_string();
		};

		let catalog = self.catalog(&domain, locale);
		if context.is_empty() {
			catalog.gettext(msgid).to_string()
		} else {
			catalog.pgettext(context, msgid).to_string()
		}
	}
}

/// Locale identifiers to try, most specific first.
///
/// `zh_cn` also tries the canonical `zh_CN`, and any regional locale falls
/// back to its bare language.
fn candidate_locales(locale: &str) -> Vec<String> {
	let mut candidates = vec![locale.to_string()];

	let canonical = tag_to_locale(&locale_to_tag(locale), false);
	if !candidates.contains(&canonical) {
		candidates.push(canonical);
	}

	if let Some((language, _)) = locale.split_once(LOCALE_SEPARATOR) {
		let language = language.to_lowercase();
		if !candidates.contains(&language) {
			candidates.push(language);
		}
	}

	candidates
}

fn load_catalog(domain: &str, locale: &str, binding: &DomainBinding) -> Catalog {
	for candidate in candidate_locales(locale) {
		let loaded = match binding.embedded.as_ref().and_then(|e| e.get(&candidate)) {
			Some(data) => Some(parse_catalog(&candidate, data)),
			None => read_catalog_file(&binding.directory, domain, &candidate),
		};

		match loaded {
			Some(Ok(catalog)) => {
				debug!(domain, locale, resolved = %candidate, "loaded catalog");
				return catalog;
			}
			Some(Err(e)) => {
				warn!(domain, locale = %candidate, error = %e, "failed to load catalog");
			}
			None => {}
		}
	}

	debug!(domain, locale, "no catalog found, using msgids");
	Catalog::empty()
}

fn read_catalog_file(
	directory: &Path,
	domain: &str,
	locale: &str,
) -> Option<Result<Catalog, CatalogError>> {
	let path = directory
		.join(locale)
		.join(MESSAGES_DIR)
		.join(format!("{domain}.mo"));
	if !path.is_file() {
		return None;
	}

	Some(
		std::fs::read(&path)
			.map_err(|source| CatalogError::FileRead {
				path: path.clone(),
				source,
			})
			.and_then(|data| parse_catalog(locale, &data)),
	)
}

fn parse_catalog(locale: &str, data: &[u8]) -> Result<Catalog, CatalogError> {
	Catalog::parse(data).map_err(|source| CatalogError::Parse {
		locale: locale.to_string(),
		source,
	})
}
