// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Run-once catalog binding.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::engine::{EmbeddedCatalogs, TranslationEngine};

/// Result of the one-time catalog binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStatus {
	Bound,
	/// The engine rejected the binding. Lookups fall back to msgids.
	Failed,
}

/// Binds a catalog domain into a [`TranslationEngine`] exactly once.
///
/// Concurrent callers of [`CatalogBinding::ensure_bound`] block until the
/// single initializer has finished, then all observe the same status.
/// Share one binding (behind an `Arc`) per engine.
#[derive(Debug)]
pub struct CatalogBinding {
	domain: String,
	directory: PathBuf,
	embedded: Option<EmbeddedCatalogs>,
	status: OnceCell<BindStatus>,
}

impl CatalogBinding {
	pub fn new(domain: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
		Self {
			domain: domain.into(),
			directory: directory.into(),
			embedded: None,
			status: OnceCell::new(),
		}
	}

	pub fn with_embedded(mut self, embedded: EmbeddedCatalogs) -> Self {
		self.embedded = Some(embedded);
		self
	}

	pub fn domain(&self) -> &str {
		&self.domain
	}

	pub fn directory(&self) -> &Path {
		&self.directory
	}

	/// Bind the domain and make it active, unless that already happened.
	pub fn ensure_bound(&self, engine: &dyn TranslationEngine) -> BindStatus {
		*self.status.get_or_init(|| {
			match engine.bind_catalog(&self.domain, &self.directory, self.embedded.as_ref()) {
				Ok(()) => {
					engine.set_active_domain(&self.domain);
					info!(
						domain = %self.domain,
						directory = %self.directory.display(),
						"catalog domain bound"
					);
					BindStatus::Bound
				}
				Err(e) => {
					warn!(domain = %self.domain, error = %e, "failed to bind catalog domain");
					BindStatus::Failed
				}
			}
		})
	}

	/// The binding outcome, or `None` if no caller has bound yet.
	pub fn status(&self) -> Option<BindStatus> {
		self.status.get().copied()
	}

	pub fn is_bound(&self) -> bool {
		self.status() == Some(BindStatus::Bound)
	}
}
