// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalog error types.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
	#[error("Invalid catalog domain: {0:?}")]
	InvalidDomain(String),

	#[error("Failed to read catalog {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse catalog for locale {locale}: {source}")]
	Parse {
		locale: String,
		#[source]
		source: gettext::Error,
	},
}
