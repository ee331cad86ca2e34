// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Message catalog support for Lingua.
//!
//! This crate provides:
//! - [`TranslationEngine`] - the interface the language resolver drives
//! - [`GettextEngine`] - an engine backed by GNU `.mo` catalogs
//! - [`CatalogBinding`] - a run-once gate for binding the catalog domain
//!
//! # Example
//!
//! ```no_run
//! use lingua_catalog::{CatalogBinding, GettextEngine, TranslationEngine};
//!
//! // Reads locale/<locale>/LC_MESSAGES/example.mo
//! let engine = GettextEngine::new();
//! let binding = CatalogBinding::new("example", "locale");
//!
//! binding.ensure_bound(&engine);
//! println!("{}", engine.gettext_for("zh_CN", "Hello world!"));
//! ```

mod binding;
#[cfg(test)]
mod compile;
mod engine;
mod error;
mod gettext_engine;

pub use binding::{BindStatus, CatalogBinding};
pub use engine::{EmbeddedCatalogs, TranslationEngine};
pub use error::CatalogError;
pub use gettext_engine::GettextEngine;
