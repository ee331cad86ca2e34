// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-scoped language resolution for axum.
//!
//! This crate provides:
//! - [`I18nLayer`] - a Tower layer resolving each request's language
//! - [`LanguageResolver`] - the precedence chain without any HTTP plumbing
//! - [`Locale`] and [`Translator`] - extractors for downstream handlers
//! - [`CookieOptions`] and [`read_cookie`] - language cookie helpers
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use axum::{routing::get, Router};
//! use lingua_catalog::GettextEngine;
//! use lingua_middleware::{I18nLayer, Translator};
//!
//! async fn hello(trans: Translator) -> String {
//!     trans.gettext("Hello world!")
//! }
//!
//! let app = Router::new()
//!     .route("/", get(hello))
//!     .layer(I18nLayer::new(config.i18n, Arc::new(GettextEngine::new())));
//! ```

pub mod cookie;
pub mod layer;
pub mod locale;
pub mod resolve;

pub use cookie::{read_cookie, CookieOptions, PERSISTENT_MAX_AGE};
pub use layer::{I18nFuture, I18nLayer, I18nService, PendingHeaders, FORM_BODY_LIMIT};
pub use locale::{Locale, Translator};
pub use resolve::{LanguageResolver, LanguageSource, Resolution, ResolutionOutcome};

/// Version of the language resolver.
pub fn version() -> &'static str {
	env!("CARGO_PKG_VERSION")
}
