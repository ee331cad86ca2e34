// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lingua demo server: greets visitors in their resolved language.
//!
//! Routes:
//! - `GET /`, `POST /` - "Hello world!" translated for the request; a form
//!   post may carry the language parameter
//! - `GET /lang` - the canonical language tag of the request

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use lingua_catalog::{EmbeddedCatalogs, TranslationEngine};
use lingua_config::I18nConfig;
use lingua_middleware::{I18nLayer, Locale, Translator};

pub const GREETING: &str = "Hello world!";

const ZH_CN_MO: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/locales/zh_CN/example.mo"));
const ZH_TW_MO: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/locales/zh_TW/example.mo"));
const DE_MO: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/locales/de/example.mo"));
const FR_MO: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/locales/fr/example.mo"));
const ES_MO: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/locales/es/example.mo"));

/// Catalogs compiled from `locales/` at build time, keyed by locale identifier.
pub fn demo_catalogs() -> EmbeddedCatalogs {
	EmbeddedCatalogs::new()
		.with_catalog("zh_CN", ZH_CN_MO)
		.with_catalog("zh_TW", ZH_TW_MO)
		.with_catalog("de", DE_MO)
		.with_catalog("fr", FR_MO)
		.with_catalog("es", ES_MO)
}

/// Build the application router behind the language resolver.
///
/// On-disk catalogs under `i18n.directory` are consulted for locales the
/// embedded set does not cover.
pub fn create_router(i18n: I18nConfig, engine: Arc<dyn TranslationEngine>) -> Router {
	let layer = I18nLayer::new(i18n, engine).with_embedded_catalogs(demo_catalogs());

	Router::new()
		.route("/", get(hello).post(hello))
		.route("/lang", get(current_language))
		.layer(layer)
}

async fn hello(trans: Translator) -> String {
	trans.pgettext("", GREETING)
}

async fn current_language(locale: Locale) -> String {
	locale.lang
}
