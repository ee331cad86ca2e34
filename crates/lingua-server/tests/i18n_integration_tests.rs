// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end language resolution through the demo router.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use lingua_catalog::GettextEngine;
use lingua_config::{load_from_sources, EnvSource, I18nConfig, I18nConfigLayer};
use lingua_server::create_router;
use tower::ServiceExt;

fn config() -> I18nConfig {
	I18nConfigLayer {
		domain: Some("example".to_string()),
		parameter_name: Some("lang".to_string()),
		..Default::default()
	}
	.finalize()
}

fn app(config: I18nConfig) -> Router {
	create_router(config, Arc::new(GettextEngine::new()))
}

async fn get(app: Router, request: Request<Body>) -> Response {
	app.oneshot(request).await.unwrap()
}

async fn body_string(response: Response) -> String {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	String::from_utf8(bytes.to_vec()).unwrap()
}

fn set_cookie(response: &Response) -> Option<String> {
	response
		.headers()
		.get(SET_COOKIE)
		.map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn default_language_greets_in_chinese() {
	let response = get(app(config()), Request::get("/").body(Body::empty()).unwrap()).await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		set_cookie(&response).as_deref(),
		Some("_language=zh-cn; Max-Age=2147483647; Path=/")
	);
	assert_eq!(body_string(response).await, "你好，世界！");
}

#[tokio::test]
async fn parameter_redirects_then_cookie_sticks() {
	let app = app(config());

	let response = get(
		app.clone(),
		Request::get("/?lang=de-de").body(Body::empty()).unwrap(),
	)
	.await;
	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
	let cookie = set_cookie(&response).unwrap();
	assert!(cookie.starts_with("_language=de-de;"));
	// The page is rendered in the new language even though it is a redirect.
	assert_eq!(body_string(response).await, "Hallo Welt!");

	// Follow the redirect the way a browser would.
	let pair = cookie.split(';').next().unwrap().to_string();
	let response = get(
		app,
		Request::get("/").header(COOKIE, pair).body(Body::empty()).unwrap(),
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(set_cookie(&response).is_none());
	assert_eq!(body_string(response).await, "Hallo Welt!");
}

#[tokio::test]
async fn form_post_switches_language() {
	let response = get(
		app(config()),
		Request::post("/?x=1")
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.header(COOKIE, "_language=fr-fr")
			.body(Body::from("lang=es"))
			.unwrap(),
	)
	.await;

	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
	assert!(set_cookie(&response).unwrap().starts_with("_language=es;"));
	assert_eq!(body_string(response).await, "¡Hola mundo!");
}

#[tokio::test]
async fn accept_language_selects_catalog() {
	let response = get(
		app(config()),
		Request::get("/")
			.header(ACCEPT_LANGUAGE, "fr-FR,fr;q=0.8,en;q=0.5")
			.body(Body::empty())
			.unwrap(),
	)
	.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert!(set_cookie(&response).unwrap().starts_with("_language=fr-fr;"));
	assert_eq!(body_string(response).await, "Bonjour le monde !");
}

#[tokio::test]
async fn unknown_language_falls_back_to_msgid() {
	let response = get(
		app(config()),
		Request::get("/")
			.header(COOKIE, "_language=ja-jp")
			.body(Body::empty())
			.unwrap(),
	)
	.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_string(response).await, "Hello world!");
}

#[tokio::test]
async fn lang_route_publishes_canonical_tag() {
	let config = I18nConfig {
		redirect_on_parameter: false,
		..config()
	};
	let response = get(
		app(config),
		Request::get("/lang?lang=SR-LATN").body(Body::empty()).unwrap(),
	)
	.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_string(response).await, "sr-latn");
}

#[tokio::test]
async fn on_disk_catalog_is_used_when_not_embedded() {
	let config = I18nConfig {
		directory: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/locale"),
		..config()
	};
	let response = get(
		app(config),
		Request::get("/")
			.header(ACCEPT_LANGUAGE, "it-IT")
			.body(Body::empty())
			.unwrap(),
	)
	.await;

	assert_eq!(body_string(response).await, "Ciao mondo!");
}

#[tokio::test]
async fn environment_config_drives_resolution() {
	let layer = EnvSource::load_with(|name| match name {
		"LINGUA_SERVER_I18N_PARAMETER_NAME" => Some("hl".to_string()),
		"LINGUA_SERVER_I18N_DEFAULT_LANGUAGE" => Some("es".to_string()),
		"LINGUA_SERVER_I18N_SUB_PATH" => Some("/site/".to_string()),
		_ => None,
	})
	.unwrap();
	struct Fixed(lingua_config::ServerConfigLayer);
	impl lingua_config::ConfigSource for Fixed {
		fn name(&self) -> &'static str {
			"fixed"
		}
		fn precedence(&self) -> lingua_config::Precedence {
			lingua_config::Precedence::Environment
		}
		fn load(&self) -> Result<lingua_config::ServerConfigLayer, lingua_config::ConfigError> {
			Ok(self.0.clone())
		}
	}
	let config = load_from_sources(vec![Box::new(Fixed(layer))]).unwrap();

	let response = get(
		app(config.i18n.clone()),
		Request::get("/").body(Body::empty()).unwrap(),
	)
	.await;
	assert_eq!(
		set_cookie(&response).as_deref(),
		Some("_language=es; Max-Age=2147483647; Path=/site")
	);
	assert_eq!(body_string(response).await, "¡Hola mundo!");

	let response = get(
		app(config.i18n),
		Request::get("/lang?hl=de-at").body(Body::empty()).unwrap(),
	)
	.await;
	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(response.headers().get(LOCATION).unwrap(), "/site/lang");
}
