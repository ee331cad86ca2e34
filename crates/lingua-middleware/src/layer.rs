// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tower layer that resolves the language of every request.
//!
//! For each request the layer:
//!
//! 1. Binds the catalog domain (first request only)
//! 2. Picks the language from parameter, cookie, `Accept-Language` or default
//! 3. Activates the locale in the translation engine
//! 4. Inserts [`Locale`] and [`Translator`] extensions and calls the inner
//!    service
//! 5. Appends `Set-Cookie` when the language did not come from the cookie
//! 6. Turns the response into `302 Found` when a parameter override should be
//!    dropped from the URL; the handler still runs and its body is kept
//!
//! Form-encoded `POST`, `PUT` and `PATCH` bodies are buffered (up to
//! [`FORM_BODY_LIMIT`]) so the parameter can be read from them, then handed
//! on unchanged.
//!
//! # Example
//!
//! ```ignore
//! let layer = I18nLayer::new(config.i18n.clone(), Arc::new(GettextEngine::new()));
//!
//! Router::new()
//!     .route("/", get(hello))
//!     .layer(layer);
//! ```
//!
//! [`Locale`]: crate::Locale
//! [`Translator`]: crate::Translator

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use lingua_catalog::{EmbeddedCatalogs, TranslationEngine};
use lingua_config::I18nConfig;
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::warn;

use crate::resolve::{LanguageResolver, Resolution};

/// Largest form body read while looking for the language parameter.
pub const FORM_BODY_LIMIT: usize = 10 << 20;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Layer producing [`I18nService`].
#[derive(Debug, Clone)]
pub struct I18nLayer {
	resolver: LanguageResolver,
}

impl I18nLayer {
	pub fn new(config: I18nConfig, engine: Arc<dyn TranslationEngine>) -> Self {
		Self {
			resolver: LanguageResolver::new(config, engine),
		}
	}

	pub fn from_resolver(resolver: LanguageResolver) -> Self {
		Self { resolver }
	}

	/// Serve catalogs compiled into the binary ahead of the directory.
	pub fn with_embedded_catalogs(self, embedded: EmbeddedCatalogs) -> Self {
		Self {
			resolver: self.resolver.with_embedded_catalogs(embedded),
		}
	}

	pub fn resolver(&self) -> &LanguageResolver {
		&self.resolver
	}
}

impl<S> Layer<S> for I18nLayer {
	type Service = I18nService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		I18nService {
			inner,
			resolver: self.resolver.clone(),
		}
	}
}

/// Service wrapper for [`I18nLayer`].
#[derive(Debug, Clone)]
pub struct I18nService<S> {
	inner: S,
	resolver: LanguageResolver,
}

impl<S> Service<Request<Body>> for I18nService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
	S::Error: Send + 'static,
{
	type Response = Response;
	type Error = S::Error;
	type Future = I18nFuture<S::Future, S::Error>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		if carries_form(&req) {
			// Keep the service that was driven to readiness for this request.
			let clone = self.inner.clone();
			let inner = std::mem::replace(&mut self.inner, clone);
			let resolver = self.resolver.clone();
			return I18nFuture::Form {
				fut: Box::pin(call_with_form(resolver, inner, req)),
			};
		}

		let resolution = self.resolver.resolve_request(&req);
		let (req, pending) = publish(&self.resolver, req, resolution);

		I18nFuture::Inner {
			fut: self.inner.call(req),
			pending: Some(pending),
		}
	}
}

fn carries_form(req: &Request<Body>) -> bool {
	if !matches!(*req.method(), Method::POST | Method::PUT | Method::PATCH) {
		return false;
	}
	req.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.split(';').next())
		.is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

async fn call_with_form<S>(
	resolver: LanguageResolver,
	mut inner: S,
	req: Request<Body>,
) -> Result<Response, S::Error>
where
	S: Service<Request<Body>, Response = Response>,
{
	let (parts, body) = req.into_parts();
	let bytes = match axum::body::to_bytes(body, FORM_BODY_LIMIT).await {
		Ok(bytes) => bytes,
		Err(e) => {
			warn!(error = %e, limit = FORM_BODY_LIMIT, "failed to read form body");
			return Ok(StatusCode::BAD_REQUEST.into_response());
		}
	};

	let resolution = resolver.resolve_with_form(&parts.uri, &parts.headers, Some(&bytes[..]));
	let req = Request::from_parts(parts, Body::from(bytes));
	let (req, pending) = publish(&resolver, req, resolution);

	let response = inner.call(req).await?;
	Ok(pending.apply(response))
}

/// Insert the request's language values and collect the response headers
/// the resolution calls for.
fn publish(
	resolver: &LanguageResolver,
	mut req: Request<Body>,
	resolution: Resolution,
) -> (Request<Body>, PendingHeaders) {
	let set_cookie = resolution.set_cookie.as_ref().and_then(|cookie| {
		let value = cookie.to_header_value();
		if value.is_none() {
			warn!(cookie = %cookie.name, "language cookie is not a valid header value, skipping");
		}
		value
	});

	let location = resolution.redirect_to.as_deref().and_then(|location| {
		let value = HeaderValue::from_str(location).ok();
		if value.is_none() {
			warn!(location, "redirect target is not a valid header value, skipping");
		}
		value
	});

	let translator = resolver.translator(&resolution);
	req.extensions_mut().insert(resolution.locale);
	req.extensions_mut().insert(translator);

	(
		req,
		PendingHeaders {
			set_cookie,
			location,
		},
	)
}

/// Headers applied to the inner service's response.
#[derive(Debug)]
pub struct PendingHeaders {
	set_cookie: Option<HeaderValue>,
	location: Option<HeaderValue>,
}

impl PendingHeaders {
	fn apply(self, mut response: Response) -> Response {
		if let Some(cookie) = self.set_cookie {
			response.headers_mut().append(SET_COOKIE, cookie);
		}
		if let Some(location) = self.location {
			*response.status_mut() = StatusCode::FOUND;
			response.headers_mut().insert(LOCATION, location);
		}
		response
	}
}

type BoxResponseFuture<E> = Pin<Box<dyn Future<Output = Result<Response, E>> + Send>>;

pin_project! {
	/// Future for [`I18nService`].
	#[project = I18nFutureProj]
	pub enum I18nFuture<F, E> {
		Inner { #[pin] fut: F, pending: Option<PendingHeaders> },
		Form { fut: BoxResponseFuture<E> },
	}
}

impl<F, E> Future for I18nFuture<F, E>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			I18nFutureProj::Inner { fut, pending } => {
				let response = ready!(fut.poll(cx))?;
				let response = match pending.take() {
					Some(pending) => pending.apply(response),
					None => response,
				};
				Poll::Ready(Ok(response))
			}
			I18nFutureProj::Form { fut } => fut.as_mut().poll(cx),
		}
	}
}
