//! Shared application router builder.
//!
//! Both the server binary and the integration tests build the app through
//! [`build_app_router`], so tests exercise the same middleware stack.

use std::any::Any;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header::{ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::openapi;
use crate::config::{AppConfig, SecurityConfig};
use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the full application [`Router`].
///
/// Layers, innermost first:
///
/// 1. Request body size limit
/// 2. Panic recovery (fixed 500 body)
/// 3. Request tracing, when enabled
/// 4. CORS, when enabled, for everything except plain OPTIONS requests
pub fn build_app_router(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route(openapi::OPENAPI_PATH, get(openapi::openapi_document))
        .nest("/api", handlers::api_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(CatchPanicLayer::custom(handle_panic));

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        let plain = router.clone();
        router = router
            .layer(build_cors_layer(&config.security))
            .layer(middleware::from_fn_with_state(plain, bypass_cors_for_plain_options));
    }

    router
}

/// Only CORS preflights (OPTIONS with `Access-Control-Request-Method`) are
/// answered by the CORS layer. Any other OPTIONS request goes to the routes
/// directly and gets their 405.
async fn bypass_cors_for_plain_options(
    State(plain): State<Router>,
    request: Request,
    next: Next,
) -> Response {
    let preflight = request.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD);
    if request.method() == Method::OPTIONS && !preflight {
        return plain.oneshot(request).await.into_response();
    }
    next.run(request).await
}

/// Build the CORS layer; no configured origins means any origin.
pub fn build_cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::internal(format!("handler panicked: {detail}")).into_response()
}
