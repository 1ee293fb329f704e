pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod records;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = cors_layer(&server.cors);
    let body_limit = DefaultBodyLimit::max(server.max_body_bytes);

    Router::new()
        .nest("/api", routes::api_routes())
        .fallback(handlers::not_found)
        .layer(body_limit)
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    // `*` cannot be combined with credentials, so an open policy mirrors the
    // caller's origin instead.
    let origin = if config.allow_origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(config.allow_origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| tracing::warn!(%origin, "Ignoring invalid CORS origin"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.max_age))
}

/// Answer CORS preflights with 204 instead of the layer's default 200.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
