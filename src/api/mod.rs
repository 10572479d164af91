//! HTTP layer using Axum
//!
//! - HTML form flow at `/` and `/predict`
//! - JSON API under `/api` for the mobile client
//! - Static assets (JS/CSS) served via `rust-embed` (compiled into the binary)

pub mod envelope;
pub mod handlers;
pub mod pages;
mod routes;

pub use handlers::AppState;

use axum::extract::Path;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use rust_embed::Embed;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Static assets compiled from `assets/static/`.
#[derive(Embed)]
#[folder = "assets/static/"]
struct StaticAssets;

/// GET /static/*path
async fn serve_asset(Path(path): Path<String>) -> Response {
    match StaticAssets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => handlers::not_found().await,
    }
}

/// Build the CORS layer from `server.cors_origins`.
///
/// `"*"` allows any origin (the mobile client calls from arbitrary hosts);
/// an empty list allows none, restricting the API to same-origin use.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.trim().parse().ok())
        .collect();
    if !allowed.is_empty() {
        tracing::info!(origins = ?origins, "CORS: allowing configured origins");
    }
    base.allow_origin(allowed)
}

/// Create the complete application router.
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::page_routes(state.clone()))
        .nest("/api", routes::api_routes(state))
        .route("/static/*path", get(serve_asset))
        .fallback(handlers::not_found)
        // Middleware
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&server.cors_origins))
}
