//! Server setup and configuration module

use crate::config::DaemonConfig;
use axum::Router;
use counsel_http::DemoState;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa_scalar::{Scalar, Servable as _};

/// Assemble the demo application router
///
/// Serves the demo API with its OpenAPI docs mounted at `/docs/`, wrapped in
/// a trace layer and, when enabled in the settings, a permissive CORS layer
/// for the web client.
pub fn build_app(settings: &DaemonConfig, state: DemoState) -> Router {
    let (router, api) = counsel_http::routes::router().split_for_parts();
    let router = router.merge(Scalar::with_url("/docs/", api));

    let mut app = router.with_state(state).layer(TraceLayer::new_for_http());

    if settings.http.cors_enabled {
        app = app.layer(cors_layer());
    }

    app
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(vec![
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
}
