//! API route definitions
use crate::state::DemoState;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

pub mod health;
pub mod messages;
pub mod sessions;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "chat-sessions", description = "Demo chat session endpoints"),
        (name = "messages", description = "Demo message endpoints"),
        (name = "health", description = "Health check endpoints"),
    ),
)]
struct ApiDoc;

/// Build the demo API router
pub fn router() -> OpenApiRouter<DemoState> {
    let router = OpenApiRouter::with_openapi(ApiDoc::openapi());
    let router = sessions::add_routes(router);
    let router = messages::add_routes(router);
    health::add_routes(router)
}
