use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// PNG data URLs of a full receipt run well past axum's 2 MB default.
pub const EXPORT_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handlers::expense_page))
        .route("/activity", get(handlers::activity_page))
        .route("/test", get(handlers::liveness))
        .route("/api/:variant/:document", delete(handlers::close_document))
        .route("/api/:variant/:document/receipt", get(handlers::get_receipt))
        .route("/api/:variant/:document/items", post(handlers::add_item))
        .route(
            "/api/:variant/:document/items/:item",
            delete(handlers::remove_item),
        )
        .route("/api/:variant/:document/fields", post(handlers::field_input))
        .route(
            "/api/:variant/:document/export",
            post(handlers::export_receipt).layer(DefaultBodyLimit::max(EXPORT_BODY_LIMIT)),
        )
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
