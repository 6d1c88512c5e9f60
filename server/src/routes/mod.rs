use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer, Config};
use crate::handlers::{
    get_public_event_details, get_published_classes, health_check, quote_ticket_purchase,
};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/events/:id", get(get_public_event_details))
        .route("/events/:id/quote", post(quote_ticket_purchase))
        .route("/classes", get(get_published_classes))
        .with_state(state);

    apply_security_headers(router, config.production)
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
