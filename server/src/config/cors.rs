use axum::http::{header, HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// The API is read-mostly: listings and details are GET, quotes are POST.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn allowed_origins(origins: &[String]) -> AllowOrigin {
    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if values.is_empty() {
        tracing::warn!("CORS: No valid origins configured, allowing any origin");
        AllowOrigin::any()
    } else {
        tracing::info!("CORS: Configured with {} allowed origin(s)", values.len());
        AllowOrigin::list(values)
    }
}
