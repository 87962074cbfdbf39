// Export route modules
pub mod chat;
pub mod status;

use crate::state::AppState;
use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

// Function to configure all routes. The CORS policy is a static wildcard,
// so the headers are stamped onto every response unconditionally rather
// than negotiated per origin.
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(chat::routes(state))
        .merge(status::routes())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
}
