use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

async fn status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn routes() -> Router {
    Router::new().route("/status", get(status))
}
