mod emails;
mod preferences;

use crate::{modules::notification::service, types::Context};
use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use serde_json::json;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/preferences", preferences::get_router())
        .nest("/emails", emails::get_router())
}

fn error_response(err: service::Error) -> axum::response::Response {
    match err {
        service::Error::PreferenceNotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": 404, "message": "Notification preference not found" })),
        )
            .into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": 500, "message": "An unexpected error occurred" })),
        )
            .into_response(),
    }
}
