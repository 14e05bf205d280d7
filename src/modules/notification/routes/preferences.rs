use super::error_response;
use crate::{
    modules::notification::{repository::preference::NotificationType, service},
    types::Context,
    utils,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetPreferenceQuery {
    user_id: String,
}

async fn get_preference(
    State(ctx): State<Arc<Context>>,
    Query(query): Query<GetPreferenceQuery>,
) -> Response {
    match ctx.notifications.get_by_user_id(&query.user_id).await {
        Ok(preference) => (StatusCode::OK, Json(json!(preference))).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UpsertPreferencePayload {
    #[validate(length(min = 1, message = "User id is required"))]
    user_id: String,
    notification_type: NotificationType,
    newsletter_enabled: bool,
    #[validate(length(min = 1, message = "Contact data is required"))]
    contact_data: String,
}

async fn upsert_preference(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<UpsertPreferencePayload>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors).into_response();
    }

    match ctx
        .notifications
        .upsert_preference(service::UpsertPreference {
            user_id: payload.user_id,
            r#type: payload.notification_type,
            newsletter_enabled: payload.newsletter_enabled,
            contact_data: payload.contact_data,
        })
        .await
    {
        Ok(preference) => (StatusCode::CREATED, Json(json!(preference))).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePreferenceQuery {
    user_id: String,
    enabled: bool,
}

async fn change_preference(
    State(ctx): State<Arc<Context>>,
    Query(query): Query<ChangePreferenceQuery>,
) -> Response {
    match ctx
        .notifications
        .change_newsletter_preference(&query.user_id, query.enabled)
        .await
    {
        Ok(preference) => (StatusCode::OK, Json(json!(preference))).into_response(),
        Err(err) => error_response(err),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new().route(
        "/",
        get(get_preference)
            .post(upsert_preference)
            .put(change_preference),
    )
}
