use super::error_response;
use crate::{
    modules::notification::{repository::notification::EmailType, service},
    types::Context,
    utils,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;
use validator::{Validate, ValidationError};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct WelcomeEmailPayload {
    #[validate(length(min = 1, message = "Subject is required"))]
    subject: String,
    email_type: EmailType,
    #[validate(length(min = 1, message = "User id is required"))]
    user_id: String,
    #[validate(length(min = 1, message = "User first name is required"))]
    user_first_name: String,
}

async fn send_welcome_email(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<WelcomeEmailPayload>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors).into_response();
    }

    match ctx
        .notifications
        .send_welcome_email(service::WelcomeEmail {
            user_id: payload.user_id,
            email_type: payload.email_type,
            subject: payload.subject,
            user_first_name: payload.user_first_name,
        })
        .await
    {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct OrderEmailPayload {
    #[validate(length(min = 1, message = "Subject is required"))]
    subject: String,
    email_type: EmailType,
    #[validate(length(min = 1, message = "User id is required"))]
    user_id: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    full_name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    address: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    phone_number: String,
    #[validate(length(min = 1, message = "Courier is required"))]
    courier: String,
    #[validate(length(min = 1, message = "Payment method is required"))]
    payment_method: String,
}

impl From<OrderEmailPayload> for service::OrderEmail {
    fn from(payload: OrderEmailPayload) -> Self {
        Self {
            user_id: payload.user_id,
            email_type: payload.email_type,
            subject: payload.subject,
            full_name: payload.full_name,
            address: payload.address,
            phone_number: payload.phone_number,
            courier: payload.courier,
            payment_method: payload.payment_method,
        }
    }
}

async fn send_order_confirmation_email(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<OrderEmailPayload>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors).into_response();
    }

    match ctx
        .notifications
        .send_order_confirmation_email(payload.into())
        .await
    {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => error_response(err),
    }
}

async fn send_new_order_email(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<OrderEmailPayload>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors).into_response();
    }

    match ctx.notifications.send_new_order_email(payload.into()).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ShippedOrderEmailPayload {
    #[validate(length(min = 1, message = "Subject is required"))]
    subject: String,
    email_type: EmailType,
    #[validate(length(min = 1, message = "User id is required"))]
    user_id: String,
    order_id: i64,
    #[validate(custom(function = "validate_total_amount"))]
    total_amount: BigDecimal,
    #[validate(length(min = 1, message = "Payment method is required"))]
    payment_method: String,
    #[validate(length(min = 1, message = "Courier is required"))]
    courier: String,
    #[validate(length(min = 1, message = "Address is required"))]
    address: String,
}

fn validate_total_amount(total_amount: &BigDecimal) -> Result<(), ValidationError> {
    match total_amount >= &BigDecimal::from(0) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_TOTAL_AMOUNT")
            .with_message(Cow::from("Total amount must not be negative"))),
    }
}

async fn send_shipped_order_email(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<ShippedOrderEmailPayload>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors).into_response();
    }

    match ctx
        .notifications
        .send_shipped_order_email(service::ShippedOrderEmail {
            user_id: payload.user_id,
            email_type: payload.email_type,
            subject: payload.subject,
            order_id: payload.order_id,
            total_amount: payload.total_amount,
            address: payload.address,
            courier: payload.courier,
            payment_method: payload.payment_method,
        })
        .await
    {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => error_response(err),
    }
}

async fn send_newsletter(State(ctx): State<Arc<Context>>) -> Response {
    match ctx.notifications.send_newsletter().await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => error_response(err),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/welcome", post(send_welcome_email))
        .route("/order/confirmation", post(send_order_confirmation_email))
        .route("/order/new", post(send_new_order_email))
        .route("/order/shipped", post(send_shipped_order_email))
        .route("/newsletter", post(send_newsletter))
}
