use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use ulid::Ulid;

/// Logical email event, each tied to the template it renders with.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailType {
    Welcome,
    OrderConfirmation,
    NewOrder,
    ShippedOrder,
    Newsletter,
}

impl EmailType {
    pub fn template(&self) -> &'static str {
        match self {
            EmailType::Welcome => "welcome-email",
            EmailType::OrderConfirmation => "order-confirmation-email",
            EmailType::NewOrder => "new-order-email",
            EmailType::ShippedOrder => "shipped-order-email",
            EmailType::Newsletter => "newsletter-email",
        }
    }
}

impl From<String> for EmailType {
    fn from(value: String) -> Self {
        match value.as_ref() {
            "WELCOME" => EmailType::Welcome,
            "ORDER_CONFIRMATION" => EmailType::OrderConfirmation,
            "NEW_ORDER" => EmailType::NewOrder,
            "SHIPPED_ORDER" => EmailType::ShippedOrder,
            "NEWSLETTER" => EmailType::Newsletter,
            kind => unreachable!("Invalid email type: {}", kind),
        }
    }
}

impl ToString for EmailType {
    fn to_string(&self) -> String {
        match self {
            EmailType::Welcome => String::from("WELCOME"),
            EmailType::OrderConfirmation => String::from("ORDER_CONFIRMATION"),
            EmailType::NewOrder => String::from("NEW_ORDER"),
            EmailType::ShippedOrder => String::from("SHIPPED_ORDER"),
            EmailType::Newsletter => String::from("NEWSLETTER"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

impl From<String> for NotificationStatus {
    fn from(value: String) -> Self {
        match value.as_ref() {
            "SENT" => NotificationStatus::Sent,
            "FAILED" => NotificationStatus::Failed,
            status => unreachable!("Invalid notification status: {}", status),
        }
    }
}

impl ToString for NotificationStatus {
    fn to_string(&self) -> String {
        match self {
            NotificationStatus::Sent => String::from("SENT"),
            NotificationStatus::Failed => String::from("FAILED"),
        }
    }
}

/// One row per send attempt. Rows are written once, with a terminal
/// status, and never mutated afterwards.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub email_type: EmailType,
    pub status: NotificationStatus,
    pub created_at: NaiveDateTime,
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: String,
    user_id: String,
    subject: String,
    email_type: String,
    status: String,
    created_at: NaiveDateTime,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            subject: row.subject,
            email_type: EmailType::from(row.email_type),
            status: NotificationStatus::from(row.status),
            created_at: row.created_at,
        }
    }
}

pub struct CreateNotificationPayload {
    pub user_id: String,
    pub subject: String,
    pub email_type: EmailType,
    pub status: NotificationStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub type Result<T> = std::result::Result<T, Error>;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, payload: CreateNotificationPayload) -> Result<Notification>;
}

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, payload: CreateNotificationPayload) -> Result<Notification> {
        sqlx::query_as::<_, NotificationRow>(
            "
            INSERT INTO notifications (
                id,
                user_id,
                subject,
                email_type,
                status,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.user_id.as_str())
        .bind(payload.subject.as_str())
        .bind(payload.email_type.to_string())
        .bind(payload.status.to_string())
        .bind(payload.created_at)
        .fetch_one(&self.pool)
        .await
        .map(Into::into)
        .map_err(|err| {
            tracing::error!(
                "Error occurred while recording a notification for user {}: {}",
                payload.user_id,
                err
            );
            Error::UnexpectedError
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn email_types_map_to_their_templates() {
        assert_eq!(EmailType::Welcome.template(), "welcome-email");
        assert_eq!(
            EmailType::OrderConfirmation.template(),
            "order-confirmation-email"
        );
        assert_eq!(EmailType::NewOrder.template(), "new-order-email");
        assert_eq!(EmailType::ShippedOrder.template(), "shipped-order-email");
        assert_eq!(EmailType::Newsletter.template(), "newsletter-email");
    }

    #[test]
    fn email_types_round_trip_through_their_stored_form() {
        for kind in [
            EmailType::Welcome,
            EmailType::OrderConfirmation,
            EmailType::NewOrder,
            EmailType::ShippedOrder,
            EmailType::Newsletter,
        ] {
            assert_eq!(EmailType::from(kind.to_string()), kind);
        }
    }

    #[test]
    fn statuses_round_trip_through_their_stored_form() {
        assert_eq!(
            NotificationStatus::from(NotificationStatus::Sent.to_string()),
            NotificationStatus::Sent
        );
        assert_eq!(
            NotificationStatus::from(NotificationStatus::Failed.to_string()),
            NotificationStatus::Failed
        );
    }
}
