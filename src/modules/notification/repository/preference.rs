use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Email,
}

impl From<String> for NotificationType {
    fn from(value: String) -> Self {
        match value.as_ref() {
            "EMAIL" => NotificationType::Email,
            kind => unreachable!("Invalid notification type: {}", kind),
        }
    }
}

impl ToString for NotificationType {
    fn to_string(&self) -> String {
        match self {
            NotificationType::Email => String::from("EMAIL"),
        }
    }
}

/// A user's chosen channel, newsletter opt-in and destination address.
/// At most one row exists per user id.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreference {
    pub id: String,
    pub user_id: String,
    pub r#type: NotificationType,
    pub newsletter_enabled: bool,
    pub contact_data: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(sqlx::FromRow)]
struct PreferenceRow {
    id: String,
    user_id: String,
    r#type: String,
    is_newsletter_enabled: bool,
    contact_data: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<PreferenceRow> for NotificationPreference {
    fn from(row: PreferenceRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            r#type: NotificationType::from(row.r#type),
            newsletter_enabled: row.is_newsletter_enabled,
            contact_data: row.contact_data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct UpsertPreferencePayload {
    pub r#type: NotificationType,
    pub newsletter_enabled: bool,
    pub contact_data: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub type Result<T> = std::result::Result<T, Error>;

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<NotificationPreference>>;

    async fn find_all_newsletter_enabled(&self) -> Result<Vec<NotificationPreference>>;

    async fn create(
        &self,
        user_id: String,
        payload: UpsertPreferencePayload,
    ) -> Result<NotificationPreference>;

    async fn update_by_user_id(
        &self,
        user_id: &str,
        payload: UpsertPreferencePayload,
    ) -> Result<Option<NotificationPreference>>;
}

pub struct PgPreferenceRepository {
    pool: PgPool,
}

impl PgPreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<NotificationPreference>> {
        sqlx::query_as::<_, PreferenceRow>(
            "SELECT * FROM notification_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Into::into))
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching the notification preference for user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
    }

    async fn find_all_newsletter_enabled(&self) -> Result<Vec<NotificationPreference>> {
        sqlx::query_as::<_, PreferenceRow>(
            "SELECT * FROM notification_preferences WHERE is_newsletter_enabled = true",
        )
        .fetch_all(&self.pool)
        .await
        .map(|rows| rows.into_iter().map(Into::into).collect())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching newsletter enabled preferences: {}",
                err
            );
            Error::UnexpectedError
        })
    }

    async fn create(
        &self,
        user_id: String,
        payload: UpsertPreferencePayload,
    ) -> Result<NotificationPreference> {
        sqlx::query_as::<_, PreferenceRow>(
            "
            INSERT INTO notification_preferences (
                id,
                user_id,
                type,
                is_newsletter_enabled,
                contact_data,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(user_id.as_str())
        .bind(payload.r#type.to_string())
        .bind(payload.newsletter_enabled)
        .bind(payload.contact_data)
        .fetch_one(&self.pool)
        .await
        .map(Into::into)
        .map_err(|err| {
            tracing::error!(
                "Error occurred while creating a notification preference for user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
    }

    async fn update_by_user_id(
        &self,
        user_id: &str,
        payload: UpsertPreferencePayload,
    ) -> Result<Option<NotificationPreference>> {
        sqlx::query_as::<_, PreferenceRow>(
            "
            UPDATE notification_preferences SET
                type = $2,
                is_newsletter_enabled = $3,
                contact_data = $4,
                updated_at = NOW()
            WHERE
                user_id = $1
            RETURNING *
            ",
        )
        .bind(user_id)
        .bind(payload.r#type.to_string())
        .bind(payload.newsletter_enabled)
        .bind(payload.contact_data)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Into::into))
        .map_err(|err| {
            tracing::error!(
                "Error occurred while updating the notification preference for user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
    }
}
