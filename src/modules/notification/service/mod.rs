pub mod templates;

use super::repository::{
    notification::{self, CreateNotificationPayload, EmailType, NotificationStatus},
    preference::{self, NotificationPreference, NotificationType, UpsertPreferencePayload},
};
use crate::utils::mail::Mailer;
use askama::Template;
use bigdecimal::BigDecimal;
use chrono::Utc;
use std::sync::Arc;

const NEWSLETTER_SUBJECT: &str = "Your weekly update is here!!!\u{1F48C}";

#[derive(Debug)]
pub enum Error {
    PreferenceNotFound,
    RenderFailure,
    UnexpectedError,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<preference::Error> for Error {
    fn from(_: preference::Error) -> Self {
        Error::UnexpectedError
    }
}

impl From<notification::Error> for Error {
    fn from(_: notification::Error) -> Self {
        Error::UnexpectedError
    }
}

pub struct UpsertPreference {
    pub user_id: String,
    pub r#type: NotificationType,
    pub newsletter_enabled: bool,
    pub contact_data: String,
}

pub struct WelcomeEmail {
    pub user_id: String,
    pub email_type: EmailType,
    pub subject: String,
    pub user_first_name: String,
}

pub struct OrderEmail {
    pub user_id: String,
    pub email_type: EmailType,
    pub subject: String,
    pub full_name: String,
    pub address: String,
    pub phone_number: String,
    pub courier: String,
    pub payment_method: String,
}

pub struct ShippedOrderEmail {
    pub user_id: String,
    pub email_type: EmailType,
    pub subject: String,
    pub order_id: i64,
    pub total_amount: BigDecimal,
    pub address: String,
    pub courier: String,
    pub payment_method: String,
}

fn render<T: Template>(template: T, email_type: EmailType) -> Result<String> {
    template.render().map_err(|err| {
        tracing::error!(
            "Failed to render template {}: {}",
            email_type.template(),
            err
        );
        Error::RenderFailure
    })
}

/// Orchestrates the send pipeline: resolve the recipient's preference,
/// render the event's template, attempt delivery and record the outcome.
pub struct NotificationService {
    preferences: Arc<dyn preference::PreferenceRepository>,
    notifications: Arc<dyn notification::NotificationRepository>,
    mailer: Arc<dyn Mailer>,
}

impl NotificationService {
    pub fn new(
        preferences: Arc<dyn preference::PreferenceRepository>,
        notifications: Arc<dyn notification::NotificationRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            preferences,
            notifications,
            mailer,
        }
    }

    pub async fn get_by_user_id(&self, user_id: &str) -> Result<NotificationPreference> {
        self.preferences
            .find_by_user_id(user_id)
            .await?
            .ok_or(Error::PreferenceNotFound)
    }

    pub async fn upsert_preference(
        &self,
        payload: UpsertPreference,
    ) -> Result<NotificationPreference> {
        let fields = UpsertPreferencePayload {
            r#type: payload.r#type,
            newsletter_enabled: payload.newsletter_enabled,
            contact_data: payload.contact_data,
        };

        match self.preferences.find_by_user_id(&payload.user_id).await? {
            Some(_) => self
                .preferences
                .update_by_user_id(&payload.user_id, fields)
                .await?
                .ok_or(Error::PreferenceNotFound),
            None => Ok(self.preferences.create(payload.user_id, fields).await?),
        }
    }

    pub async fn change_newsletter_preference(
        &self,
        user_id: &str,
        enabled: bool,
    ) -> Result<NotificationPreference> {
        let preference = self.get_by_user_id(user_id).await?;

        self.preferences
            .update_by_user_id(
                user_id,
                UpsertPreferencePayload {
                    r#type: preference.r#type,
                    newsletter_enabled: enabled,
                    contact_data: preference.contact_data,
                },
            )
            .await?
            .ok_or(Error::PreferenceNotFound)
    }

    pub async fn send_welcome_email(&self, payload: WelcomeEmail) -> Result<()> {
        let preference = self.get_by_user_id(&payload.user_id).await?;

        let body = render(
            templates::WelcomeEmail {
                first_name: &payload.user_first_name,
            },
            EmailType::Welcome,
        )?;

        self.deliver(&preference, payload.email_type, payload.subject, body)
            .await
    }

    pub async fn send_order_confirmation_email(&self, payload: OrderEmail) -> Result<()> {
        let preference = self.get_by_user_id(&payload.user_id).await?;

        let body = render(
            templates::OrderConfirmationEmail {
                full_name: &payload.full_name,
                address: &payload.address,
                phone_number: &payload.phone_number,
                courier: &payload.courier,
                payment_method: &payload.payment_method,
            },
            EmailType::OrderConfirmation,
        )?;

        self.deliver(&preference, payload.email_type, payload.subject, body)
            .await
    }

    pub async fn send_new_order_email(&self, payload: OrderEmail) -> Result<()> {
        let preference = self.get_by_user_id(&payload.user_id).await?;

        let body = render(
            templates::NewOrderEmail {
                full_name: &payload.full_name,
                address: &payload.address,
                phone_number: &payload.phone_number,
                courier: &payload.courier,
                payment_method: &payload.payment_method,
            },
            EmailType::NewOrder,
        )?;

        self.deliver(&preference, payload.email_type, payload.subject, body)
            .await
    }

    pub async fn send_shipped_order_email(&self, payload: ShippedOrderEmail) -> Result<()> {
        let preference = self.get_by_user_id(&payload.user_id).await?;

        let body = render(
            templates::ShippedOrderEmail {
                order_id: payload.order_id,
                total_amount: &payload.total_amount,
                address: &payload.address,
                courier: &payload.courier,
                payment_method: &payload.payment_method,
            },
            EmailType::ShippedOrder,
        )?;

        self.deliver(&preference, payload.email_type, payload.subject, body)
            .await
    }

    /// Broadcasts one shared rendered body to every opted-in user. A
    /// failing recipient is logged and skipped, never aborts the rest.
    pub async fn send_newsletter(&self) -> Result<()> {
        let body = render(templates::NewsletterEmail, EmailType::Newsletter)?;

        let recipients = self.preferences.find_all_newsletter_enabled().await?;

        for preference in recipients {
            if let Err(err) = self
                .deliver(
                    &preference,
                    EmailType::Newsletter,
                    NEWSLETTER_SUBJECT.to_string(),
                    body.clone(),
                )
                .await
            {
                tracing::warn!(
                    "Failed to record newsletter delivery for user {}: {:?}",
                    preference.user_id,
                    err
                );
            }
        }

        Ok(())
    }

    // Steps shared by every event kind: attempt delivery, then persist
    // exactly one log row with the terminal status. A transport failure
    // is recorded, never surfaced to the caller.
    async fn deliver(
        &self,
        preference: &NotificationPreference,
        email_type: EmailType,
        subject: String,
        body: String,
    ) -> Result<()> {
        let created_at = Utc::now().naive_utc();

        let status = match self
            .mailer
            .send(&preference.contact_data, &subject, &body)
            .await
        {
            Ok(()) => NotificationStatus::Sent,
            Err(_) => {
                tracing::warn!(
                    "Failed to send notification to user with id: {}",
                    preference.user_id
                );
                NotificationStatus::Failed
            }
        };

        self.notifications
            .create(CreateNotificationPayload {
                user_id: preference.user_id.clone(),
                subject,
                email_type,
                status,
                created_at,
            })
            .await?;

        Ok(())
    }
}
