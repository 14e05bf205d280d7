use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

#[derive(Debug)]
pub enum Error {
    NotSent,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outbound mail transport. The send pipeline only ever talks to this
/// interface; SMTP details live in the implementation.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

pub struct SmtpMailer {
    sender: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(host: String, sender: String, user: String, password: String) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host.as_str())
            .expect("Invalid mail host")
            .credentials(Credentials::new(user, password))
            .build();

        Self { sender, transport }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.sender.parse().map_err(|err| {
                tracing::error!("Invalid sender address {}: {}", self.sender, err);
                Error::NotSent
            })?)
            .to(to.parse().map_err(|err| {
                tracing::error!("Invalid recipient address {}: {}", to, err);
                Error::NotSent
            })?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|err| {
                tracing::error!("Failed to build mail message: {}", err);
                Error::NotSent
            })?;

        self.transport.send(message).await.map(|_| ()).map_err(|err| {
            tracing::error!("Failed to send email: {}", err);
            Error::NotSent
        })
    }
}
