use std::time::Duration;

use async_trait::async_trait;
use derive_more::Display;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

use crate::domain::EmailAddress;

/// Identifier the provider assigns to an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Display, serde::Deserialize)]
#[display(fmt = "{}", _0)]
pub struct EmailId(String);

impl AsRef<str> for EmailId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    /// The provider answered with a non-success status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Something able to deliver a rendered HTML email to a single recipient.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
    ) -> Result<EmailId, SendEmailError>;
}

/// Resend REST API client.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: EmailAddress,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, SendEmailError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    id: EmailId,
}

#[derive(serde::Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[async_trait]
impl EmailSender for EmailClient {
    #[tracing::instrument(name = "Calling the email provider", skip(self, recipient, html_content), fields(recipient = %recipient))]
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
    ) -> Result<EmailId, SendEmailError> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: [recipient.as_ref()],
            subject,
            html: html_content,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ProviderErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!(
                    "provider responded with {}",
                    status.canonical_reason().unwrap_or(status.as_str())
                ),
            };
            tracing::warn!(status = status.as_u16(), detail = %message, "email rejected by the provider");
            return Err(SendEmailError::Rejected { status, message });
        }

        let body: SendEmailResponse = response.json().await?;
        Ok(body.id)
    }
}
