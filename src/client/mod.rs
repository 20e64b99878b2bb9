//! Client side of the demo: talks to a running service the way the web form does.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::app::email::schema::{
    SendCustomRequestBody, SendCustomResponseBody, SendTestRequestBody, SendTestResponseBody,
};
use crate::config::ClientSettings;

pub mod form;
pub mod health;

pub use self::form::{CustomEmailForm, EmailForm, FormResponse, Notice, NoticeKind, TestEmailForm};
pub use self::health::{ApiStatus, HealthMonitor};

const FALLBACK_ERROR: &str = "Failed to send email";

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The service answered with a non-2xx status.
    #[error("{error}")]
    Api {
        status: StatusCode,
        error: String,
        details: Option<String>,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Api { details, .. } => details.as_deref(),
            Self::Transport(_) => None,
        }
    }
}

/// Lenient view of the service's error body; any field may be absent.
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
    details: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    submit_timeout: Duration,
    health_timeout: Duration,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            http_client: Client::new(),
            base_url: settings.api_url.trim_end_matches('/').to_owned(),
            submit_timeout: settings.submit_timeout,
            health_timeout: settings.health_timeout,
        }
    }

    /// A single health probe. Anything but a `200 OK` within the timeout means offline.
    #[tracing::instrument(name = "Checking service health", skip(self), fields(base_url = %self.base_url))]
    pub async fn check_health(&self) -> ApiStatus {
        let outcome = self
            .http_client
            .get(format!("{}/health", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await;

        match outcome {
            Ok(response) if response.status() == StatusCode::OK => ApiStatus::Online,
            Ok(response) => {
                tracing::warn!(status = response.status().as_u16(), "health check failed");
                ApiStatus::Offline
            }
            Err(e) => {
                tracing::warn!(detail = %e, "health check failed");
                ApiStatus::Offline
            }
        }
    }

    pub async fn send_test(
        &self,
        body: &SendTestRequestBody,
    ) -> Result<SendTestResponseBody, ClientError> {
        self.post("/api/email/send-test", body).await
    }

    pub async fn send_custom(
        &self,
        body: &SendCustomRequestBody,
    ) -> Result<SendCustomResponseBody, ClientError> {
        self.post("/api/email/send-custom", body).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .timeout(self.submit_timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<R>().await?);
        }

        let (error, details) = match response.json::<ErrorBody>().await {
            Ok(body) => (body.error, body.details),
            Err(_) => (None, None),
        };

        Err(ClientError::Api {
            status,
            error: error.unwrap_or_else(|| FALLBACK_ERROR.to_owned()),
            details,
        })
    }
}
