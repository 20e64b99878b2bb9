use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::config::Environment;
use crate::email::SendEmailError;

pub mod schema;

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

const API_KEY_HINT: &str = "Please check your RESEND_API_KEY environment variable";
const DOMAIN_HINT: &str = "Please verify your sending domain in Resend dashboard";
const INVALID_BODY: &str = "Invalid request body";
const HIDDEN_DETAILS: &str = "Internal server error";

/// A common error type that can be used throughout the API.
///
/// Every variant is turned into a JSON body of the shape `{error, details?, field?, required?}`
/// at the request boundary.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The request body is missing something or carries a malformed value.
    #[error("{message}")]
    ValidationError {
        message: String,
        field: Option<&'static str>,
        required: Vec<&'static str>,
    },
    /// The body could not be read as the JSON object the endpoint expects.
    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),
    /// No provider credential is configured.
    #[error("Resend API key not configured. Please set RESEND_API_KEY environment variable.")]
    ConfigurationError,
    #[error("Invalid or missing Resend API key")]
    AuthError(#[source] SendEmailError),
    #[error("Domain verification required")]
    DomainVerificationError(#[source] SendEmailError),
    #[error("{message}")]
    ProviderError {
        message: &'static str,
        #[source]
        source: SendEmailError,
        expose_details: bool,
    },
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field),
            required: Vec::new(),
        }
    }

    pub fn missing_fields(required: Vec<&'static str>) -> Self {
        Self::ValidationError {
            message: "Missing required fields".to_owned(),
            field: None,
            required,
        }
    }

    /// Sorts a provider failure into the error the client gets to see.
    ///
    /// The provider only reports free text, so the classification matches on it:
    /// anything mentioning the API key is an authentication problem, anything
    /// mentioning a domain is a verification problem.
    pub fn from_send_failure(
        source: SendEmailError,
        message: &'static str,
        environment: Environment,
    ) -> Self {
        let text = source.to_string();
        if text.contains("API key") {
            Self::AuthError(source)
        } else if text.contains("domain") {
            Self::DomainVerificationError(source)
        } else {
            Self::ProviderError {
                message,
                source,
                expose_details: environment.exposes_error_details(),
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::ConfigurationError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AuthError(_) => StatusCode::UNAUTHORIZED,
            Self::DomainVerificationError(_) => StatusCode::BAD_REQUEST,
            Self::ProviderError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> schema::Error {
        match self {
            Self::ValidationError {
                message,
                field,
                required,
            } => schema::Error {
                field: field.map(str::to_owned),
                required: (!required.is_empty())
                    .then(|| required.iter().map(|f| (*f).to_owned()).collect()),
                ..schema::Error::new(message.as_str())
            },
            Self::MalformedBody(rejection) => schema::Error {
                details: Some(rejection.body_text()),
                ..schema::Error::new(INVALID_BODY)
            },
            Self::ConfigurationError => schema::Error::new(self.to_string()),
            Self::AuthError(_) => schema::Error {
                details: Some(API_KEY_HINT.to_owned()),
                ..schema::Error::new(self.to_string())
            },
            Self::DomainVerificationError(_) => schema::Error {
                details: Some(DOMAIN_HINT.to_owned()),
                ..schema::Error::new(self.to_string())
            },
            Self::ProviderError {
                message,
                source,
                expose_details,
            } => schema::Error {
                details: Some(if *expose_details {
                    source.to_string()
                } else {
                    HIDDEN_DETAILS.to_owned()
                }),
                ..schema::Error::new(*message)
            },
            Self::UnexpectedError(_) => schema::Error::new("Unexpected error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::ValidationError { message, .. } => {
                tracing::warn!(detail = %message, "rejected invalid request");
            }
            Self::MalformedBody(rejection) => {
                tracing::warn!(detail = %rejection, "rejected unreadable request body");
            }
            Self::ConfigurationError => {
                tracing::error!("the email provider credential is not configured");
            }
            Self::AuthError(e) | Self::DomainVerificationError(e) | Self::ProviderError { source: e, .. } => {
                tracing::error!(detail = %e, "{}", self);
            }
            Self::UnexpectedError(e) => {
                tracing::error!("{:?}", e);
            }
        }

        (self.status_code(), Json(self.body())).into_response()
    }
}
