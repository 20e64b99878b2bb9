use std::{io, net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    http::{header, Method, Request},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::{Environment, Settings},
    email::{EmailClient, EmailSender},
};

use self::error::{AppError, AppResult};

pub mod email;
pub mod error;
mod health;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no provider credential is configured.
    email_client: Option<Arc<dyn EmailSender>>,
    environment: Environment,
}

impl AppState {
    fn email_client(&self) -> AppResult<&dyn EmailSender> {
        self.email_client
            .as_deref()
            .ok_or(AppError::ConfigurationError)
    }
}

fn app_router() -> Router<AppState> {
    health::router().nest("/api/email", email::router())
}

pub struct App {
    listener: TcpListener,
    email_client: Option<Arc<dyn EmailSender>>,
    environment: Environment,
}

impl App {
    pub async fn with(config: Settings) -> anyhow::Result<Self> {
        let email_client = match config.email_client.authorization_token() {
            Some(authorization_token) => {
                let sender = config
                    .email_client
                    .sender()
                    .map_err(|e| anyhow::anyhow!("The sender email should be valid: {}", e))?;
                let client = EmailClient::new(
                    config.email_client.base_url.clone(),
                    sender,
                    authorization_token,
                    config.email_client.timeout(),
                )
                .context("Could not build the email client.")?;
                Some(Arc::new(client) as Arc<dyn EmailSender>)
            }
            None => {
                tracing::warn!("no email provider credential configured, every send will fail");
                None
            }
        };

        let listener = TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await
        .context("The listener should be able to bind the address.")?;

        Ok(Self {
            listener,
            email_client,
            environment: config.application.environment,
        })
    }

    pub fn host(&self) -> io::Result<IpAddr> {
        Ok(self.listener.local_addr()?.ip())
    }

    pub fn port(&self) -> io::Result<u16> {
        Ok(self.listener.local_addr()?.port())
    }

    pub async fn serve(self) -> Result<(), io::Error> {
        let app = app_router()
            .with_state(AppState {
                email_client: self.email_client,
                environment: self.environment,
            })
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST])
                    .allow_headers([header::CONTENT_TYPE]),
            )
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                    let id = uuid::Uuid::new_v4();
                    tracing::info_span!(
                        "request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        %id,
                    )
                }),
            );

        axum::serve(self.listener, app.into_make_service()).await
    }
}
