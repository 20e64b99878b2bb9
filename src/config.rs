use std::time::Duration;

use secrecy::{ExposeSecret, Secret};

use crate::domain::EmailAddress;

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub log_level: String,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
}

#[derive(serde::Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub authorization_token: Option<Secret<String>>,
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<EmailAddress, String> {
        EmailAddress::try_from(self.sender_email.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    /// The provider credential, if one is configured. Blank values count as absent.
    pub fn authorization_token(&self) -> Option<Secret<String>> {
        self.authorization_token
            .as_ref()
            .map(|token| token.expose_secret().trim())
            .filter(|token| !token.is_empty())
            .map(|token| Secret::new(token.to_owned()))
    }
}

/// The runtime mode. Provider failure details only reach clients in `Development`.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn exposes_error_details(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `development` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(format!("{}.yaml", environment.as_str())),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override("application.environment", environment.as_str())?
        // Plain variable names the demo has always documented.
        .set_override_option("email_client.authorization_token", std::env::var("RESEND_API_KEY").ok())?
        .set_override_option("email_client.sender_email", std::env::var("FROM_EMAIL").ok())?
        .set_override_option("application.port", std::env::var("PORT").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// Settings for the form client talking to a running service.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_url: String,
    pub submit_timeout: Duration,
    pub health_timeout: Duration,
    pub health_check_interval: Duration,
}

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            submit_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(5),
            health_check_interval: Duration::from_secs(30),
        }
    }
}

/// Client defaults, with the service location taken from `API_URL` when set.
pub fn get_client_configuration() -> ClientSettings {
    let mut settings = ClientSettings::default();
    if let Some(api_url) = std::env::var("API_URL").ok().filter(|url| !url.is_empty()) {
        settings.api_url = api_url.trim_end_matches('/').to_owned();
    }
    settings
}
