use serde::{Deserialize, Serialize};

use crate::app::error::AppError;
use crate::domain::{CustomEmail, EmailAddress, SenderName, TestEmail};

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct SendTestRequestBody {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct SendCustomRequestBody {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendTestResponseBody {
    pub success: bool,
    pub message: String,
    pub email_id: String,
    pub to: String,
    pub sent_at: String,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendCustomResponseBody {
    pub success: bool,
    pub message: String,
    pub email_id: String,
    pub to: String,
    pub subject: String,
    pub sent_at: String,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EmailStatusResponseBody {
    pub message: String,
    pub email_id: String,
    pub note: String,
}

/// Form fields arrive as empty strings when left blank.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn recipient(to: String) -> Result<EmailAddress, AppError> {
    EmailAddress::try_from(to)
        .map_err(|_| AppError::invalid_field("to", "Invalid recipient email format"))
}

fn sender(from: Option<String>) -> Result<Option<SenderName>, AppError> {
    from.filter(|f| !f.trim().is_empty())
        .map(SenderName::try_from)
        .transpose()
        .map_err(|e| AppError::invalid_field("from", format!("Invalid sender name: {e}")))
}

impl TryFrom<SendTestRequestBody> for TestEmail {
    type Error = AppError;
    fn try_from(value: SendTestRequestBody) -> Result<Self, Self::Error> {
        let to = present(value.to)
            .ok_or_else(|| AppError::invalid_field("to", "Recipient email is required"))?;
        let recipient = recipient(to)?;
        let sender = sender(value.from)?.unwrap_or_default();

        Ok(Self {
            recipient,
            sender,
            message: present(value.message),
        })
    }
}

impl TryFrom<SendCustomRequestBody> for CustomEmail {
    type Error = AppError;
    fn try_from(value: SendCustomRequestBody) -> Result<Self, Self::Error> {
        let to = present(value.to);
        let subject = present(value.subject);
        let message = present(value.message);

        let (to, subject, message) = match (to, subject, message) {
            (Some(to), Some(subject), Some(message)) => (to, subject, message),
            (to, subject, message) => {
                let missing = [
                    ("to", to.is_none()),
                    ("subject", subject.is_none()),
                    ("message", message.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect();
                return Err(AppError::missing_fields(missing));
            }
        };

        Ok(Self {
            recipient: recipient(to)?,
            subject,
            message,
            sender: sender(value.from)?,
        })
    }
}
