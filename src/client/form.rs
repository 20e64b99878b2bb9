use serde::Serialize;

use super::{ApiClient, ApiStatus, ClientError};
use crate::app::email::schema::{SendCustomRequestBody, SendTestRequestBody};
use crate::domain::EmailAddress;

const API_UNAVAILABLE: &str = "API is not available. Please check if the backend is running.";
const DEFAULT_DETAILS: &str = "Please check your configuration";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestEmailForm {
    pub to: String,
    pub from: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomEmailForm {
    pub to: String,
    pub subject: String,
    pub message: String,
    pub from: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short message for the user about the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Outcome of the last submission that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResponse {
    Success(serde_json::Value),
    Error {
        error: String,
        details: String,
        status: Option<u16>,
    },
}

/// The two independent send forms plus their shared submission state.
pub struct EmailForm {
    client: ApiClient,
    pub test: TestEmailForm,
    pub custom: CustomEmailForm,
    is_loading: bool,
    response: Option<FormResponse>,
}

impl EmailForm {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            test: TestEmailForm::default(),
            custom: CustomEmailForm::default(),
            is_loading: false,
            response: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn inputs_disabled(&self) -> bool {
        self.is_loading
    }

    pub fn submit_enabled(&self, status: ApiStatus) -> bool {
        !self.is_loading && status.is_online()
    }

    pub fn response(&self) -> Option<&FormResponse> {
        self.response.as_ref()
    }

    #[tracing::instrument(name = "Submit test email form", skip(self), fields(to = %self.test.to))]
    pub async fn submit_test(&mut self, status: ApiStatus) -> Notice {
        if self.test.to.is_empty() {
            return Notice::error("Please enter recipient email address");
        }
        if let Some(blocked) = precheck(&self.test.to, status) {
            return blocked;
        }

        let body = SendTestRequestBody {
            to: Some(self.test.to.clone()),
            from: Some(self.test.from.clone()),
            message: Some(self.test.message.clone()),
        };

        self.begin();
        let outcome = self.client.send_test(&body).await;
        self.is_loading = false;

        match outcome {
            Ok(sent) => {
                self.record_success(&sent);
                self.test = TestEmailForm::default();
                Notice::success("Test email sent successfully! 🎉")
            }
            Err(e) => self.fail(e),
        }
    }

    #[tracing::instrument(name = "Submit custom email form", skip(self), fields(to = %self.custom.to))]
    pub async fn submit_custom(&mut self, status: ApiStatus) -> Notice {
        let form = &self.custom;
        if form.to.is_empty() || form.subject.is_empty() || form.message.is_empty() {
            return Notice::error("Please fill in all required fields");
        }
        if let Some(blocked) = precheck(&form.to, status) {
            return blocked;
        }

        let body = SendCustomRequestBody {
            to: Some(form.to.clone()),
            subject: Some(form.subject.clone()),
            message: Some(form.message.clone()),
            from: Some(form.from.clone()),
        };

        self.begin();
        let outcome = self.client.send_custom(&body).await;
        self.is_loading = false;

        match outcome {
            Ok(sent) => {
                self.record_success(&sent);
                self.custom = CustomEmailForm::default();
                Notice::success("Custom email sent successfully! 🎉")
            }
            Err(e) => self.fail(e),
        }
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.response = None;
    }

    fn record_success(&mut self, sent: &impl Serialize) {
        self.response = match serde_json::to_value(sent) {
            Ok(value) => Some(FormResponse::Success(value)),
            Err(e) => {
                tracing::error!(detail = %e, "failed to record the service response");
                None
            }
        };
    }

    /// Records the failure and leaves the entered values in place.
    fn fail(&mut self, e: ClientError) -> Notice {
        tracing::error!(detail = %e, "email submission failed");
        let error = e.to_string();
        self.response = Some(FormResponse::Error {
            error: error.clone(),
            details: e.details().unwrap_or(DEFAULT_DETAILS).to_owned(),
            status: e.status().map(|s| s.as_u16()),
        });
        Notice::error(format!("Failed to send email: {}", error))
    }
}

/// Checks shared by both forms once the required fields are filled in.
fn precheck(to: &str, status: ApiStatus) -> Option<Notice> {
    if !EmailAddress::is_valid(to) {
        return Some(Notice::error("Please enter a valid email address"));
    }
    if !status.is_online() {
        return Some(Notice::error(API_UNAVAILABLE));
    }
    None
}
