use askama::Template;
use chrono::{DateTime, Utc};

use crate::domain::{CustomEmail, TestEmail};

pub const TEST_EMAIL_SUBJECT: &str = "Test Email from Resend Demo";
const DEFAULT_TEST_MESSAGE: &str = "Default test message";

#[derive(Template)]
#[template(path = "test_email.html")]
struct TestEmailTemplate<'a> {
    sender: &'a str,
    sent_at: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "custom_email.html")]
struct CustomEmailTemplate<'a> {
    sender: Option<&'a str>,
    sent_at: &'a str,
    message: &'a str,
}

fn display_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn render_test_email(email: &TestEmail, at: DateTime<Utc>) -> askama::Result<String> {
    TestEmailTemplate {
        sender: email.sender.as_ref(),
        sent_at: &display_time(at),
        message: email.message.as_deref().unwrap_or(DEFAULT_TEST_MESSAGE),
    }
    .render()
}

pub fn render_custom_email(email: &CustomEmail, at: DateTime<Utc>) -> askama::Result<String> {
    CustomEmailTemplate {
        sender: email.sender.as_ref().map(|sender| sender.as_ref()),
        sent_at: &display_time(at),
        message: &email.message,
    }
    .render()
}
