pub mod email_address;
pub mod sender_name;

pub use self::email_address::EmailAddress;
pub use self::sender_name::SenderName;

/// A validated request for the canned test email.
pub struct TestEmail {
    pub recipient: EmailAddress,
    pub sender: SenderName,
    pub message: Option<String>,
}

/// A validated request for an email whose subject and body come from the user.
pub struct CustomEmail {
    pub recipient: EmailAddress,
    pub subject: String,
    pub message: String,
    pub sender: Option<SenderName>,
}
