use derive_more::Display;
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_SENDER_NAME: &str = "Demo Application";

/// The display name shown inside an email body.
///
/// It is never used as an address, and templates escape it, so only the
/// length is constrained.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct SenderName(String);

impl Default for SenderName {
    fn default() -> Self {
        Self(DEFAULT_SENDER_NAME.to_owned())
    }
}

impl TryFrom<String> for SenderName {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("name is empty".into());
        }

        if value.graphemes(true).count() > 256 {
            return Err("name is too long".into());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for SenderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
