use derive_more::Display;
use once_cell::sync::Lazy;
use regex_lite::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("the email pattern should compile")
});

/// An address accepted by the `local@domain.tld` shape check.
///
/// Only the shape is checked; deliverability is up to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn is_valid(value: &str) -> bool {
        EMAIL_PATTERN.is_match(value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err("invalid email".into())
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
