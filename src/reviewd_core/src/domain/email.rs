use std::fmt;

use thiserror::Error;

/// Maximum accepted address length, matching the storage column width.
pub const MAX_EMAIL_LENGTH: usize = 254;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,
    #[error("Email cannot be longer than {MAX_EMAIL_LENGTH} characters")]
    TooLong,
    #[error("Email is not a valid address")]
    Malformed,
}

/// A validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(EmailError::Empty);
        }
        if value.chars().count() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }
        let mut parts = value.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailError::Malformed);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
