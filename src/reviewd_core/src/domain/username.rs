use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Maximum accepted handle length, matching the storage column width.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Handles may not collide with the profile shortcut path (`/users/me`).
pub const RESERVED_PROFILE_TOKEN: &str = "me";

static HANDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+\z").expect("handle pattern is valid"));

#[derive(Debug, Error)]
pub enum UsernameError {
    #[error("Username cannot be empty")]
    Empty,
    #[error("Username cannot be longer than {MAX_USERNAME_LENGTH} characters")]
    TooLong,
    #[error("Username '{RESERVED_PROFILE_TOKEN}' is reserved")]
    Reserved,
    #[error("Username contains disallowed characters: {0}")]
    DisallowedCharacters(String),
}

/// A validated account handle.
///
/// Accepts word characters plus `.`, `@`, `+` and `-`, and rejects the
/// reserved profile-path token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(UsernameError::Empty);
        }
        if value.chars().count() > MAX_USERNAME_LENGTH {
            return Err(UsernameError::TooLong);
        }
        if value == RESERVED_PROFILE_TOKEN {
            return Err(UsernameError::Reserved);
        }
        if !HANDLE_PATTERN.is_match(&value) {
            let offending: String = value
                .chars()
                .filter(|c| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-')))
                .collect();
            return Err(UsernameError::DisallowedCharacters(offending));
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
