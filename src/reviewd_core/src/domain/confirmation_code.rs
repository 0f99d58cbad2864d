use std::fmt;

use rand::Rng;
use thiserror::Error;

/// Length of every issued confirmation code.
pub const CODE_LENGTH: usize = 20;

/// Alphabet the code characters are drawn from.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error)]
pub enum ConfirmationCodeError {
    #[error("Confirmation code cannot be empty")]
    Empty,
}

/// Single-use secret mailed at signup and redeemed for a bearer token.
///
/// Codes are opaque strings, compared byte-exact with no normalization.
#[derive(Clone, PartialEq, Eq)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Generate a fresh random code.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parse a client-supplied code for comparison against a stored one.
    pub fn parse(value: String) -> Result<Self, ConfirmationCodeError> {
        if value.is_empty() {
            return Err(ConfirmationCodeError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes are secrets; keep them out of logs.
impl fmt::Debug for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfirmationCode(..)")
    }
}
