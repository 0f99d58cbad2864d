use thiserror::Error;

use crate::domain::{
    confirmation_code::ConfirmationCode,
    email::{Email, EmailError},
    role::Role,
    username::{Username, UsernameError},
};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0}")]
    InvalidUsername(#[from] UsernameError),
    #[error("{0}")]
    InvalidEmail(#[from] EmailError),
}

/// An account on the review platform.
///
/// The confirmation code is transient: overwritten on every signup, cleared
/// after a successful token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    email: Email,
    role: Role,
    confirmation_code: Option<ConfirmationCode>,
}

impl User {
    /// Create a fresh account with the default role and no outstanding code.
    pub fn new(username: Username, email: Email) -> Self {
        Self {
            username,
            email,
            role: Role::default(),
            confirmation_code: None,
        }
    }

    pub fn with_role(username: Username, email: Email, role: Role) -> Self {
        Self {
            username,
            email,
            role,
            confirmation_code: None,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn confirmation_code(&self) -> Option<&ConfirmationCode> {
        self.confirmation_code.as_ref()
    }

    /// Replace any outstanding confirmation code.
    pub fn set_confirmation_code(&mut self, code: ConfirmationCode) {
        self.confirmation_code = Some(code);
    }

    /// Invalidate the outstanding code after redemption.
    pub fn clear_confirmation_code(&mut self) {
        self.confirmation_code = None;
    }
}
