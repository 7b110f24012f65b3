//! Driving port for the two-step signup and login exchanges.
//!
//! Both exchanges are stateless on the server: each step resends the
//! credentials and the outcome tells the caller which field to supply next.

use async_trait::async_trait;

use crate::domain::{AuthCode, Error, UserId};

/// Signup input. `age` is requested in a second step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub age: Option<u32>,
}

/// Result of a signup step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Credentials are acceptable; nothing was stored yet.
    AgeRequired { message: String },
    /// The account exists and carries `code`.
    Created {
        message: String,
        id: UserId,
        code: AuthCode,
    },
}

/// Login input. `auth_key` is requested in a second step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub auth_key: Option<String>,
}

/// Result of a successful login step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    AuthKeyRequired { message: String },
    Authenticated { message: String, id: UserId },
}

/// Use-case port for account signup and login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountFlow: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> Result<SignupOutcome, Error>;

    /// Rejects unknown credentials and mismatched auth keys with
    /// `Unauthorized`.
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, Error>;
}
