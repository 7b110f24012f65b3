//! Two-step signup and login exchanges as client-side state machines.
//!
//! Each step resends the credentials captured by the first step. A failed
//! request keeps the flow on its current step and records the message.

use crate::client::AccountApi;
use crate::models::{LoginInput, SignupInput};

const NEED_CREDENTIALS: &str = "enter a username and password first";

/// Steps of the signup exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SignupStep {
    /// Waiting for a username and password.
    #[default]
    Credentials,
    /// Credentials accepted; the server asked for an age.
    AwaitingAge {
        /// Prompt returned by the server.
        message: String,
    },
    /// The account exists.
    Complete {
        /// New account id.
        id: String,
        /// Auth key needed by the second login step.
        code: String,
        /// Confirmation returned by the server.
        message: String,
    },
}

/// Client-side signup exchange.
#[derive(Debug, Clone, Default)]
pub struct SignupFlow {
    step: SignupStep,
    credentials: Option<(String, String)>,
    error: Option<String>,
}

impl SignupFlow {
    /// A flow waiting for credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> &SignupStep {
        &self.step
    }

    /// Message recorded by the last failed request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Step one: send the credentials without an age.
    pub async fn submit_credentials<A>(&mut self, api: &A, username: &str, password: &str)
    where
        A: AccountApi + ?Sized,
    {
        let input = SignupInput {
            username: username.to_owned(),
            password: password.to_owned(),
            age: None,
        };
        match api.signup(&input).await {
            Ok(reply) => {
                self.error = None;
                self.credentials = Some((input.username, input.password));
                self.step = match (reply.id, reply.code) {
                    (Some(id), Some(code)) => SignupStep::Complete {
                        id,
                        code,
                        message: reply.message,
                    },
                    _ => SignupStep::AwaitingAge {
                        message: reply.message,
                    },
                };
            }
            Err(err) => self.error = Some(err.user_message()),
        }
    }

    /// Step two: resend the credentials with the age.
    pub async fn submit_age<A>(&mut self, api: &A, age: u32)
    where
        A: AccountApi + ?Sized,
    {
        let Some((username, password)) = self.credentials.clone() else {
            self.error = Some(NEED_CREDENTIALS.to_owned());
            return;
        };
        let input = SignupInput {
            username,
            password,
            age: Some(age),
        };
        match api.signup(&input).await {
            Ok(reply) => match (reply.id, reply.code) {
                (Some(id), Some(code)) => {
                    self.error = None;
                    self.step = SignupStep::Complete {
                        id,
                        code,
                        message: reply.message,
                    };
                }
                _ => self.error = Some(reply.message),
            },
            Err(err) => self.error = Some(err.user_message()),
        }
    }
}

/// Steps of the login exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginStep {
    /// Waiting for a username and password.
    #[default]
    Credentials,
    /// Credentials accepted; the server asked for the auth key.
    AwaitingAuthKey {
        /// Prompt returned by the server.
        message: String,
    },
    /// Logged in.
    Authenticated {
        /// Account id, when the server reported one.
        id: Option<String>,
        /// Greeting returned by the server.
        message: String,
    },
}

/// Client-side login exchange.
#[derive(Debug, Clone, Default)]
pub struct LoginFlow {
    step: LoginStep,
    credentials: Option<(String, String)>,
    error: Option<String>,
}

impl LoginFlow {
    /// A flow waiting for credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> &LoginStep {
        &self.step
    }

    /// Message recorded by the last failed request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Step one: check the credentials.
    pub async fn submit_credentials<A>(&mut self, api: &A, username: &str, password: &str)
    where
        A: AccountApi + ?Sized,
    {
        let input = LoginInput {
            username: username.to_owned(),
            password: password.to_owned(),
            auth_key: None,
        };
        match api.login(&input).await {
            Ok(reply) => {
                self.error = None;
                self.credentials = Some((input.username, input.password));
                self.step = LoginStep::AwaitingAuthKey {
                    message: reply.message,
                };
            }
            Err(err) => self.error = Some(err.user_message()),
        }
    }

    /// Step two: resend the credentials with the auth key.
    ///
    /// Only an answer mentioning "congrats" in any case completes the login.
    pub async fn submit_auth_key<A>(&mut self, api: &A, auth_key: &str)
    where
        A: AccountApi + ?Sized,
    {
        let Some((username, password)) = self.credentials.clone() else {
            self.error = Some(NEED_CREDENTIALS.to_owned());
            return;
        };
        let input = LoginInput {
            username,
            password,
            auth_key: Some(auth_key.to_owned()),
        };
        match api.login(&input).await {
            Ok(reply) if is_greeting(&reply.message) => {
                self.error = None;
                self.step = LoginStep::Authenticated {
                    id: reply.id,
                    message: reply.message,
                };
            }
            Ok(reply) => self.error = Some(reply.message),
            Err(err) => self.error = Some(err.user_message()),
        }
    }
}

fn is_greeting(message: &str) -> bool {
    message.to_lowercase().contains("congrats")
}
