//! Driving port for account administration.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId, UserPatch};

/// Use-case port the user handlers call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// All accounts, or those whose username contains `search` ignoring case.
    async fn list(&self, search: Option<String>) -> Result<Vec<User>, Error>;

    async fn get(&self, id: &UserId) -> Result<User, Error>;

    /// Create an account; a fresh auth code is always issued.
    async fn create(&self, draft: UserDraft) -> Result<User, Error>;

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, Error>;

    async fn delete(&self, id: &UserId) -> Result<(), Error>;
}
