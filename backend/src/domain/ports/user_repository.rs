//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All accounts in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Accounts whose username contains `fragment`, ignoring ASCII case.
    async fn search_by_username(&self, fragment: &str) -> Result<Vec<User>, UserPersistenceError>;

    /// Accounts whose username equals `username` exactly. Usernames are not
    /// unique, so several may match.
    async fn find_by_username(&self, username: &str) -> Result<Vec<User>, UserPersistenceError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;

    async fn count(&self) -> Result<u64, UserPersistenceError>;

    /// Ages of every account that reported one.
    async fn reported_ages(&self) -> Result<Vec<u32>, UserPersistenceError>;
}
