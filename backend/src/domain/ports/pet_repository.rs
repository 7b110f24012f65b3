//! Port abstraction for the pet collection.

use async_trait::async_trait;

use crate::domain::{Pet, PetId, PetPatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pet repository adapters.
    pub enum PetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "pet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pet repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Pet>, PetPersistenceError>;

    /// Pets whose `owner_id` equals `owner`, in insertion order.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Pet>, PetPersistenceError>;

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError>;

    async fn insert(&self, pet: &Pet) -> Result<(), PetPersistenceError>;

    async fn update(&self, id: &PetId, patch: &PetPatch)
    -> Result<Option<Pet>, PetPersistenceError>;

    async fn delete(&self, id: &PetId) -> Result<bool, PetPersistenceError>;

    async fn count(&self) -> Result<u64, PetPersistenceError>;
}
