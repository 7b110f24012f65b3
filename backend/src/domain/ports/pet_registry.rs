//! Driving port for pet records.

use async_trait::async_trait;

use crate::domain::{Error, Pet, PetDraft, PetId, PetPatch, UserId};

/// Use-case port the pet handlers call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRegistry: Send + Sync {
    /// All pets, or only those owned by `owner`.
    async fn list(&self, owner: Option<UserId>) -> Result<Vec<Pet>, Error>;

    async fn get(&self, id: &PetId) -> Result<Pet, Error>;

    /// Create a pet after checking that its owner exists.
    async fn create(&self, draft: PetDraft) -> Result<Pet, Error>;

    async fn update(&self, id: &PetId, patch: PetPatch) -> Result<Pet, Error>;

    async fn delete(&self, id: &PetId) -> Result<(), Error>;
}
