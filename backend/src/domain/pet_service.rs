//! Pet record service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::{PetPersistenceError, PetRegistry, PetRepository, UserRepository};
use crate::domain::user_service::map_user_repository_error;
use crate::domain::{Error, Pet, PetDraft, PetId, PetPatch, UserId};

fn map_repository_error(error: PetPersistenceError) -> Error {
    match error {
        PetPersistenceError::Connection { message } => {
            warn!(%message, "pet repository unavailable");
            Error::service_unavailable(format!("pet repository unavailable: {message}"))
        }
        PetPersistenceError::Query { message } => {
            error!(%message, "pet repository query failed");
            Error::internal(format!("pet repository error: {message}"))
        }
    }
}

fn not_found(id: &PetId) -> Error {
    Error::not_found(format!("Pet {id} not found"))
}

/// Pet service implementing the [`PetRegistry`] driving port.
///
/// Owner existence is checked once at creation; later owner deletions leave
/// pets in place.
#[derive(Clone)]
pub struct PetService<P, U> {
    pets: Arc<P>,
    users: Arc<U>,
}

impl<P, U> PetService<P, U> {
    pub fn new(pets: Arc<P>, users: Arc<U>) -> Self {
        Self { pets, users }
    }
}

impl<P, U> PetService<P, U>
where
    P: PetRepository,
    U: UserRepository,
{
    async fn ensure_owner_exists(&self, owner: &UserId) -> Result<(), Error> {
        let found = self
            .users
            .find_by_id(owner)
            .await
            .map_err(map_user_repository_error)?;
        if found.is_some() {
            return Ok(());
        }
        Err(Error::invalid_request(format!("Owner {owner} does not exist"))
            .with_details(json!({ "field": "ownerId", "code": "invalid_value" })))
    }
}

#[async_trait]
impl<P, U> PetRegistry for PetService<P, U>
where
    P: PetRepository,
    U: UserRepository,
{
    async fn list(&self, owner: Option<UserId>) -> Result<Vec<Pet>, Error> {
        let pets = match owner {
            Some(owner) => self.pets.list_by_owner(&owner).await,
            None => self.pets.list().await,
        };
        pets.map_err(map_repository_error)
    }

    async fn get(&self, id: &PetId) -> Result<Pet, Error> {
        self.pets
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, draft: PetDraft) -> Result<Pet, Error> {
        self.ensure_owner_exists(draft.owner_id()).await?;
        let pet = Pet::from_draft(PetId::random(), draft);
        self.pets.insert(&pet).await.map_err(map_repository_error)?;
        Ok(pet)
    }

    async fn update(&self, id: &PetId, patch: PetPatch) -> Result<Pet, Error> {
        if patch.is_empty() {
            return self.get(id).await;
        }
        if let Some(owner) = patch.owner_id() {
            self.ensure_owner_exists(owner).await?;
        }
        self.pets
            .update(id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: &PetId) -> Result<(), Error> {
        let removed = self.pets.delete(id).await.map_err(map_repository_error)?;
        if removed { Ok(()) } else { Err(not_found(id)) }
    }
}
