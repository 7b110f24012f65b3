//! PostgreSQL-backed `PetRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PetPersistenceError, PetRepository};
use crate::domain::{Gender, HealthStatus, Pet, PetId, PetPatch, Species, UserId};

use super::error_mapping::{from_column, map_diesel_error, map_pool_error, to_column};
use super::models::{PetRow, PetValues};
use super::pool::{DbPool, PoolError};
use super::schema::pets;

fn pool_error(error: PoolError) -> PetPersistenceError {
    map_pool_error(error, PetPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PetPersistenceError {
    map_diesel_error(
        error,
        PetPersistenceError::query,
        PetPersistenceError::connection,
    )
}

fn row_to_pet(row: PetRow) -> Result<Pet, PetPersistenceError> {
    let id = PetId::from_uuid(row.id);
    let corrupt = |column: &str| PetPersistenceError::query(format!("pet {id} has an invalid {column}"));
    let species = row
        .species
        .parse::<Species>()
        .map_err(|_| corrupt("species"))?;
    let status = row
        .status
        .parse::<HealthStatus>()
        .map_err(|_| corrupt("status"))?;
    let gender = row
        .gender
        .map(|gender| gender.parse::<Gender>().map_err(|_| corrupt("gender")))
        .transpose()?;
    let age = row
        .age
        .map(|age| from_column(age).ok_or_else(|| corrupt("age")))
        .transpose()?;
    Ok(Pet {
        id,
        owner_id: UserId::from_uuid(row.owner_id),
        name: row.name,
        species,
        breed: row.breed,
        age,
        gender,
        status,
        notes: row.notes,
    })
}

fn values(pet: &Pet) -> Result<PetValues<'_>, PetPersistenceError> {
    let age = pet
        .age
        .map(|age| {
            to_column(age)
                .ok_or_else(|| PetPersistenceError::query("pet age does not fit the age column"))
        })
        .transpose()?;
    Ok(PetValues {
        id: *pet.id.as_uuid(),
        owner_id: *pet.owner_id.as_uuid(),
        name: &pet.name,
        species: pet.species.as_str(),
        breed: pet.breed.as_deref(),
        age,
        gender: pet.gender.map(Gender::as_str),
        status: pet.status.as_str(),
        notes: pet.notes.as_deref(),
    })
}

/// Diesel-backed implementation of the [`PetRepository`] port.
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn list(&self) -> Result<Vec<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<PetRow> = pets::table
            .order((pets::created_at.asc(), pets::id.asc()))
            .select(PetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_pet).collect()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<PetRow> = pets::table
            .filter(pets::owner_id.eq(owner.as_uuid()))
            .order((pets::created_at.asc(), pets::id.asc()))
            .select(PetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_pet).collect()
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<PetRow> = pets::table
            .filter(pets::id.eq(id.as_uuid()))
            .select(PetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_pet).transpose()
    }

    async fn insert(&self, pet: &Pet) -> Result<(), PetPersistenceError> {
        let row = values(pet)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(pets::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn update(
        &self,
        id: &PetId,
        patch: &PetPatch,
    ) -> Result<Option<Pet>, PetPersistenceError> {
        let Some(mut pet) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        pet.apply(patch);

        let row = values(&pet)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(pets::table.filter(pets::id.eq(id.as_uuid())))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok((updated > 0).then_some(pet))
    }

    async fn delete(&self, id: &PetId) -> Result<bool, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(pets::table.filter(pets::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<u64, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = pets::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        u64::try_from(count).map_err(|_| PetPersistenceError::query("negative pet count"))
    }
}
