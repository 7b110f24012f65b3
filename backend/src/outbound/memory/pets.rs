//! In-memory [`PetRepository`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{PetPersistenceError, PetRepository};
use crate::domain::{Pet, PetId, PetPatch, UserId};

/// Pet collection held in process memory.
#[derive(Debug, Default)]
pub struct MemoryPetStore {
    pets: RwLock<Vec<Pet>>,
}

#[async_trait]
impl PetRepository for MemoryPetStore {
    async fn list(&self) -> Result<Vec<Pet>, PetPersistenceError> {
        Ok(self.pets.read().await.clone())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Pet>, PetPersistenceError> {
        let pets = self.pets.read().await;
        Ok(pets
            .iter()
            .filter(|pet| pet.owner_id == *owner)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let pets = self.pets.read().await;
        Ok(pets.iter().find(|pet| pet.id == *id).cloned())
    }

    async fn insert(&self, pet: &Pet) -> Result<(), PetPersistenceError> {
        self.pets.write().await.push(pet.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &PetId,
        patch: &PetPatch,
    ) -> Result<Option<Pet>, PetPersistenceError> {
        let mut pets = self.pets.write().await;
        let Some(pet) = pets.iter_mut().find(|pet| pet.id == *id) else {
            return Ok(None);
        };
        pet.apply(patch);
        Ok(Some(pet.clone()))
    }

    async fn delete(&self, id: &PetId) -> Result<bool, PetPersistenceError> {
        let mut pets = self.pets.write().await;
        let before = pets.len();
        pets.retain(|pet| pet.id != *id);
        Ok(pets.len() != before)
    }

    async fn count(&self) -> Result<u64, PetPersistenceError> {
        Ok(self.pets.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PetDetails, PetDraft, Species};
    use rstest::rstest;

    fn pet(owner: UserId, name: &str) -> Pet {
        let draft = PetDraft::try_new(owner, name, Species::Cat, PetDetails::default())
            .expect("draft");
        Pet::from_draft(PetId::random(), draft)
    }

    #[rstest]
    #[tokio::test]
    async fn owner_filter_keeps_insertion_order() {
        let store = MemoryPetStore::default();
        let ada = UserId::random();
        let grace = UserId::random();
        for (owner, name) in [(ada, "Tom"), (grace, "Rex"), (ada, "Kit")] {
            store.insert(&pet(owner, name)).await.expect("insert");
        }

        let owned = store.list_by_owner(&ada).await.expect("list");

        let names: Vec<_> = owned.iter().map(|pet| pet.name.as_str()).collect();
        assert_eq!(names, ["Tom", "Kit"]);
        assert_eq!(store.count().await.expect("count"), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_pet_is_none() {
        let store = MemoryPetStore::default();
        let patch = PetPatch::try_new(None, Some("Max".to_owned()), None, PetDetails::default())
            .expect("patch");

        assert!(store
            .update(&PetId::random(), &patch)
            .await
            .expect("update")
            .is_none());
    }
}
