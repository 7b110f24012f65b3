//! In-memory [`UserRepository`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserPatch};

/// User collection held in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    async fn matching(&self, keep: impl Fn(&User) -> bool) -> Vec<User> {
        let users = self.users.read().await;
        users.iter().filter(|user| keep(user)).cloned().collect()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.users.read().await.clone())
    }

    async fn search_by_username(&self, fragment: &str) -> Result<Vec<User>, UserPersistenceError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .matching(|user| user.username.to_lowercase().contains(&needle))
            .await)
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.matching(|user| user.username == username).await)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|user| user.id == *id) else {
            return Ok(None);
        };
        user.apply(patch);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|user| user.id != *id);
        Ok(users.len() != before)
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn reported_ages(&self) -> Result<Vec<u32>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.iter().filter_map(|user| user.age).collect())
    }
}
