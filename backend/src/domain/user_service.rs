//! Account administration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{RandomSource, UserDirectory, UserPersistenceError, UserRepository};
use crate::domain::{Error, User, UserDraft, UserId, UserPatch};

pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn user_not_found(id: &UserId) -> Error {
    Error::not_found(format!("User {id} not found"))
}

/// Build and store a new account with a freshly drawn auth code.
pub(crate) async fn register_user<R>(
    users: &R,
    random: &dyn RandomSource,
    draft: UserDraft,
) -> Result<User, Error>
where
    R: UserRepository + ?Sized,
{
    let user = User::from_draft(UserId::random(), draft, random.auth_code());
    users
        .insert(&user)
        .await
        .map_err(map_user_repository_error)?;
    Ok(user)
}

/// User service implementing the [`UserDirectory`] driving port.
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
    random: Arc<dyn RandomSource>,
}

impl<R> UserService<R> {
    pub fn new(users: Arc<R>, random: Arc<dyn RandomSource>) -> Self {
        Self { users, random }
    }
}

#[async_trait]
impl<R> UserDirectory for UserService<R>
where
    R: UserRepository,
{
    async fn list(&self, search: Option<String>) -> Result<Vec<User>, Error> {
        let fragment = search
            .as_deref()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty());
        let users = match fragment {
            Some(fragment) => self.users.search_by_username(fragment).await,
            None => self.users.list().await,
        };
        users.map_err(map_user_repository_error)
    }

    async fn get(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn create(&self, draft: UserDraft) -> Result<User, Error> {
        register_user(self.users.as_ref(), self.random.as_ref(), draft).await
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, Error> {
        if patch.is_empty() {
            return self.get(id).await;
        }
        self.users
            .update(id, &patch)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn delete(&self, id: &UserId) -> Result<(), Error> {
        let removed = self
            .users
            .delete(id)
            .await
            .map_err(map_user_repository_error)?;
        if removed {
            Ok(())
        } else {
            Err(user_not_found(id))
        }
    }
}
