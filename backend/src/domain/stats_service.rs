//! Collection statistics.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::Error;
use crate::domain::ports::{
    AgeSummary, PetCount, PetPersistenceError, PetRepository, StatsQuery, UserCount,
    UserRepository,
};
use crate::domain::user_service::map_user_repository_error;

fn map_pet_error(error: PetPersistenceError) -> Error {
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

/// Read-only service implementing [`StatsQuery`].
#[derive(Clone)]
pub struct StatsService<U, P> {
    users: Arc<U>,
    pets: Arc<P>,
}

impl<U, P> StatsService<U, P> {
    pub fn new(users: Arc<U>, pets: Arc<P>) -> Self {
        Self { users, pets }
    }
}

#[async_trait]
impl<U, P> StatsQuery for StatsService<U, P>
where
    U: UserRepository,
    P: PetRepository,
{
    async fn user_count(&self) -> Result<UserCount, Error> {
        let count = self
            .users
            .count()
            .await
            .map_err(map_user_repository_error)?;
        Ok(UserCount { count })
    }

    async fn user_ages(&self) -> Result<AgeSummary, Error> {
        let ages = self
            .users
            .reported_ages()
            .await
            .map_err(map_user_repository_error)?;
        Ok(AgeSummary::from_ages(&ages))
    }

    async fn pet_count(&self) -> Result<PetCount, Error> {
        let count = self.pets.count().await.map_err(map_pet_error)?;
        Ok(PetCount { count })
    }
}
