//! Builders for the HTTP state over in-memory or PostgreSQL stores.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use recordkeeper::inbound::http::state::{HttpState, RecordStores};
use recordkeeper::outbound::memory::{MemoryPetStore, MemoryStudentStore, MemoryUserStore};
use recordkeeper::outbound::persistence::{
    DbPool, DieselPetRepository, DieselStudentRepository, DieselUserRepository,
};
use recordkeeper::outbound::random::ThreadRandomSource;

use super::ServerConfig;

fn diesel_stores(
    pool: &DbPool,
) -> RecordStores<DieselStudentRepository, DieselUserRepository, DieselPetRepository> {
    RecordStores {
        students: Arc::new(DieselStudentRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        pets: Arc::new(DieselPetRepository::new(pool.clone())),
    }
}

fn memory_stores() -> RecordStores<MemoryStudentStore, MemoryUserStore, MemoryPetStore> {
    RecordStores {
        students: Arc::new(MemoryStudentStore::default()),
        users: Arc::new(MemoryUserStore::default()),
        pets: Arc::new(MemoryPetStore::default()),
    }
}

/// Build the shared handler state, choosing PostgreSQL when a pool is
/// configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let random = Arc::new(ThreadRandomSource);
    let clock = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving records from PostgreSQL");
            HttpState::from_stores(diesel_stores(pool), random, clock, config.max_id_attempts)
        }
        None => {
            info!("no database configured; records live in memory");
            HttpState::from_stores(memory_stores(), random, clock, config.max_id_attempts)
        }
    };
    web::Data::new(state)
}
