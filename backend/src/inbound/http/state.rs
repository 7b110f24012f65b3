//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountFlow, PetRegistry, PetRepository, RandomSource, StatsQuery, StudentRegistry,
    StudentRepository, UserDirectory, UserRepository,
};
use crate::domain::{AccountService, PetService, StatsService, StudentService, UserService};

/// Repository handles for the three collections.
pub struct RecordStores<S, U, P> {
    pub students: Arc<S>,
    pub users: Arc<U>,
    pub pets: Arc<P>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentRegistry>,
    pub users: Arc<dyn UserDirectory>,
    pub pets: Arc<dyn PetRegistry>,
    pub accounts: Arc<dyn AccountFlow>,
    pub stats: Arc<dyn StatsQuery>,
}

impl HttpState {
    /// Wire every driving port to its service over the given stores.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use recordkeeper::domain::DEFAULT_MAX_ID_ATTEMPTS;
    /// use recordkeeper::inbound::http::state::{HttpState, RecordStores};
    /// use recordkeeper::outbound::memory::{MemoryPetStore, MemoryStudentStore, MemoryUserStore};
    /// use recordkeeper::outbound::random::ThreadRandomSource;
    ///
    /// let stores = RecordStores {
    ///     students: Arc::new(MemoryStudentStore::default()),
    ///     users: Arc::new(MemoryUserStore::default()),
    ///     pets: Arc::new(MemoryPetStore::default()),
    /// };
    /// let state = HttpState::from_stores(
    ///     stores,
    ///     Arc::new(ThreadRandomSource),
    ///     Arc::new(DefaultClock),
    ///     DEFAULT_MAX_ID_ATTEMPTS,
    /// );
    /// let _students = state.students.clone();
    /// ```
    pub fn from_stores<S, U, P>(
        stores: RecordStores<S, U, P>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
        max_id_attempts: u32,
    ) -> Self
    where
        S: StudentRepository + 'static,
        U: UserRepository + 'static,
        P: PetRepository + 'static,
    {
        let RecordStores {
            students,
            users,
            pets,
        } = stores;
        Self {
            students: Arc::new(
                StudentService::new(students, random.clone(), clock)
                    .with_max_id_attempts(max_id_attempts),
            ),
            users: Arc::new(UserService::new(users.clone(), random.clone())),
            pets: Arc::new(PetService::new(pets.clone(), users.clone())),
            accounts: Arc::new(AccountService::new(users.clone(), random)),
            stats: Arc::new(StatsService::new(users, pets)),
        }
    }
}
