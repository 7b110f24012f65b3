//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_flow;
mod pet_registry;
mod pet_repository;
mod random_source;
mod stats_query;
mod student_registry;
mod student_repository;
mod user_directory;
mod user_repository;

pub use account_flow::{AccountFlow, LoginOutcome, LoginRequest, SignupOutcome, SignupRequest};
#[cfg(test)]
pub use account_flow::MockAccountFlow;
pub use pet_registry::PetRegistry;
#[cfg(test)]
pub use pet_registry::MockPetRegistry;
pub use pet_repository::{PetPersistenceError, PetRepository};
#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use random_source::RandomSource;
#[cfg(test)]
pub use random_source::MockRandomSource;
pub use stats_query::{AgeSummary, PetCount, StatsQuery, UserCount};
#[cfg(test)]
pub use stats_query::MockStatsQuery;
pub use student_registry::StudentRegistry;
#[cfg(test)]
pub use student_registry::MockStudentRegistry;
pub use student_repository::{StudentPersistenceError, StudentRepository};
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
