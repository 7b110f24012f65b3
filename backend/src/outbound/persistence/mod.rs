//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between row structs and domain records; row
//! structs (`models`) and table definitions (`schema`) stay private to this
//! module. All database failures map onto the port error enums.
//!
//! ```no_run
//! use recordkeeper::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/records")).await?;
//! let students = DieselStudentRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_pet_repository;
mod diesel_student_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_pet_repository::DieselPetRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
