//! Outbound adapters implementing the repository and randomness ports.
//!
//! - **memory**: process-local collections, used when no database is set
//! - **persistence**: PostgreSQL repositories on Diesel
//! - **random**: thread-local randomness for identifiers and auth codes

pub mod memory;
pub mod persistence;
pub mod random;
