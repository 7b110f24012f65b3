//! In-memory document store.
//!
//! Each collection is a `Vec` behind a Tokio `RwLock`, kept in insertion
//! order. Contents are lost when the process exits; the store backs local
//! runs without a database URL and the HTTP tests.

mod pets;
mod students;
mod users;

pub use pets::MemoryPetStore;
pub use students::MemoryStudentStore;
pub use users::MemoryUserStore;
