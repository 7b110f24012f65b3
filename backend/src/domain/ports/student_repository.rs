//! Port abstraction for the student collection.

use async_trait::async_trait;

use crate::domain::{Student, StudentId, StudentPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
        /// Another document already holds the identifier.
        Duplicate { id: String } => "student {id} already exists",
    }
}

/// Document-style access to stored students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students in insertion order.
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError>;

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError>;

    /// Cheap existence probe used by identifier generation.
    async fn exists(&self, id: &StudentId) -> Result<bool, StudentPersistenceError>;

    /// Insert a new document; fails with `Duplicate` when the id is taken.
    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError>;

    /// Merge `patch` into the matching document and return the result, or
    /// `None` when no document matches.
    async fn update(
        &self,
        id: &StudentId,
        patch: &StudentPatch,
    ) -> Result<Option<Student>, StudentPersistenceError>;

    /// Remove the matching document, reporting whether one was removed.
    async fn delete(&self, id: &StudentId) -> Result<bool, StudentPersistenceError>;
}
