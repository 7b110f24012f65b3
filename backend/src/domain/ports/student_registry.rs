//! Driving port for student record management.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentDraft, StudentId, StudentPatch};

/// Use-case port the student handlers call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRegistry: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, Error>;

    /// Fetch one student; `NotFound` when absent.
    async fn get(&self, id: &StudentId) -> Result<Student, Error>;

    /// Store a new student under a freshly generated identifier.
    async fn create(&self, draft: StudentDraft) -> Result<Student, Error>;

    /// Merge `patch` into the stored student and return the result.
    async fn update(&self, id: &StudentId, patch: StudentPatch) -> Result<Student, Error>;

    async fn delete(&self, id: &StudentId) -> Result<(), Error>;
}
