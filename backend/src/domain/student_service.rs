//! Student record service.
//!
//! Implements [`StudentRegistry`] over a [`StudentRepository`]. Creation draws
//! `year ++ suffix` identifiers until one is free, giving up after the
//! configured number of attempts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use tracing::{debug, error, warn};

use crate::domain::ports::{
    RandomSource, StudentPersistenceError, StudentRegistry, StudentRepository,
};
use crate::domain::{Error, Student, StudentDraft, StudentId, StudentPatch};

/// Attempts made to find a free identifier before creation fails.
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 1000;

fn map_repository_error(error: StudentPersistenceError) -> Error {
    match error {
        StudentPersistenceError::Connection { message } => {
            warn!(%message, "student repository unavailable");
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentPersistenceError::Query { message } => {
            error!(%message, "student repository query failed");
            Error::internal(format!("student repository error: {message}"))
        }
        StudentPersistenceError::Duplicate { id } => {
            Error::internal(format!("unexpected student id conflict: {id}"))
        }
    }
}

fn not_found(id: &StudentId) -> Error {
    Error::not_found(format!("Student {id} not found"))
}

/// Student service implementing the [`StudentRegistry`] driving port.
#[derive(Clone)]
pub struct StudentService<R> {
    students: Arc<R>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    max_id_attempts: u32,
}

impl<R> StudentService<R> {
    pub fn new(students: Arc<R>, random: Arc<dyn RandomSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            students,
            random,
            clock,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }

    /// Override the identifier attempt cap. Zero is treated as one.
    #[must_use]
    pub fn with_max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }
}

impl<R> StudentService<R>
where
    R: StudentRepository,
{
    fn draw_candidate(&self) -> StudentId {
        StudentId::compose(self.clock.local().year(), self.random.student_suffix())
    }

    /// Draw, probe and insert until an identifier sticks.
    ///
    /// A `Duplicate` from the insert means another writer claimed the id
    /// between the probe and the write; that counts as one more attempt.
    async fn insert_with_fresh_id(&self, draft: StudentDraft) -> Result<Student, Error> {
        for attempt in 1..=self.max_id_attempts {
            let candidate = self.draw_candidate();
            if self
                .students
                .exists(&candidate)
                .await
                .map_err(map_repository_error)?
            {
                debug!(id = %candidate, attempt, "student id taken; redrawing");
                continue;
            }

            let student = Student::from_draft(candidate, draft.clone());
            match self.students.insert(&student).await {
                Ok(()) => return Ok(student),
                Err(StudentPersistenceError::Duplicate { id }) => {
                    debug!(%id, attempt, "student id claimed concurrently; redrawing");
                }
                Err(other) => return Err(map_repository_error(other)),
            }
        }

        warn!(
            attempts = self.max_id_attempts,
            "no free student id found"
        );
        Err(Error::service_unavailable(
            "could not allocate a student id; try again later",
        ))
    }
}

#[async_trait]
impl<R> StudentRegistry for StudentService<R>
where
    R: StudentRepository,
{
    async fn list(&self) -> Result<Vec<Student>, Error> {
        self.students.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: &StudentId) -> Result<Student, Error> {
        self.students
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, draft: StudentDraft) -> Result<Student, Error> {
        self.insert_with_fresh_id(draft).await
    }

    async fn update(&self, id: &StudentId, patch: StudentPatch) -> Result<Student, Error> {
        if patch.is_empty() {
            return self.get(id).await;
        }
        self.students
            .update(id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: &StudentId) -> Result<(), Error> {
        let removed = self
            .students
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if removed { Ok(()) } else { Err(not_found(id)) }
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
