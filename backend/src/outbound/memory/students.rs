//! In-memory [`StudentRepository`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{Student, StudentId, StudentPatch};

/// Student collection held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    students: RwLock<Vec<Student>>,
}

#[async_trait]
impl StudentRepository for MemoryStudentStore {
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError> {
        Ok(self.students.read().await.clone())
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError> {
        let students = self.students.read().await;
        Ok(students.iter().find(|student| student.id == *id).cloned())
    }

    async fn exists(&self, id: &StudentId) -> Result<bool, StudentPersistenceError> {
        let students = self.students.read().await;
        Ok(students.iter().any(|student| student.id == *id))
    }

    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError> {
        let mut students = self.students.write().await;
        if students.iter().any(|existing| existing.id == student.id) {
            return Err(StudentPersistenceError::duplicate(student.id.to_string()));
        }
        students.push(student.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &StudentId,
        patch: &StudentPatch,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let mut students = self.students.write().await;
        let Some(student) = students.iter_mut().find(|student| student.id == *id) else {
            return Ok(None);
        };
        student.apply(patch);
        Ok(Some(student.clone()))
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentPersistenceError> {
        let mut students = self.students.write().await;
        let before = students.len();
        students.retain(|student| student.id != *id);
        Ok(students.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentDraft;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ada() -> Student {
        let draft = StudentDraft::try_new("Ada", 12, "7").expect("draft");
        Student::from_draft(StudentId::compose(2026, 12_345), draft)
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_ids(ada: Student) {
        let store = MemoryStudentStore::default();
        store.insert(&ada).await.expect("first insert");

        let err = store.insert(&ada).await.expect_err("duplicate");

        assert_eq!(err, StudentPersistenceError::duplicate("202612345"));
        assert_eq!(store.list().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_merges_and_returns_the_record(ada: Student) {
        let store = MemoryStudentStore::default();
        store.insert(&ada).await.expect("insert");
        let patch = StudentPatch::try_new(Some("Ada L.".to_owned()), None, None).expect("patch");

        let updated = store
            .update(&ada.id, &patch)
            .await
            .expect("update")
            .expect("present");

        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.grade, "7");
        assert_eq!(store.find_by_id(&ada.id).await.expect("find"), Some(updated));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed(ada: Student) {
        let store = MemoryStudentStore::default();
        store.insert(&ada).await.expect("insert");

        assert!(store.delete(&ada.id).await.expect("delete"));
        assert!(!store.delete(&ada.id).await.expect("second delete"));
        assert!(!store.exists(&ada.id).await.expect("exists"));
    }
}
