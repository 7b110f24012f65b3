//! PostgreSQL-backed `StudentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{Student, StudentId, StudentPatch};

use super::error_mapping::{from_column, is_unique_violation, map_diesel_error, map_pool_error, to_column};
use super::models::{StudentRow, StudentValues};
use super::pool::DbPool;
use super::schema::students;

fn pool_error(error: super::pool::PoolError) -> StudentPersistenceError {
    map_pool_error(error, StudentPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> StudentPersistenceError {
    map_diesel_error(
        error,
        StudentPersistenceError::query,
        StudentPersistenceError::connection,
    )
}

fn row_to_student(row: StudentRow) -> Result<Student, StudentPersistenceError> {
    let id = StudentId::new(&row.id)
        .map_err(|_| StudentPersistenceError::query(format!("stored student id {} is malformed", row.id)))?;
    let age = from_column(row.age)
        .ok_or_else(|| StudentPersistenceError::query(format!("student {id} has an invalid age")))?;
    Ok(Student {
        id,
        name: row.name,
        age,
        grade: row.grade,
    })
}

fn values(student: &Student) -> Result<StudentValues<'_>, StudentPersistenceError> {
    let age = to_column(student.age)
        .ok_or_else(|| StudentPersistenceError::query("student age does not fit the age column"))?;
    Ok(StudentValues {
        id: student.id.as_ref(),
        name: &student.name,
        age,
        grade: &student.grade,
    })
}

/// Diesel-backed implementation of the [`StudentRepository`] port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .order((students::created_at.asc(), students::id.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_student).collect()
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<StudentRow> = students::table
            .filter(students::id.eq(id.as_ref()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_student).transpose()
    }

    async fn exists(&self, id: &StudentId) -> Result<bool, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::select(diesel::dsl::exists(
            students::table.filter(students::id.eq(id.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(diesel_error)
    }

    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError> {
        let row = values(student)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(students::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    StudentPersistenceError::duplicate(student.id.to_string())
                } else {
                    diesel_error(error)
                }
            })?;
        Ok(())
    }

    async fn update(
        &self,
        id: &StudentId,
        patch: &StudentPatch,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let Some(mut student) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        student.apply(patch);

        let row = values(&student)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(students::table.filter(students::id.eq(id.as_ref())))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok((updated > 0).then_some(student))
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(students::table.filter(students::id.eq(id.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: &str, age: i32) -> StudentRow {
        StudentRow {
            id: id.to_owned(),
            name: "Ada".to_owned(),
            age,
            grade: "7".to_owned(),
        }
    }

    #[rstest]
    fn rows_convert_to_students() {
        let student = row_to_student(row("202612345", 12)).expect("valid row");
        assert_eq!(student.id.as_ref(), "202612345");
        assert_eq!(student.age, 12);
    }

    #[rstest]
    #[case(row("2026x", 12))]
    #[case(row("202612345", 0))]
    fn corrupt_rows_are_query_errors(#[case] row: StudentRow) {
        let err = row_to_student(row).expect_err("corrupt row");
        assert!(matches!(err, StudentPersistenceError::Query { .. }));
    }

    #[rstest]
    fn unique_violations_become_duplicates_only_on_insert() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert!(matches!(
            diesel_error(error),
            StudentPersistenceError::Query { .. }
        ));
    }
}
