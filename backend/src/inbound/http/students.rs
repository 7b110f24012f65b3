//! Student API handlers.
//!
//! ```text
//! GET    /api/students
//! GET    /api/students/{id}
//! POST   /api/students {"name":"Ada","age":12,"grade":"7"}
//! PUT    /api/students/{id}
//! PATCH  /api/students/{id}
//! DELETE /api/students/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, Student, StudentDraft, StudentPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, count, parse_student_id, require, text};

const NAME: FieldName = FieldName::new("name");
const AGE: FieldName = FieldName::new("age");
const GRADE: FieldName = FieldName::new("grade");

/// Student fields as sent by clients.
///
/// Every field is optional here so that type mismatches and omissions are
/// reported with the same field-specific message.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct StudentBody {
    #[schema(value_type = Option<String>, example = "Ada")]
    pub name: Option<Value>,
    #[schema(value_type = Option<u32>, example = 12)]
    pub age: Option<Value>,
    #[schema(value_type = Option<String>, example = "7")]
    pub grade: Option<Value>,
}

impl StudentBody {
    fn into_draft(self) -> Result<StudentDraft, Error> {
        let name = require(text(self.name, NAME)?, NAME)?;
        let age = require(count(self.age, AGE)?, AGE)?;
        let grade = require(text(self.grade, GRADE)?, GRADE)?;
        Ok(StudentDraft::try_new(name, age, grade)?)
    }

    fn into_patch(self) -> Result<StudentPatch, Error> {
        Ok(StudentPatch::try_new(
            text(self.name, NAME)?,
            count(self.age, AGE)?,
            text(self.grade, GRADE)?,
        )?)
    }
}

/// Stored student as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct StudentResponse {
    #[schema(example = "202612345")]
    pub id: String,
    pub name: String,
    pub age: u32,
    pub grade: String,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name,
            age: student.age,
            grade: student.grade,
        }
    }
}

/// List every student in insertion order.
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students", body = [StudentResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let students = state.students.list().await?;
    Ok(web::Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Numeric student id")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 400, description = "Non-numeric id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentResponse>> {
    let id = parse_student_id(&path.into_inner())?;
    let student = state.students.get(&id).await?;
    Ok(web::Json(student.into()))
}

/// Create a student under a generated `year ++ suffix` identifier.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentBody,
    responses(
        (status = 201, description = "Created", body = StudentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "No free identifier", body = Error)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<StudentBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let student = state.students.create(draft).await?;
    Ok(HttpResponse::Created().json(StudentResponse::from(student)))
}

/// Replace all fields of a student.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Numeric student id")),
    request_body = StudentBody,
    responses(
        (status = 200, description = "Updated", body = StudentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["students"],
    operation_id = "replaceStudent"
)]
#[put("/students/{id}")]
pub async fn replace_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StudentBody>,
) -> ApiResult<web::Json<StudentResponse>> {
    let id = parse_student_id(&path.into_inner())?;
    let patch = StudentPatch::from(payload.into_inner().into_draft()?);
    let student = state.students.update(&id, patch).await?;
    Ok(web::Json(student.into()))
}

/// Merge the supplied fields into a student.
#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Numeric student id")),
    request_body = StudentBody,
    responses(
        (status = 200, description = "Updated", body = StudentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[patch("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StudentBody>,
) -> ApiResult<web::Json<StudentResponse>> {
    let id = parse_student_id(&path.into_inner())?;
    let patch = payload.into_inner().into_patch()?;
    let student = state.students.update(&id, patch).await?;
    Ok(web::Json(student.into()))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Numeric student id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Non-numeric id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_student_id(&path.into_inner())?;
    state.students.delete(&id).await?;
    Ok(web::Json(MessageResponse::new("Student deleted successfully")))
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
