//! User API handlers.
//!
//! ```text
//! GET    /api/users?search=ad
//! GET    /api/users/{id}
//! GET    /api/users/{id}/pets
//! POST   /api/users {"username":"ada","password":"pw","age":36,"role":"admin"}
//! PUT    /api/users/{id}
//! PATCH  /api/users/{id}
//! DELETE /api/users/{id}
//! ```
//!
//! Passwords are accepted on input but never serialised back.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Role, User, UserDraft, UserId, UserPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pets::PetResponse;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, count, parse_user_id, parsed, require, text,
};

const ID: FieldName = FieldName::new("id");
const USERNAME: FieldName = FieldName::new("username");
const PASSWORD: FieldName = FieldName::new("password");
const AGE: FieldName = FieldName::new("age");
const ROLE: FieldName = FieldName::new("role");

/// Account fields as sent by clients.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserBody {
    #[schema(value_type = Option<String>, example = "ada")]
    pub username: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub password: Option<Value>,
    #[schema(value_type = Option<u32>, example = 36)]
    pub age: Option<Value>,
    #[schema(value_type = Option<Role>)]
    pub role: Option<Value>,
}

impl UserBody {
    fn into_draft(self) -> Result<UserDraft, Error> {
        let username = require(text(self.username, USERNAME)?, USERNAME)?;
        let password = require(text(self.password, PASSWORD)?, PASSWORD)?;
        let age = count(self.age, AGE)?;
        let role = parsed::<Role, _>(self.role, ROLE)?;
        Ok(UserDraft::try_new(&username, &password, age, role)?)
    }

    fn into_patch(self) -> Result<UserPatch, Error> {
        let username = text(self.username, USERNAME)?;
        let password = text(self.password, PASSWORD)?;
        Ok(UserPatch::try_new(
            username.as_deref(),
            password.as_deref(),
            count(self.age, AGE)?,
            parsed::<Role, _>(self.role, ROLE)?,
        )?)
    }
}

/// Stored account as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "K3Y9Z2")]
    pub code: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            age: user.age,
            role: user.role,
            code: user.code.map(|code| code.to_string()),
        }
    }
}

/// Optional username filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UserSearch {
    /// Case-insensitive username fragment.
    pub search: Option<String>,
}

fn user_id(path: web::Path<String>) -> Result<UserId, Error> {
    parse_user_id(&path.into_inner(), ID)
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserSearch),
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UserSearch>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list(query.into_inner().search).await?;
    Ok(web::Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.get(&user_id(path)?).await?;
    Ok(web::Json(user.into()))
}

/// Pets owned by one user. Unknown owners simply have no pets.
#[utoipa::path(
    get,
    path = "/api/users/{id}/pets",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "Pets owned by the user", body = [PetResponse]),
        (status = 400, description = "Malformed id", body = Error)
    ),
    tags = ["users", "pets"],
    operation_id = "listUserPets"
)]
#[get("/users/{id}/pets")]
pub async fn list_user_pets(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PetResponse>>> {
    let pets = state.pets.list(Some(user_id(path)?)).await?;
    Ok(web::Json(pets.into_iter().map(Into::into).collect()))
}

/// Create an account. A fresh auth code is issued and returned.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserBody,
    responses(
        (status = 201, description = "Created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let user = state.users.create(draft).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Update an account; `username` and `password` are required.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = UserBody,
    responses(
        (status = 200, description = "Updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "replaceUser"
)]
#[put("/users/{id}")]
pub async fn replace_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = user_id(path)?;
    let draft = payload.into_inner().into_draft()?;
    let patch = UserPatch::try_new(
        Some(draft.username()),
        Some(draft.password().expose()),
        draft.age(),
        draft.role(),
    )?;
    let user = state.users.update(&id, patch).await?;
    Ok(web::Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = UserBody,
    responses(
        (status = 200, description = "Updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = user_id(path)?;
    let patch = payload.into_inner().into_patch()?;
    let user = state.users.update(&id, patch).await?;
    Ok(web::Json(user.into()))
}

/// Delete an account. Pets owned by it are left in place.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.users.delete(&user_id(path)?).await?;
    Ok(web::Json(MessageResponse::new("User deleted successfully")))
}
