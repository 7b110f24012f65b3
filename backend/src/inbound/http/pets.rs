//! Pet API handlers.
//!
//! ```text
//! GET    /api/pets?userId={owner}
//! GET    /api/pets/{id}
//! POST   /api/pets      {"ownerId":"…","name":"Rex","species":"dog"}
//! POST   /api/pets/new  same body; `type` is accepted in place of `species`
//! PUT    /api/pets/{id}
//! PATCH  /api/pets/{id}
//! DELETE /api/pets/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, Gender, HealthStatus, Pet, PetDetails, PetDraft, PetId, PetPatch, Species, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, count, parse_pet_id, parse_user_id, parsed, require, text,
};

const OWNER: FieldName = FieldName::new("ownerId");
const USER_FILTER: FieldName = FieldName::new("userId");
const NAME: FieldName = FieldName::new("name");
const SPECIES: FieldName = FieldName::new("species");
const BREED: FieldName = FieldName::new("breed");
const AGE: FieldName = FieldName::new("age");
const GENDER: FieldName = FieldName::new("gender");
const STATUS: FieldName = FieldName::new("status");
const NOTES: FieldName = FieldName::new("notes");

/// Pet fields as sent by clients.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetBody {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub owner_id: Option<Value>,
    #[schema(value_type = Option<String>, example = "Rex")]
    pub name: Option<Value>,
    #[schema(value_type = Option<Species>)]
    pub species: Option<Value>,
    /// Older clients send the species under this name.
    #[serde(rename = "type")]
    #[schema(value_type = Option<Species>)]
    pub kind: Option<Value>,
    #[schema(value_type = Option<String>, example = "Beagle")]
    pub breed: Option<Value>,
    #[schema(value_type = Option<u32>, example = 3)]
    pub age: Option<Value>,
    #[schema(value_type = Option<Gender>)]
    pub gender: Option<Value>,
    #[schema(value_type = Option<HealthStatus>)]
    pub status: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub notes: Option<Value>,
}

struct PetFields {
    owner_id: Option<UserId>,
    name: Option<String>,
    species: Option<Species>,
    details: PetDetails,
}

impl PetBody {
    fn into_fields(self) -> Result<PetFields, Error> {
        let owner_id = text(self.owner_id, OWNER)?
            .map(|raw| parse_user_id(&raw, OWNER))
            .transpose()?;
        let species = match self.species {
            Some(value) if !value.is_null() => parsed::<Species, _>(Some(value), SPECIES)?,
            _ => parsed::<Species, _>(self.kind, SPECIES)?,
        };
        Ok(PetFields {
            owner_id,
            name: text(self.name, NAME)?,
            species,
            details: PetDetails {
                breed: text(self.breed, BREED)?,
                age: count(self.age, AGE)?,
                gender: parsed::<Gender, _>(self.gender, GENDER)?,
                status: parsed::<HealthStatus, _>(self.status, STATUS)?,
                notes: text(self.notes, NOTES)?,
            },
        })
    }

    fn into_draft(self) -> Result<PetDraft, Error> {
        let fields = self.into_fields()?;
        let owner_id = require(fields.owner_id, OWNER)?;
        let name = require(fields.name, NAME)?;
        let species = require(fields.species, SPECIES)?;
        Ok(PetDraft::try_new(owner_id, name, species, fields.details)?)
    }

    fn into_patch(self) -> Result<PetPatch, Error> {
        let fields = self.into_fields()?;
        Ok(PetPatch::try_new(
            fields.owner_id,
            fields.name,
            fields.species,
            fields.details,
        )?)
    }
}

/// Stored pet as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub owner_id: String,
    pub name: String,
    pub species: Species,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id.to_string(),
            owner_id: pet.owner_id.to_string(),
            name: pet.name,
            species: pet.species,
            breed: pet.breed,
            age: pet.age,
            gender: pet.gender,
            status: pet.status,
            notes: pet.notes,
        }
    }
}

/// Optional owner filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PetFilter {
    /// Only list pets owned by this user.
    #[param(format = "uuid")]
    pub user_id: Option<String>,
}

fn pet_id(path: web::Path<String>) -> Result<PetId, Error> {
    parse_pet_id(&path.into_inner())
}

#[utoipa::path(
    get,
    path = "/api/pets",
    params(PetFilter),
    responses(
        (status = 200, description = "Pets", body = [PetResponse]),
        (status = 400, description = "Malformed owner filter", body = Error)
    ),
    tags = ["pets"],
    operation_id = "listPets"
)]
#[get("/pets")]
pub async fn list_pets(
    state: web::Data<HttpState>,
    query: web::Query<PetFilter>,
) -> ApiResult<web::Json<Vec<PetResponse>>> {
    let owner = query
        .into_inner()
        .user_id
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_user_id(&raw, USER_FILTER))
        .transpose()?;
    let pets = state.pets.list(owner).await?;
    Ok(web::Json(pets.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/pets/{id}",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "Pet", body = PetResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["pets"],
    operation_id = "getPet"
)]
#[get("/pets/{id}")]
pub async fn get_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PetResponse>> {
    let pet = state.pets.get(&pet_id(path)?).await?;
    Ok(web::Json(pet.into()))
}

async fn register(state: &HttpState, body: PetBody) -> ApiResult<HttpResponse> {
    let draft = body.into_draft()?;
    let pet = state.pets.create(draft).await?;
    Ok(HttpResponse::Created().json(PetResponse::from(pet)))
}

/// Register a pet for an existing owner.
#[utoipa::path(
    post,
    path = "/api/pets",
    request_body = PetBody,
    responses(
        (status = 201, description = "Created", body = PetResponse),
        (status = 400, description = "Invalid request or unknown owner", body = Error)
    ),
    tags = ["pets"],
    operation_id = "createPet"
)]
#[post("/pets")]
pub async fn create_pet(
    state: web::Data<HttpState>,
    payload: web::Json<PetBody>,
) -> ApiResult<HttpResponse> {
    register(&state, payload.into_inner()).await
}

/// Form-submission alias of [`create_pet`].
#[utoipa::path(
    post,
    path = "/api/pets/new",
    request_body = PetBody,
    responses(
        (status = 201, description = "Created", body = PetResponse),
        (status = 400, description = "Invalid request or unknown owner", body = Error)
    ),
    tags = ["pets"],
    operation_id = "createPetFromForm"
)]
#[post("/pets/new")]
pub async fn create_pet_from_form(
    state: web::Data<HttpState>,
    payload: web::Json<PetBody>,
) -> ApiResult<HttpResponse> {
    register(&state, payload.into_inner()).await
}

/// Update a pet; `ownerId`, `name` and `species` are required.
#[utoipa::path(
    put,
    path = "/api/pets/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = PetBody,
    responses(
        (status = 200, description = "Updated", body = PetResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["pets"],
    operation_id = "replacePet"
)]
#[put("/pets/{id}")]
pub async fn replace_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PetBody>,
) -> ApiResult<web::Json<PetResponse>> {
    let id = pet_id(path)?;
    let draft = payload.into_inner().into_draft()?;
    let patch = PetPatch::try_new(
        Some(*draft.owner_id()),
        Some(draft.name().to_owned()),
        Some(draft.species()),
        draft.details().clone(),
    )?;
    let pet = state.pets.update(&id, patch).await?;
    Ok(web::Json(pet.into()))
}

#[utoipa::path(
    patch,
    path = "/api/pets/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = PetBody,
    responses(
        (status = 200, description = "Updated", body = PetResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["pets"],
    operation_id = "updatePet"
)]
#[patch("/pets/{id}")]
pub async fn update_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PetBody>,
) -> ApiResult<web::Json<PetResponse>> {
    let id = pet_id(path)?;
    let patch = payload.into_inner().into_patch()?;
    let pet = state.pets.update(&id, patch).await?;
    Ok(web::Json(pet.into()))
}

#[utoipa::path(
    delete,
    path = "/api/pets/{id}",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["pets"],
    operation_id = "deletePet"
)]
#[delete("/pets/{id}")]
pub async fn delete_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.pets.delete(&pet_id(path)?).await?;
    Ok(web::Json(MessageResponse::new("Pet deleted successfully")))
}

#[cfg(test)]
#[path = "pets_tests.rs"]
mod tests;
