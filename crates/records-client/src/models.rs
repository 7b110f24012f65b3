//! Wire shapes exchanged with the recordkeeper API.
//!
//! Inputs skip absent optional fields so a partial update only carries what
//! the caller set.

use serde::{Deserialize, Serialize};

/// Stored student.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    /// Numeric identifier: creation year followed by a five-digit suffix.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Free-form grade label.
    pub grade: String,
}

/// Fields for creating or replacing a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentInput {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Grade label.
    pub grade: String,
}

/// Partial student update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentUpdate {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New age.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// New grade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Stored user account. Passwords never leave the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// UUID assigned by the server.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Reported age.
    #[serde(default)]
    pub age: Option<u32>,
    /// `admin`, `user` or `moderator`.
    #[serde(default)]
    pub role: Option<String>,
    /// Six-character auth key issued at creation.
    #[serde(default)]
    pub code: Option<String>,
}

/// Fields for creating or replacing a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInput {
    /// Login name.
    pub username: String,
    /// Password, stored as supplied.
    pub password: String,
    /// Optional age.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Optional role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Partial user update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    /// New login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New age.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// New role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Stored pet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// UUID assigned by the server.
    pub id: String,
    /// Owning user's id.
    pub owner_id: String,
    /// Pet name.
    pub name: String,
    /// `dog`, `cat`, `bird`, `fish` or `other`.
    pub species: String,
    /// Breed, if recorded.
    #[serde(default)]
    pub breed: Option<String>,
    /// Age in years, if recorded.
    #[serde(default)]
    pub age: Option<u32>,
    /// `male` or `female`, if recorded.
    #[serde(default)]
    pub gender: Option<String>,
    /// `healthy`, `sick` or `recovering`.
    #[serde(default)]
    pub status: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Fields for creating or replacing a pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetInput {
    /// Owning user's id.
    pub owner_id: String,
    /// Pet name.
    pub name: String,
    /// Species name.
    pub species: String,
    /// Optional descriptive fields.
    #[serde(flatten)]
    pub details: PetDetails,
}

/// Partial pet update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdate {
    /// New owner id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New species.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Descriptive fields to change.
    #[serde(flatten)]
    pub details: PetDetails,
}

/// Optional pet fields shared by inputs and updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PetDetails {
    /// Breed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Health status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Signup step input; leave `age` empty for the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupInput {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Age, sent on the second step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Signup answer: a prompt, or the created account and its auth key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignupReply {
    /// Prompt or confirmation text.
    pub message: String,
    /// New account id once created.
    #[serde(default)]
    pub id: Option<String>,
    /// Issued auth key once created.
    #[serde(default)]
    pub code: Option<String>,
}

/// Login step input; leave `auth_key` empty for the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Auth key, sent on the second step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_key: Option<String>,
}

/// Login answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginReply {
    /// Prompt or greeting.
    pub message: String,
    /// Account id once authenticated.
    #[serde(default)]
    pub id: Option<String>,
}

/// Plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageReply {
    /// Confirmation text.
    pub message: String,
}

/// Counter with its sentence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountStats {
    /// Sentence describing the count.
    pub message: String,
    /// The count.
    pub count: u64,
}

/// Age figures over users that reported one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AgeStats {
    /// Sentence describing the figures.
    pub message: String,
    /// Users that reported an age.
    pub count: u64,
    /// Lowest reported age.
    #[serde(default)]
    pub youngest: Option<u32>,
    /// Highest reported age.
    #[serde(default)]
    pub oldest: Option<u32>,
    /// Mean reported age.
    #[serde(default)]
    pub average: Option<f64>,
}
