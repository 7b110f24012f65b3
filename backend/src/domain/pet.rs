//! Pet records owned by user accounts.
//!
//! The owner is a plain reference by [`UserId`]; deleting the owner leaves
//! the pet in place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Validation errors for pet identifiers and fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PetValidationError {
    #[error("Invalid or missing ID")]
    InvalidId,
    #[error("Invalid or missing ownerId")]
    InvalidOwner,
    #[error("Invalid or missing name")]
    InvalidName,
    #[error("species must be one of dog, cat, bird, fish, other")]
    InvalidSpecies,
    #[error("Invalid or missing age")]
    InvalidAge,
    #[error("gender must be male or female")]
    InvalidGender,
    #[error("status must be one of healthy, sick, recovering")]
    InvalidStatus,
}

impl PetValidationError {
    /// Field name reported in error details.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::InvalidOwner => "ownerId",
            Self::InvalidName => "name",
            Self::InvalidSpecies => "species",
            Self::InvalidAge => "age",
            Self::InvalidGender => "gender",
            Self::InvalidStatus => "status",
        }
    }
}

/// Store-assigned pet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PetId(Uuid);

impl PetId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, PetValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(PetValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| PetValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $error:expr, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = PetValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err($error),
                }
            }
        }
    };
}

text_enum!(
    /// Kind of animal.
    Species, PetValidationError::InvalidSpecies, {
        Dog => "dog",
        Cat => "cat",
        Bird => "bird",
        Fish => "fish",
        Other => "other",
    }
);

text_enum!(
    Gender, PetValidationError::InvalidGender, {
        Male => "male",
        Female => "female",
    }
);

text_enum!(
    /// Health status tracked for each pet.
    HealthStatus, PetValidationError::InvalidStatus, {
        Healthy => "healthy",
        Sick => "sick",
        Recovering => "recovering",
    }
);

impl Default for HealthStatus {
    fn default() -> Self {
        Self::Healthy
    }
}

fn validate_name(name: String) -> Result<String, PetValidationError> {
    if name.trim().is_empty() {
        return Err(PetValidationError::InvalidName);
    }
    Ok(name)
}

fn validate_age(age: u32) -> Result<u32, PetValidationError> {
    if age == 0 {
        return Err(PetValidationError::InvalidAge);
    }
    Ok(age)
}

/// Optional descriptive fields shared by drafts and patches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetDetails {
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub status: Option<HealthStatus>,
    pub notes: Option<String>,
}

impl PetDetails {
    fn validated(self) -> Result<Self, PetValidationError> {
        Ok(Self {
            age: self.age.map(validate_age).transpose()?,
            ..self
        })
    }
}

/// Persisted pet document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    pub owner_id: UserId,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub status: HealthStatus,
    pub notes: Option<String>,
}

impl Pet {
    pub fn from_draft(id: PetId, draft: PetDraft) -> Self {
        let PetDraft {
            owner_id,
            name,
            species,
            details,
        } = draft;
        Self {
            id,
            owner_id,
            name,
            species,
            breed: details.breed,
            age: details.age,
            gender: details.gender,
            status: details.status.unwrap_or_default(),
            notes: details.notes,
        }
    }

    /// Merge the supplied fields of `patch`.
    pub fn apply(&mut self, patch: &PetPatch) {
        if let Some(owner_id) = patch.owner_id {
            self.owner_id = owner_id;
        }
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(species) = patch.species {
            self.species = species;
        }
        let details = &patch.details;
        if let Some(breed) = &details.breed {
            self.breed = Some(breed.clone());
        }
        if let Some(age) = details.age {
            self.age = Some(age);
        }
        if let Some(gender) = details.gender {
            self.gender = Some(gender);
        }
        if let Some(status) = details.status {
            self.status = status;
        }
        if let Some(notes) = &details.notes {
            self.notes = Some(notes.clone());
        }
    }
}

/// Validated fields for a new pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraft {
    owner_id: UserId,
    name: String,
    species: Species,
    details: PetDetails,
}

impl PetDraft {
    pub fn try_new(
        owner_id: UserId,
        name: impl Into<String>,
        species: Species,
        details: PetDetails,
    ) -> Result<Self, PetValidationError> {
        Ok(Self {
            owner_id,
            name: validate_name(name.into())?,
            species,
            details: details.validated()?,
        })
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn details(&self) -> &PetDetails {
        &self.details
    }
}

/// Partial update for a pet; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetPatch {
    owner_id: Option<UserId>,
    name: Option<String>,
    species: Option<Species>,
    details: PetDetails,
}

impl PetPatch {
    pub fn try_new(
        owner_id: Option<UserId>,
        name: Option<String>,
        species: Option<Species>,
        details: PetDetails,
    ) -> Result<Self, PetValidationError> {
        Ok(Self {
            owner_id,
            name: name.map(validate_name).transpose()?,
            species,
            details: details.validated()?,
        })
    }

    pub fn owner_id(&self) -> Option<&UserId> {
        self.owner_id.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn species(&self) -> Option<Species> {
        self.species
    }

    pub fn details(&self) -> &PetDetails {
        &self.details
    }

    pub fn is_empty(&self) -> bool {
        self.owner_id.is_none()
            && self.name.is_none()
            && self.species.is_none()
            && self.details == PetDetails::default()
    }
}
