//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies arrive as loosely typed JSON so that a field of the wrong
//! primitive type produces the same `Invalid or missing <field>` envelope as
//! a missing one, instead of a generic deserialisation failure.

use serde_json::{Value, json};

use crate::domain::{
    Error, PetId, PetValidationError, StudentId, StudentValidationError, UserId,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidType,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field.as_str(),
        format!("Invalid or missing {}", field.as_str()),
        ErrorCode::MissingField,
    )
}

pub(crate) fn invalid_type_error(field: FieldName) -> Error {
    field_error(
        field.as_str(),
        format!("Invalid or missing {}", field.as_str()),
        ErrorCode::InvalidType,
    )
}

/// Wrap a domain validation message, keeping the field it names.
pub(crate) fn invalid_value_error(field: &str, message: impl Into<String>) -> Error {
    field_error(field, message, ErrorCode::InvalidValue)
}

impl From<StudentValidationError> for Error {
    fn from(err: StudentValidationError) -> Self {
        invalid_value_error(err.field(), err.to_string())
    }
}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        invalid_value_error(err.field(), err.to_string())
    }
}

impl From<PetValidationError> for Error {
    fn from(err: PetValidationError) -> Self {
        invalid_value_error(err.field(), err.to_string())
    }
}

/// Require an optional field to be present.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Read an optional JSON string; any other JSON type is rejected.
pub(crate) fn text(value: Option<Value>, field: FieldName) -> Result<Option<String>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(invalid_type_error(field)),
    }
}

/// Largest count any store accepts; ages live in `INTEGER` columns.
const MAX_COUNT: u32 = i32::MAX.unsigned_abs();

/// Read an optional JSON number holding a positive whole count no larger
/// than [`MAX_COUNT`].
pub(crate) fn count(value: Option<Value>, field: FieldName) -> Result<Option<u32>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n <= MAX_COUNT)
            .map(Some)
            .ok_or_else(|| invalid_type_error(field)),
        Some(_) => Err(invalid_type_error(field)),
    }
}

/// Parse a `FromStr` field carried as a JSON string, e.g. an enum.
pub(crate) fn parsed<T, E>(value: Option<Value>, field: FieldName) -> Result<Option<T>, Error>
where
    T: std::str::FromStr<Err = E>,
    Error: From<E>,
{
    text(value, field)?
        .map(|raw| raw.parse::<T>().map_err(Error::from))
        .transpose()
}

pub(crate) fn parse_student_id(raw: &str) -> Result<StudentId, Error> {
    Ok(StudentId::new(raw)?)
}

pub(crate) fn parse_user_id(raw: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::invalid_request(format!("{} must be a valid UUID", field.as_str())).with_details(
            json!({
                "field": field.as_str(),
                "value": raw,
                "code": "invalid_uuid",
            }),
        )
    })
}

pub(crate) fn parse_pet_id(raw: &str) -> Result<PetId, Error> {
    PetId::new(raw).map_err(|_| {
        Error::invalid_request("id must be a valid UUID").with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}
