//! User accounts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Length of the auth key issued to every new account.
pub const AUTH_CODE_LEN: usize = 6;

/// Symbols an auth key is drawn from.
pub const AUTH_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Validation errors for user identifiers and fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("Invalid or missing ID")]
    InvalidId,
    #[error("Invalid or missing username")]
    InvalidUsername,
    #[error("Invalid or missing password")]
    InvalidPassword,
    #[error("Invalid or missing age")]
    InvalidAge,
    #[error("role must be one of admin, user, moderator")]
    InvalidRole,
    #[error("auth key must be 6 uppercase letters or digits")]
    InvalidCode,
}

impl UserValidationError {
    /// Field name reported in error details.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::InvalidUsername => "username",
            Self::InvalidPassword => "password",
            Self::InvalidAge => "age",
            Self::InvalidRole => "role",
            Self::InvalidCode => "authKey",
        }
    }
}

/// Store-assigned user identifier.
///
/// # Examples
/// ```
/// use recordkeeper::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid UUID");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from caller input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Moderator,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            _ => Err(UserValidationError::InvalidRole),
        }
    }
}

/// Six-character auth key issued at account creation.
///
/// # Examples
/// ```
/// use recordkeeper::domain::AuthCode;
///
/// let code = AuthCode::new("AB12CD").expect("valid code");
/// assert!(code.matches(" AB12CD "));
/// assert!(!code.matches("ab12cd"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCode(String);

impl AuthCode {
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let well_formed = raw.len() == AUTH_CODE_LEN
            && raw
                .bytes()
                .all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit());
        if !well_formed {
            return Err(UserValidationError::InvalidCode);
        }
        Ok(Self(raw))
    }

    /// Build a code from one pick per position; picks wrap around the
    /// alphabet, so every input yields a well-formed code.
    ///
    /// ```
    /// use recordkeeper::domain::AuthCode;
    ///
    /// assert_eq!(AuthCode::from_picks([0, 1, 26, 35, 36, 7]).to_string(), "AB09AH");
    /// ```
    pub fn from_picks(picks: [usize; AUTH_CODE_LEN]) -> Self {
        let code = picks
            .iter()
            .map(|pick| char::from(AUTH_CODE_ALPHABET[pick % AUTH_CODE_ALPHABET.len()]))
            .collect();
        Self(code)
    }

    /// Compare against a key typed by the caller, ignoring surrounding
    /// whitespace.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate.trim()
    }
}

impl AsRef<str> for AuthCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AuthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account password, kept as supplied and wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UserValidationError::InvalidPassword);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Usernames are stored exactly as given; blank ones are rejected.
fn validate_username(username: &str) -> Result<String, UserValidationError> {
    if username.trim().is_empty() {
        return Err(UserValidationError::InvalidUsername);
    }
    Ok(username.to_owned())
}

fn validate_age(age: u32) -> Result<u32, UserValidationError> {
    if age == 0 {
        return Err(UserValidationError::InvalidAge);
    }
    Ok(age)
}

/// Persisted user document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: Password,
    pub age: Option<u32>,
    pub role: Option<Role>,
    pub code: Option<AuthCode>,
}

impl User {
    /// Assemble a new account from validated input and its issued code.
    pub fn from_draft(id: UserId, draft: UserDraft, code: AuthCode) -> Self {
        let UserDraft {
            username,
            password,
            age,
            role,
        } = draft;
        Self {
            id,
            username,
            password,
            age,
            role,
            code: Some(code),
        }
    }

    /// Merge the supplied fields of `patch`.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(username) = &patch.username {
            self.username.clone_from(username);
        }
        if let Some(password) = &patch.password {
            self.password = password.clone();
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
        if let Some(role) = patch.role {
            self.role = Some(role);
        }
    }

    /// True when both the username and the password match exactly.
    pub fn has_credentials(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose() == password
    }
}

/// Validated fields for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    username: String,
    password: Password,
    age: Option<u32>,
    role: Option<Role>,
}

impl UserDraft {
    pub fn try_new(
        username: &str,
        password: &str,
        age: Option<u32>,
        role: Option<Role>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: validate_username(username)?,
            password: Password::new(password)?,
            age: age.map(validate_age).transpose()?,
            role,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }
}

/// Partial update for an account; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    username: Option<String>,
    password: Option<Password>,
    age: Option<u32>,
    role: Option<Role>,
}

impl UserPatch {
    pub fn try_new(
        username: Option<&str>,
        password: Option<&str>,
        age: Option<u32>,
        role: Option<Role>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: username.map(validate_username).transpose()?,
            password: password.map(Password::new).transpose()?,
            age: age.map(validate_age).transpose()?,
            role,
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.age.is_none() && self.role.is_none()
    }
}
