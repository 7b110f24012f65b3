//! Student records.
//!
//! A student is identified by a generated numeric identifier: the four-digit
//! year of creation followed by a five-digit random suffix.

use std::fmt;

/// Smallest random suffix appended to the year.
pub const STUDENT_SUFFIX_MIN: u32 = 10_000;
/// Largest random suffix appended to the year.
pub const STUDENT_SUFFIX_MAX: u32 = 99_999;

const STUDENT_ID_MAX_LEN: usize = 18;

/// Validation failures for student identifiers and fields.
///
/// The `Display` output doubles as the client-facing message, so each one
/// names the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    #[error("Invalid or missing ID")]
    InvalidId,
    #[error("Invalid or missing name")]
    InvalidName,
    #[error("Invalid or missing age")]
    InvalidAge,
    #[error("Invalid or missing grade")]
    InvalidGrade,
}

impl StudentValidationError {
    /// Field name reported in error details.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::InvalidName => "name",
            Self::InvalidAge => "age",
            Self::InvalidGrade => "grade",
        }
    }
}

/// Numeric student identifier kept in its textual form.
///
/// ## Invariants
/// - Non-empty, ASCII digits only, at most 18 characters.
///
/// # Examples
/// ```
/// use recordkeeper::domain::StudentId;
///
/// let id = StudentId::compose(2026, 12_345);
/// assert_eq!(id.as_ref(), "202612345");
/// assert!(StudentId::new("12ab").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(String);

impl StudentId {
    /// Validate and construct an identifier from caller input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let raw = raw.as_ref();
        if raw.is_empty()
            || raw.len() > STUDENT_ID_MAX_LEN
            || !raw.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Err(StudentValidationError::InvalidId);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Build the identifier for `year` with the given random `suffix`.
    pub fn compose(year: i32, suffix: u32) -> Self {
        Self(format!("{year}{suffix}"))
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_name(name: String) -> Result<String, StudentValidationError> {
    if name.trim().is_empty() {
        return Err(StudentValidationError::InvalidName);
    }
    Ok(name)
}

fn validate_age(age: u32) -> Result<u32, StudentValidationError> {
    if age == 0 {
        return Err(StudentValidationError::InvalidAge);
    }
    Ok(age)
}

fn validate_grade(grade: String) -> Result<String, StudentValidationError> {
    if grade.trim().is_empty() {
        return Err(StudentValidationError::InvalidGrade);
    }
    Ok(grade)
}

/// Persisted student document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: u32,
    pub grade: String,
}

impl Student {
    /// Attach a generated identifier to validated fields.
    pub fn from_draft(id: StudentId, draft: StudentDraft) -> Self {
        let StudentDraft { name, age, grade } = draft;
        Self {
            id,
            name,
            age,
            grade,
        }
    }

    /// Merge the supplied fields of `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &StudentPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(grade) = &patch.grade {
            self.grade.clone_from(grade);
        }
    }
}

/// Validated fields for a new student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    name: String,
    age: u32,
    grade: String,
}

impl StudentDraft {
    /// Validate all fields, reporting the first offending one.
    pub fn try_new(
        name: impl Into<String>,
        age: u32,
        grade: impl Into<String>,
    ) -> Result<Self, StudentValidationError> {
        Ok(Self {
            name: validate_name(name.into())?,
            age: validate_age(age)?,
            grade: validate_grade(grade.into())?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }
}

/// Partial update for a student; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    name: Option<String>,
    age: Option<u32>,
    grade: Option<String>,
}

impl StudentPatch {
    /// Validate every supplied field.
    pub fn try_new(
        name: Option<String>,
        age: Option<u32>,
        grade: Option<String>,
    ) -> Result<Self, StudentValidationError> {
        Ok(Self {
            name: name.map(validate_name).transpose()?,
            age: age.map(validate_age).transpose()?,
            grade: grade.map(validate_grade).transpose()?,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn grade(&self) -> Option<&str> {
        self.grade.as_deref()
    }

    /// True when the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.grade.is_none()
    }
}

impl From<StudentDraft> for StudentPatch {
    fn from(draft: StudentDraft) -> Self {
        Self {
            name: Some(draft.name),
            age: Some(draft.age),
            grade: Some(draft.grade),
        }
    }
}
