//! Driven port for the random draws made when records are created.

use crate::domain::AuthCode;

/// Source of student id suffixes and account auth codes.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Draw a suffix in `STUDENT_SUFFIX_MIN..=STUDENT_SUFFIX_MAX`.
    fn student_suffix(&self) -> u32;

    /// Draw a fresh six-character auth code.
    fn auth_code(&self) -> AuthCode;
}
