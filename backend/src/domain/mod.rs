//! Domain primitives, ports and services.
//!
//! Purpose: define the record types shared by the HTTP and persistence
//! layers, the ports they meet at, and the services implementing the
//! driving ports. Nothing here depends on actix-web or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Student, User, Pet: stored documents with their drafts and patches.
//! - *Service: driving-port implementations over repository ports.

pub mod account_service;
pub mod error;
pub mod pet;
pub mod pet_service;
pub mod ports;
pub mod stats_service;
pub mod student;
pub mod student_service;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::account_service::AccountService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::pet::{
    Gender, HealthStatus, Pet, PetDetails, PetDraft, PetId, PetPatch, PetValidationError, Species,
};
pub use self::pet_service::PetService;
pub use self::stats_service::StatsService;
pub use self::student::{
    STUDENT_SUFFIX_MAX, STUDENT_SUFFIX_MIN, Student, StudentDraft, StudentId, StudentPatch,
    StudentValidationError,
};
pub use self::student_service::{DEFAULT_MAX_ID_ATTEMPTS, StudentService};
pub use self::trace_id::TraceId;
pub use self::user::{
    AUTH_CODE_ALPHABET, AUTH_CODE_LEN, AuthCode, Password, Role, User, UserDraft, UserId, UserPatch,
    UserValidationError,
};
pub use self::user_service::UserService;

