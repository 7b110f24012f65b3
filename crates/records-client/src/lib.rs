//! Typed client for the recordkeeper API.
//!
//! - [`RecordsClient`]: one method per API route, built on `reqwest`.
//! - [`ListView`] and [`FormState`]: view state for list pages and forms.
//! - [`SignupFlow`] and [`LoginFlow`]: the two-step account exchanges.

pub mod client;
pub mod error;
pub mod flows;
pub mod models;
pub mod view;

pub use client::{AccountApi, RecordsClient};
pub use error::{ApiErrorBody, ClientError};
pub use flows::{LoginFlow, LoginStep, SignupFlow, SignupStep};
pub use models::{
    AgeStats, CountStats, LoginInput, LoginReply, MessageReply, Pet, PetDetails, PetInput,
    PetUpdate, SignupInput, SignupReply, Student, StudentInput, StudentUpdate, User, UserInput,
    UserUpdate,
};
pub use view::{FormState, FormStatus, ListView};
