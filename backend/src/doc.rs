//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every `/api` handler plus the health probes. The
//! generated document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Gender, HealthStatus, Role, Species};
use crate::inbound::http::accounts::{LoginBody, LoginResponse, SignupBody, SignupResponse};
use crate::inbound::http::pets::{PetBody, PetResponse};
use crate::inbound::http::practice::EchoResponse;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::stats::{AgeStatsResponse, CountResponse};
use crate::inbound::http::students::{StudentBody, StudentResponse};
use crate::inbound::http::users::{UserBody, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recordkeeper API",
        description = "CRUD access to student, user and pet records, two-step signup and login, and collection statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::replace_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_user_pets,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::replace_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::pets::list_pets,
        crate::inbound::http::pets::get_pet,
        crate::inbound::http::pets::create_pet,
        crate::inbound::http::pets::create_pet_from_form,
        crate::inbound::http::pets::replace_pet,
        crate::inbound::http::pets::update_pet,
        crate::inbound::http::pets::delete_pet,
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::stats::user_count,
        crate::inbound::http::stats::user_ages,
        crate::inbound::http::stats::pet_count,
        crate::inbound::http::practice::message,
        crate::inbound::http::practice::echo,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        MessageResponse,
        StudentBody,
        StudentResponse,
        UserBody,
        UserResponse,
        Role,
        PetBody,
        PetResponse,
        Species,
        Gender,
        HealthStatus,
        SignupBody,
        SignupResponse,
        LoginBody,
        LoginResponse,
        CountResponse,
        AgeStatsResponse,
        EchoResponse,
    )),
    tags(
        (name = "students", description = "Student records"),
        (name = "users", description = "User accounts"),
        (name = "pets", description = "Pets owned by users"),
        (name = "accounts", description = "Two-step signup and login"),
        (name = "stats", description = "Collection statistics"),
        (name = "practice", description = "Connectivity checks"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
