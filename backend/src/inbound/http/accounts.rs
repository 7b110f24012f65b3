//! Signup and login handlers.
//!
//! Both exchanges take two requests. The first carries the credentials and is
//! answered with a prompt; the second repeats them with the missing field.
//!
//! ```text
//! POST /api/signup {"username":"ada","password":"pw"}              -> 200 prompt
//! POST /api/signup {"username":"ada","password":"pw","age":36}     -> 201 {message,id,code}
//! POST /api/login  {"username":"ada","password":"pw"}              -> 200 prompt
//! POST /api/login  {"username":"ada","password":"pw","authKey":"…"} -> 200 {message,id}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{LoginOutcome, LoginRequest, SignupOutcome, SignupRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, count, require, text};

const USERNAME: FieldName = FieldName::new("username");
const PASSWORD: FieldName = FieldName::new("password");
const AGE: FieldName = FieldName::new("age");
const AUTH_KEY: FieldName = FieldName::new("authKey");

fn credentials(username: Option<Value>, password: Option<Value>) -> Result<(String, String), Error> {
    let username = require(text(username, USERNAME)?, USERNAME)?;
    let password = require(text(password, PASSWORD)?, PASSWORD)?;
    Ok((username, password))
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupBody {
    #[schema(value_type = String, example = "ada")]
    pub username: Option<Value>,
    #[schema(value_type = String)]
    pub password: Option<Value>,
    /// Omit on the first step.
    #[schema(value_type = Option<u32>, example = 36)]
    pub age: Option<Value>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[schema(value_type = String, example = "ada")]
    pub username: Option<Value>,
    #[schema(value_type = String)]
    pub password: Option<Value>,
    /// Omit on the first step.
    #[schema(value_type = Option<String>, example = "K3Y9Z2")]
    pub auth_key: Option<Value>,
}

/// Answer to a signup step; `id` and `code` appear once the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = "uuid")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Answer to a login step; `id` appears once the auth key is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = "uuid")]
    pub id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupBody,
    responses(
        (status = 200, description = "Credentials accepted; age required", body = SignupResponse),
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let SignupBody {
        username,
        password,
        age,
    } = payload.into_inner();
    let (username, password) = credentials(username, password)?;
    let request = SignupRequest {
        username,
        password,
        age: count(age, AGE)?,
    };

    let response = match state.accounts.signup(request).await? {
        SignupOutcome::AgeRequired { message } => HttpResponse::Ok().json(SignupResponse {
            message,
            id: None,
            code: None,
        }),
        SignupOutcome::Created { message, id, code } => {
            HttpResponse::Created().json(SignupResponse {
                message,
                id: Some(id.to_string()),
                code: Some(code.to_string()),
            })
        }
    };
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Prompt or success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown credentials or wrong auth key", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginBody {
        username,
        password,
        auth_key,
    } = payload.into_inner();
    let (username, password) = credentials(username, password)?;
    let request = LoginRequest {
        username,
        password,
        auth_key: text(auth_key, AUTH_KEY)?.filter(|key| !key.trim().is_empty()),
    };

    let response = match state.accounts.login(request).await? {
        LoginOutcome::AuthKeyRequired { message } => LoginResponse { message, id: None },
        LoginOutcome::Authenticated { message, id } => LoginResponse {
            message,
            id: Some(id.to_string()),
        },
    };
    Ok(web::Json(response))
}
