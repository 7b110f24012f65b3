//! Scratch endpoints used to check that a client can reach the API.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::inbound::http::schemas::MessageResponse;

/// Echo of an arbitrary JSON body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct EchoResponse {
    #[schema(value_type = Object)]
    pub received: Value,
}

#[utoipa::path(
    get,
    path = "/api/message",
    responses((status = 200, description = "Greeting", body = MessageResponse)),
    tags = ["practice"],
    operation_id = "getMessage"
)]
#[get("/message")]
pub async fn message() -> web::Json<MessageResponse> {
    web::Json(MessageResponse::new("Hello from the backend!"))
}

#[utoipa::path(
    post,
    path = "/api/data",
    request_body(content = Object, description = "Any JSON value"),
    responses((status = 200, description = "The body, echoed", body = EchoResponse)),
    tags = ["practice"],
    operation_id = "echoData"
)]
#[post("/data")]
pub async fn echo(payload: web::Json<Value>) -> web::Json<EchoResponse> {
    let received = payload.into_inner();
    debug!(%received, "echoing practice payload");
    web::Json(EchoResponse { received })
}
