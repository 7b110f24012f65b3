//! Read-only statistics handlers.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CountResponse {
    #[schema(example = "There are 3 registered users")]
    pub message: String,
    pub count: u64,
}

/// Age figures over users that reported one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct AgeStatsResponse {
    pub message: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youngest: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/stats/users/count",
    responses(
        (status = 200, description = "Number of users", body = CountResponse),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["stats"],
    operation_id = "countUsers"
)]
#[get("/stats/users/count")]
pub async fn user_count(state: web::Data<HttpState>) -> ApiResult<web::Json<CountResponse>> {
    let count = state.stats.user_count().await?.count;
    Ok(web::Json(CountResponse {
        message: format!("There are {count} registered users"),
        count,
    }))
}

#[utoipa::path(
    get,
    path = "/api/stats/users/ages",
    responses(
        (status = 200, description = "Reported ages", body = AgeStatsResponse),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["stats"],
    operation_id = "userAges"
)]
#[get("/stats/users/ages")]
pub async fn user_ages(state: web::Data<HttpState>) -> ApiResult<web::Json<AgeStatsResponse>> {
    let summary = state.stats.user_ages().await?;
    Ok(web::Json(AgeStatsResponse {
        message: format!("{} users reported an age", summary.reported),
        count: summary.reported,
        youngest: summary.youngest,
        oldest: summary.oldest,
        average: summary.mean,
    }))
}

#[utoipa::path(
    get,
    path = "/api/stats/pets/count",
    responses(
        (status = 200, description = "Number of pets", body = CountResponse),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["stats"],
    operation_id = "countPets"
)]
#[get("/stats/pets/count")]
pub async fn pet_count(state: web::Data<HttpState>) -> ApiResult<web::Json<CountResponse>> {
    let count = state.stats.pet_count().await?.count;
    Ok(web::Json(CountResponse {
        message: format!("There are {count} pets on record"),
        count,
    }))
}
