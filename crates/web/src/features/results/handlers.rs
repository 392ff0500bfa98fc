use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::ApiEnvelope,
    dto::result::{AttemptRequest, ResultResponse, ResultsByAthletesRequest, WeighInRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/results/weigh-in",
    request_body = WeighInRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Weigh-in recorded; result created lazily on first submission", body = ApiEnvelope<ResultResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "results"
)]
pub async fn save_weigh_in(
    State(db): State<Database>,
    Json(req): Json<WeighInRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let result = services::save_weigh_in(db.pool(), &req).await?;

    Ok(Json(ApiEnvelope::ok(result)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/results/attempt",
    request_body = AttemptRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Attempt recorded; best and total updated on a good lift", body = ApiEnvelope<ResultResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No nomination for this athlete in this competition")
    ),
    tag = "results"
)]
pub async fn save_attempt(
    State(db): State<Database>,
    Json(req): Json<AttemptRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let result = services::save_attempt(db.pool(), &req).await?;

    Ok(Json(ApiEnvelope::ok(result)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/results/competition/{id}/flight/{flight_number}/group/{group_number}",
    params(
        ("id" = Uuid, Path, description = "Competition id"),
        ("flight_number" = i32, Path, description = "Flight number within the competition"),
        ("group_number" = i32, Path, description = "Group number within the flight")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Results for one group of one flight", body = ApiEnvelope<Vec<ResultResponse>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "results"
)]
pub async fn list_by_flight_and_group(
    State(db): State<Database>,
    Path((id, flight_number, group_number)): Path<(Uuid, i32, i32)>,
) -> Result<Response, WebError> {
    let results =
        services::list_by_flight_and_group(db.pool(), id, flight_number, group_number).await?;

    Ok(Json(ApiEnvelope::ok(results)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/results/competition/{id}/athletes",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = ResultsByAthletesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Results for the named athletes", body = ApiEnvelope<Vec<ResultResponse>>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "results"
)]
pub async fn list_by_athletes(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResultsByAthletesRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let results = services::list_by_athletes(db.pool(), id, &req.athlete_ids).await?;

    Ok(Json(ApiEnvelope::ok(results)).into_response())
}
