use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::ApiEnvelope,
    dto::flight::{
        CreateFlightRequest, FlightResponse, UpdateFlightRequest, UpdateFlightStatusRequest,
    },
    models::{Flight, FlightStatus},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/flights",
    request_body = CreateFlightRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Flight created with its groups, nominations assigned", body = ApiEnvelope<FlightResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Flight or group number already used")
    ),
    tag = "flights"
)]
pub async fn create_flight(
    State(db): State<Database>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let flight = services::create_flight(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(flight))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/flights/{id}",
    params(
        ("id" = Uuid, Path, description = "Flight id")
    ),
    request_body = UpdateFlightRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Flight updated; groups replaced wholesale", body = ApiEnvelope<FlightResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Flight not found"),
        (status = 409, description = "Group number already used")
    ),
    tag = "flights"
)]
pub async fn update_flight(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFlightRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let flight = services::update_flight(db.pool(), id, &req).await?;

    Ok(Json(ApiEnvelope::ok(flight)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/flights/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Flight id")
    ),
    request_body = UpdateFlightStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status updated", body = ApiEnvelope<Flight>),
        (status = 400, description = "Invalid status, or an unjustified completed claim"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Flight not found")
    ),
    tag = "flights"
)]
pub async fn update_flight_status(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFlightStatusRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let status = FlightStatus::parse(&req.status)
        .ok_or_else(|| WebError::BadRequest(format!("Unknown status: {}", req.status)))?;

    let flight = services::update_flight_status(db.pool(), id, status).await?;

    Ok(Json(ApiEnvelope::ok(flight)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/flights/{id}/recalculate-status",
    params(
        ("id" = Uuid, Path, description = "Flight id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Derived status recomputed and persisted", body = ApiEnvelope<Flight>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Flight not found")
    ),
    tag = "flights"
)]
pub async fn recalculate_flight_status(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let flight = services::recalculate_flight_status(db.pool(), id).await?;

    Ok(Json(ApiEnvelope::ok(flight)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/flights/competition/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Flights of the competition, groups and nominations populated", body = ApiEnvelope<Vec<FlightResponse>>)
    ),
    tag = "flights"
)]
pub async fn list_flights_by_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let flights = services::list_flights_by_competition(db.pool(), id).await?;

    Ok(Json(ApiEnvelope::ok(flights)).into_response())
}
