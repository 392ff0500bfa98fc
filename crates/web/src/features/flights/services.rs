use sqlx::PgPool;
use storage::{
    dto::flight::{CreateFlightRequest, FlightResponse, UpdateFlightRequest},
    error::Result,
    models::{Flight, FlightStatus},
    repository::flight::FlightRepository,
    services::flight_status,
};
use uuid::Uuid;

/// Create a flight with its groups in one transaction, then return it with
/// groups and nominations populated.
pub async fn create_flight(pool: &PgPool, request: &CreateFlightRequest) -> Result<FlightResponse> {
    let repo = FlightRepository::new(pool);
    let flight = repo.create_with_groups(request).await?;
    repo.find_detailed(flight.flight_id).await
}

/// Replace a flight's start time and group layout wholesale.
pub async fn update_flight(
    pool: &PgPool,
    flight_id: Uuid,
    request: &UpdateFlightRequest,
) -> Result<FlightResponse> {
    let repo = FlightRepository::new(pool);
    repo.update_with_groups(flight_id, request).await?;
    repo.find_detailed(flight_id).await
}

/// Persist a requested status; a `completed` claim must match the derived
/// status.
pub async fn update_flight_status(
    pool: &PgPool,
    flight_id: Uuid,
    status: FlightStatus,
) -> Result<Flight> {
    flight_status::update_flight_status(pool, flight_id, status).await
}

/// Recompute the derived status and persist it unconditionally.
pub async fn recalculate_flight_status(pool: &PgPool, flight_id: Uuid) -> Result<Flight> {
    flight_status::recalculate_flight_status(pool, flight_id).await
}

/// All flights of a competition with groups and nominations populated.
pub async fn list_flights_by_competition(
    pool: &PgPool,
    competition_id: Uuid,
) -> Result<Vec<FlightResponse>> {
    let repo = FlightRepository::new(pool);
    repo.list_by_competition_detailed(competition_id).await
}
