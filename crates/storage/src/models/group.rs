use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A lifting-order cohort within a flight. Groups are owned by their flight
/// and are replaced wholesale when the flight is updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Group {
    pub group_id: Uuid,
    pub flight_id: Uuid,
    pub number: i32,
    pub name: String,
    pub start_time: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}
