use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Flight {
    pub flight_id: Uuid,
    pub competition_id: Uuid,
    pub number: i32,
    pub status: String,
    pub start_time: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

/// Derived flight state. Stored as text; parsed where the derivation logic
/// needs to compare values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FlightStatus {
    Pending,
    InProgress,
    Completed,
}

impl FlightStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Pending => "pending",
            FlightStatus::InProgress => "inProgress",
            FlightStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(FlightStatus::Pending),
            "inProgress" => Some(FlightStatus::InProgress),
            "completed" => Some(FlightStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            FlightStatus::Pending,
            FlightStatus::InProgress,
            FlightStatus::Completed,
        ] {
            assert_eq!(FlightStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert_eq!(FlightStatus::parse("done"), None);
        assert_eq!(FlightStatus::parse(""), None);
    }
}
