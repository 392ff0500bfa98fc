use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Flight, FlightStatus, Group, Nomination};

/// One group to create under a flight, with the nominations to assign to it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct GroupSpec {
    #[validate(range(min = 1, message = "Group number must be >= 1"))]
    pub number: i32,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub start_time: Option<chrono::NaiveDateTime>,

    #[serde(default)]
    pub nomination_ids: Vec<Uuid>,
}

/// Request payload for creating a flight with its groups in one transaction
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFlightRequest {
    pub competition_id: Uuid,

    #[validate(range(min = 1, message = "Flight number must be >= 1"))]
    pub number: i32,

    pub start_time: Option<chrono::NaiveDateTime>,

    #[validate(nested)]
    pub groups: Vec<GroupSpec>,
}

/// Request payload for replacing a flight's start time and group layout.
/// The flight number is immutable; groups are replaced wholesale, never
/// merged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFlightRequest {
    pub start_time: Option<chrono::NaiveDateTime>,

    #[validate(nested)]
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFlightStatusRequest {
    #[validate(custom(function = "validate_flight_status"))]
    pub status: String,
}

fn validate_flight_status(status: &str) -> Result<(), ValidationError> {
    if FlightStatus::parse(status).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_status"))
    }
}

/// A group with its assigned nominations populated
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupDetail {
    pub group_id: Uuid,
    pub flight_id: Uuid,
    pub number: i32,
    pub name: String,
    pub start_time: Option<chrono::NaiveDateTime>,
    pub nominations: Vec<Nomination>,
}

impl GroupDetail {
    pub fn new(group: Group, nominations: Vec<Nomination>) -> Self {
        Self {
            group_id: group.group_id,
            flight_id: group.flight_id,
            number: group.number,
            name: group.name,
            start_time: group.start_time,
            nominations,
        }
    }
}

/// Response containing a flight with groups and their nominations populated
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FlightResponse {
    pub flight_id: Uuid,
    pub competition_id: Uuid,
    pub number: i32,
    pub status: String,
    pub start_time: Option<chrono::NaiveDateTime>,
    pub groups: Vec<GroupDetail>,
}

impl FlightResponse {
    pub fn new(flight: Flight, groups: Vec<GroupDetail>) -> Self {
        Self {
            flight_id: flight.flight_id,
            competition_id: flight.competition_id,
            number: flight.number,
            status: flight.status,
            start_time: flight.start_time,
            groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_number_must_be_positive() {
        let req = CreateFlightRequest {
            competition_id: Uuid::new_v4(),
            number: 0,
            start_time: None,
            groups: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_nested_group_spec_is_validated() {
        let req = CreateFlightRequest {
            competition_id: Uuid::new_v4(),
            number: 1,
            start_time: None,
            groups: vec![GroupSpec {
                number: 1,
                name: String::new(),
                start_time: None,
                nomination_ids: vec![],
            }],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_status_request_accepts_known_values() {
        for status in ["pending", "inProgress", "completed"] {
            let req = UpdateFlightStatusRequest {
                status: status.to_string(),
            };
            assert!(req.validate().is_ok(), "{status} should be accepted");
        }

        let req = UpdateFlightStatusRequest {
            status: "finished".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
