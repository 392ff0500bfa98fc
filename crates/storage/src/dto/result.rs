use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{AthleteResult, AttemptCard, AttemptStatus, LiftType};

/// Declared opening weights, seeded into attempt 1 of each lift at weigh-in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct StartWeights {
    pub squat: Decimal,
    pub bench: Decimal,
    pub deadlift: Decimal,
}

/// Request payload for recording a weigh-in. Re-submitting always re-stamps
/// the cross-references and overwrites any previously seeded openers.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WeighInRequest {
    pub athlete_id: Uuid,
    pub nomination_id: Uuid,
    pub competition_id: Uuid,

    #[validate(custom(function = "validate_positive_weight"))]
    pub bodyweight: Decimal,

    #[validate(range(min = 1, message = "Lot number must be >= 1"))]
    pub lot_number: i32,

    pub start_weights: Option<StartWeights>,

    pub flight_id: Uuid,
    pub group_id: Uuid,

    #[validate(length(min = 1, max = 64))]
    pub age_category: String,

    #[validate(length(min = 1, max = 64))]
    pub weight_category: String,
}

/// Request payload for recording one attempt of one lift.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AttemptRequest {
    pub athlete_id: Uuid,
    pub competition_id: Uuid,

    pub lift_type: LiftType,

    #[validate(range(min = 1, max = 3, message = "Attempt number must be between 1 and 3"))]
    pub attempt_number: u8,

    #[validate(custom(function = "validate_positive_weight"))]
    pub weight: Decimal,

    pub status: AttemptStatus,

    pub flight_id: Uuid,
    pub group_id: Uuid,
}

fn validate_positive_weight(weight: &Decimal) -> Result<(), ValidationError> {
    if *weight > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("non_positive_weight"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResultsByAthletesRequest {
    #[validate(length(min = 1, message = "At least one athlete id is required"))]
    pub athlete_ids: Vec<Uuid>,
}

/// Response containing one athlete's full scoring record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultResponse {
    pub result_id: Uuid,
    pub athlete_id: Uuid,
    pub competition_id: Uuid,
    pub nomination_id: Uuid,
    pub flight_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub age_category: String,
    pub weight_category: String,
    pub bodyweight: Option<Decimal>,
    pub lot_number: Option<i32>,
    pub weighed_in_at: Option<chrono::NaiveDateTime>,
    pub attempts: AttemptCard,
    pub best_squat: Option<Decimal>,
    pub best_bench: Option<Decimal>,
    pub best_deadlift: Option<Decimal>,
    pub total: Option<Decimal>,
    pub wilks: Option<Decimal>,
    pub ipf_points: Option<Decimal>,
    pub place: Option<i32>,
}

impl From<AthleteResult> for ResultResponse {
    fn from(result: AthleteResult) -> Self {
        Self {
            result_id: result.result_id,
            athlete_id: result.athlete_id,
            competition_id: result.competition_id,
            nomination_id: result.nomination_id,
            flight_id: result.flight_id,
            group_id: result.group_id,
            age_category: result.age_category,
            weight_category: result.weight_category,
            bodyweight: result.bodyweight,
            lot_number: result.lot_number,
            weighed_in_at: result.weighed_in_at,
            attempts: result.attempts.0,
            best_squat: result.best_squat,
            best_bench: result.best_bench,
            best_deadlift: result.best_deadlift,
            total: result.total,
            wilks: result.wilks,
            ipf_points: result.ipf_points,
            place: result.place,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt_request(attempt_number: u8, weight: Decimal) -> AttemptRequest {
        AttemptRequest {
            athlete_id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
            lift_type: LiftType::Squat,
            attempt_number,
            weight,
            status: AttemptStatus::Good,
            flight_id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_attempt_number_bounds() {
        assert!(attempt_request(0, Decimal::from(100)).validate().is_err());
        assert!(attempt_request(4, Decimal::from(100)).validate().is_err());
        for n in 1..=3 {
            assert!(attempt_request(n, Decimal::from(100)).validate().is_ok());
        }
    }

    #[test]
    fn test_weight_must_be_positive() {
        assert!(attempt_request(1, Decimal::ZERO).validate().is_err());
        assert!(attempt_request(1, Decimal::from(-50)).validate().is_err());
    }

    #[test]
    fn test_lift_type_deserializes_camel_case() {
        let req: AttemptRequest = serde_json::from_value(serde_json::json!({
            "athlete_id": Uuid::new_v4(),
            "competition_id": Uuid::new_v4(),
            "lift_type": "deadlift",
            "attempt_number": 2,
            "weight": "180.5",
            "status": "noGood",
            "flight_id": Uuid::new_v4(),
            "group_id": Uuid::new_v4(),
        }))
        .unwrap();
        assert_eq!(req.lift_type, LiftType::Deadlift);
        assert_eq!(req.status, AttemptStatus::NoGood);
    }
}
