use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::attempt::{AttemptCard, LiftType};

/// The scoring record for one athlete in one competition: weigh-in data,
/// the 3x3 attempt grid, and the derived bests/total. Unique per
/// (athlete_id, competition_id); created lazily on the first weigh-in or
/// attempt submission.
///
/// wilks, ipf_points and place are stored for external computation only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AthleteResult {
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
    pub attempts: Json<AttemptCard>,
    pub best_squat: Option<Decimal>,
    pub best_bench: Option<Decimal>,
    pub best_deadlift: Option<Decimal>,
    pub total: Option<Decimal>,
    pub wilks: Option<Decimal>,
    pub ipf_points: Option<Decimal>,
    pub place: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

impl AthleteResult {
    pub fn best_for(&self, lift: LiftType) -> Option<Decimal> {
        match lift {
            LiftType::Squat => self.best_squat,
            LiftType::Bench => self.best_bench,
            LiftType::Deadlift => self.best_deadlift,
        }
    }

    pub fn set_best_for(&mut self, lift: LiftType, weight: Decimal) {
        match lift {
            LiftType::Squat => self.best_squat = Some(weight),
            LiftType::Bench => self.best_bench = Some(weight),
            LiftType::Deadlift => self.best_deadlift = Some(weight),
        }
    }

    /// An athlete counts as started once a bodyweight is on record or any
    /// attempt slot carries a weight.
    pub fn has_started(&self) -> bool {
        self.bodyweight.is_some() || self.attempts.0.any_weight_declared()
    }

    /// All nine attempts judged good or no-good.
    pub fn is_fully_judged(&self) -> bool {
        self.attempts.0.all_judged()
    }
}
