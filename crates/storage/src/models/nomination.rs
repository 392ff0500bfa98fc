use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// An athlete's entry into a competition. Created by the nomination
/// workflow; the scoring core only reads it and moves the group
/// back-reference around.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Nomination {
    pub nomination_id: Uuid,
    pub athlete_id: Uuid,
    pub competition_id: Uuid,
    pub weight_category: String,
    pub age_category: String,
    pub status: String,
    pub nominated_by: Option<Uuid>,
    pub nominated_at: chrono::NaiveDateTime,
    pub group_id: Option<Uuid>,
}
