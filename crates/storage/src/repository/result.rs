use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AthleteResult, AttemptCard};

const RESULT_COLUMNS: &str = "result_id, athlete_id, competition_id, nomination_id, flight_id, \
     group_id, age_category, weight_category, bodyweight, lot_number, weighed_in_at, attempts, \
     best_squat, best_bench, best_deadlift, total, wilks, ipf_points, place, created_at, updated_at";

/// Repository for the Result ledger. One row per (athlete, competition),
/// enforced by a unique index; writes are plain read-modify-write with
/// last-write-wins semantics.
pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_athlete_and_competition(
        &self,
        athlete_id: Uuid,
        competition_id: Uuid,
    ) -> Result<Option<AthleteResult>> {
        let result = sqlx::query_as::<_, AthleteResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results \
             WHERE athlete_id = $1 AND competition_id = $2"
        ))
        .bind(athlete_id)
        .bind(competition_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Insert a fresh skeleton: empty weigh-in, nine null attempt slots, no
    /// bests. A duplicate (athlete, competition) surfaces as a raw unique
    /// violation so the caller can resolve the create race by re-reading.
    pub async fn insert_skeleton(
        &self,
        athlete_id: Uuid,
        competition_id: Uuid,
        nomination_id: Uuid,
        age_category: &str,
        weight_category: &str,
    ) -> Result<AthleteResult> {
        let result = sqlx::query_as::<_, AthleteResult>(&format!(
            "INSERT INTO results \
                 (athlete_id, competition_id, nomination_id, age_category, weight_category, attempts) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {RESULT_COLUMNS}"
        ))
        .bind(athlete_id)
        .bind(competition_id)
        .bind(nomination_id)
        .bind(age_category)
        .bind(weight_category)
        .bind(Json(AttemptCard::empty()))
        .fetch_one(self.pool)
        .await?;

        Ok(result)
    }

    /// Persist every mutable field of the record in one UPDATE. Last write
    /// wins; there is no version token on the row.
    pub async fn save(&self, result: &AthleteResult) -> Result<AthleteResult> {
        let saved = sqlx::query_as::<_, AthleteResult>(&format!(
            "UPDATE results SET \
                 nomination_id = $2, flight_id = $3, group_id = $4, \
                 age_category = $5, weight_category = $6, \
                 bodyweight = $7, lot_number = $8, weighed_in_at = $9, \
                 attempts = $10, \
                 best_squat = $11, best_bench = $12, best_deadlift = $13, \
                 total = $14, wilks = $15, ipf_points = $16, place = $17, \
                 updated_at = now() \
             WHERE result_id = $1 \
             RETURNING {RESULT_COLUMNS}"
        ))
        .bind(result.result_id)
        .bind(result.nomination_id)
        .bind(result.flight_id)
        .bind(result.group_id)
        .bind(&result.age_category)
        .bind(&result.weight_category)
        .bind(result.bodyweight)
        .bind(result.lot_number)
        .bind(result.weighed_in_at)
        .bind(&result.attempts)
        .bind(result.best_squat)
        .bind(result.best_bench)
        .bind(result.best_deadlift)
        .bind(result.total)
        .bind(result.wilks)
        .bind(result.ipf_points)
        .bind(result.place)
        .fetch_one(self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn list_by_nomination_ids(
        &self,
        nomination_ids: &[Uuid],
    ) -> Result<Vec<AthleteResult>> {
        if nomination_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, AthleteResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results WHERE nomination_id = ANY($1)"
        ))
        .bind(nomination_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    /// Results for one group of one flight, addressed by competition and the
    /// flight/group numbers as they appear on the program.
    pub async fn list_by_flight_and_group_number(
        &self,
        competition_id: Uuid,
        flight_number: i32,
        group_number: i32,
    ) -> Result<Vec<AthleteResult>> {
        let results = sqlx::query_as::<_, AthleteResult>(&format!(
            "SELECT {columns} FROM results r \
             INNER JOIN flights f ON r.flight_id = f.flight_id \
             INNER JOIN groups g ON r.group_id = g.group_id \
             WHERE r.competition_id = $1 AND f.number = $2 AND g.number = $3 \
             ORDER BY r.lot_number NULLS LAST",
            columns = qualified_result_columns("r")
        ))
        .bind(competition_id)
        .bind(flight_number)
        .bind(group_number)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    pub async fn list_by_athletes(
        &self,
        competition_id: Uuid,
        athlete_ids: &[Uuid],
    ) -> Result<Vec<AthleteResult>> {
        if athlete_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, AthleteResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results \
             WHERE competition_id = $1 AND athlete_id = ANY($2) \
             ORDER BY lot_number NULLS LAST"
        ))
        .bind(competition_id)
        .bind(athlete_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }
}

fn qualified_result_columns(alias: &str) -> String {
    RESULT_COLUMNS
        .split(", ")
        .map(|col| format!("{alias}.{}", col.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
