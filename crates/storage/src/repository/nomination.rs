use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Nomination;

const NOMINATION_COLUMNS: &str = "nomination_id, athlete_id, competition_id, weight_category, \
     age_category, status, nominated_by, nominated_at, group_id";

/// Repository for Nomination reads and group-assignment updates. Nomination
/// creation and eligibility checks live in the entry workflow, not here.
pub struct NominationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NominationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Nomination> {
        let nomination = sqlx::query_as::<_, Nomination>(&format!(
            "SELECT {NOMINATION_COLUMNS} FROM nominations WHERE nomination_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(nomination)
    }

    /// The unique nomination for an athlete in a competition. An athlete
    /// cannot score without one.
    pub async fn find_by_athlete_and_competition(
        &self,
        athlete_id: Uuid,
        competition_id: Uuid,
    ) -> Result<Nomination> {
        let nomination = sqlx::query_as::<_, Nomination>(&format!(
            "SELECT {NOMINATION_COLUMNS} FROM nominations \
             WHERE athlete_id = $1 AND competition_id = $2"
        ))
        .bind(athlete_id)
        .bind(competition_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(nomination)
    }

    pub async fn list_by_competition(&self, competition_id: Uuid) -> Result<Vec<Nomination>> {
        let nominations = sqlx::query_as::<_, Nomination>(&format!(
            "SELECT {NOMINATION_COLUMNS} FROM nominations \
             WHERE competition_id = $1 ORDER BY nominated_at"
        ))
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(nominations)
    }

    /// All nominations assigned to any of the given groups.
    pub async fn list_by_group_ids(&self, group_ids: &[Uuid]) -> Result<Vec<Nomination>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let nominations = sqlx::query_as::<_, Nomination>(&format!(
            "SELECT {NOMINATION_COLUMNS} FROM nominations \
             WHERE group_id = ANY($1) ORDER BY nominated_at"
        ))
        .bind(group_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(nominations)
    }
}
