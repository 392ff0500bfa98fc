use sqlx::PgPool;
use storage::{
    error::Result, models::Nomination, repository::nomination::NominationRepository,
};
use uuid::Uuid;

pub async fn list_by_competition(pool: &PgPool, competition_id: Uuid) -> Result<Vec<Nomination>> {
    NominationRepository::new(pool)
        .list_by_competition(competition_id)
        .await
}
