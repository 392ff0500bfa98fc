use sqlx::PgPool;
use storage::{
    dto::result::{AttemptRequest, ResultResponse, WeighInRequest},
    error::Result,
    repository::result::ResultRepository,
    services::scoring,
};
use uuid::Uuid;

pub async fn save_weigh_in(pool: &PgPool, request: &WeighInRequest) -> Result<ResultResponse> {
    let result = scoring::save_weigh_in(pool, request).await?;
    Ok(ResultResponse::from(result))
}

pub async fn save_attempt(pool: &PgPool, request: &AttemptRequest) -> Result<ResultResponse> {
    let result = scoring::save_attempt(pool, request).await?;
    Ok(ResultResponse::from(result))
}

pub async fn list_by_flight_and_group(
    pool: &PgPool,
    competition_id: Uuid,
    flight_number: i32,
    group_number: i32,
) -> Result<Vec<ResultResponse>> {
    let results = ResultRepository::new(pool)
        .list_by_flight_and_group_number(competition_id, flight_number, group_number)
        .await?;

    Ok(results.into_iter().map(ResultResponse::from).collect())
}

pub async fn list_by_athletes(
    pool: &PgPool,
    competition_id: Uuid,
    athlete_ids: &[Uuid],
) -> Result<Vec<ResultResponse>> {
    let results = ResultRepository::new(pool)
        .list_by_athletes(competition_id, athlete_ids)
        .await?;

    Ok(results.into_iter().map(ResultResponse::from).collect())
}
