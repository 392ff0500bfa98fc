use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::common::ApiEnvelope, models::Nomination};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/nominations/competition/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Nominations for the competition", body = ApiEnvelope<Vec<Nomination>>)
    ),
    tag = "nominations"
)]
pub async fn list_by_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let nominations = services::list_by_competition(db.pool(), id).await?;

    Ok(Json(ApiEnvelope::ok(nominations)).into_response())
}
