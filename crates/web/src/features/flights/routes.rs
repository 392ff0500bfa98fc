use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};
use storage::Database;

use super::handlers::{
    create_flight, list_flights_by_competition, recalculate_flight_status, update_flight,
    update_flight_status,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_flight))
        .route("/:id", put(update_flight))
        .route("/:id/status", patch(update_flight_status))
        .route("/:id/recalculate-status", post(recalculate_flight_status))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/competition/:id", get(list_flights_by_competition))
        .merge(protected)
}
