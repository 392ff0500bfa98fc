use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{list_by_athletes, list_by_flight_and_group, save_attempt, save_weigh_in};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/weigh-in", post(save_weigh_in))
        .route("/attempt", post(save_attempt))
        .route(
            "/competition/:id/flight/:flight_number/group/:group_number",
            get(list_by_flight_and_group),
        )
        .route("/competition/:id/athletes", post(list_by_athletes))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
