use axum::{Router, routing::get};
use storage::Database;

use super::handlers::list_by_competition;

pub fn routes() -> Router<Database> {
    Router::new().route("/competition/:id", get(list_by_competition))
}
