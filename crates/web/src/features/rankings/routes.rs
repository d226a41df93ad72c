use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{global_ranking, my_rank};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(global_ranking))
        .route("/me", get(my_rank))
}
