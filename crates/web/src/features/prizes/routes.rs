use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_prize, delete_prize, get_leaderboard, get_prize, list_all_prizes, list_prizes,
    register_for_prize, update_prize,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_prize))
        .route("/all", get(list_all_prizes))
        .route("/:id", put(update_prize))
        .route("/:id", delete(delete_prize))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_prizes))
        .route("/:id", get(get_prize))
        .route("/:id/register", post(register_for_prize))
        .route("/:id/leaderboard", get(get_leaderboard))
        .merge(protected)
}
