use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    approve_submission, create_submission, my_submissions, pending_submissions,
    reject_submission, similar_submissions,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/pending", get(pending_submissions))
        .route("/:id/similar", get(similar_submissions))
        .route("/:id/approve", post(approve_submission))
        .route("/:id/reject", post(reject_submission))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", post(create_submission))
        .route("/mine", get(my_submissions))
        .merge(protected)
}
