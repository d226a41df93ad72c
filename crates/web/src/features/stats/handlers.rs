use axum::{Json, extract::State};
use storage::{Database, dto::stats::AdminStats};

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stats",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Platform-wide counters for the admin dashboard", body = AdminStats),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stats"
)]
pub async fn admin_stats(State(db): State<Database>) -> WebResult<Json<AdminStats>> {
    let stats = services::admin_stats(db.pool()).await?;

    Ok(Json(stats))
}
