use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Admin dashboard counters
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AdminStats {
    pub total_users: i64,
    pub active_prizes: i64,
    pub pending_submissions: i64,
    pub approved_submissions: i64,
    pub points_awarded: i64,
}
