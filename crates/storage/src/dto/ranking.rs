use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// One row of the cross-prize points ranking. Users with no point records
/// at all do not appear.
#[derive(Debug, Serialize, ToSchema)]
pub struct GlobalRankingEntry {
    pub rank: i64,
    pub user_id: Uuid,
    pub username: String,
    pub points: i64,
}

/// The caller's own position in the global ranking. `rank` is null when the
/// user has never earned a point record.
#[derive(Debug, Serialize, ToSchema)]
pub struct MyRankResponse {
    pub rank: Option<i64>,
    pub points: i64,
}
