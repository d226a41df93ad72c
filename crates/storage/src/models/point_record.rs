use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Points awarded for one approved submission.
/// amount = activity.points + bonus; one record per submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PointRecord {
    pub point_record_id: Uuid,
    pub user_id: Uuid,
    pub submission_id: Uuid,
    pub prize_id: Option<Uuid>,
    pub amount: i32,
    pub created_at: DateTime<Utc>,
}
