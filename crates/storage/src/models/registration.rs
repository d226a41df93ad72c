use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One user's enrollment in one prize competition.
///
/// `points` only moves upward, as a side effect of approved submissions
/// tied to this prize.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PrizeRegistration {
    pub registration_id: Uuid,
    pub prize_id: Uuid,
    pub user_id: Uuid,
    pub points: i32,
    pub registered_at: DateTime<Utc>,
}
