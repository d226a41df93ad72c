use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::prize::PrizePhase;

/// Raw registration row fed into the standings computation, ordered by
/// points descending with earliest registration breaking ties.
#[derive(Debug, Clone, FromRow)]
pub struct StandingRow {
    pub user_id: Uuid,
    pub username: String,
    pub points: i32,
    pub registered_at: DateTime<Utc>,
}

/// Final outcome label, only produced once the competition deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner,
    DidNotQualify,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingEntry {
    /// 1-based position; ties get distinct sequential positions
    pub position: u32,
    pub user_id: Uuid,
    pub username: String,
    pub points: i32,
    /// Progress toward points_required, capped at 100
    pub percent: i32,
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub prize_id: Uuid,
    pub prize_name: String,
    pub points_required: i32,
    pub phase: PrizePhase,
    pub standings: Vec<StandingEntry>,
}
