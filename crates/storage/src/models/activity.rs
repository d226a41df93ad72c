use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalog entry describing a reusable task and its base point value.
/// Admin-managed reference data; read-only for everyone else.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Activity {
    pub activity_id: Uuid,
    pub name: String,
    pub activity_type: String,
    pub points: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
