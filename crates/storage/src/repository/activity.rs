use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::activity::{CreateActivityRequest, UpdateActivityRequest};
use crate::error::{Result, StorageError};
use crate::models::Activity;

const ACTIVITY_COLUMNS: &str = "activity_id, name, activity_type, points, active, created_at";

/// Repository for Activity database operations
pub struct ActivityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ActivityRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active catalog activities
    pub async fn list_active(&self) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE active ORDER BY name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(activities)
    }

    /// Get an activity by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Activity> {
        let activity = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE activity_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(activity)
    }

    /// Create a new catalog activity
    pub async fn create(&self, req: &CreateActivityRequest) -> Result<Activity> {
        let activity = sqlx::query_as::<_, Activity>(&format!(
            "INSERT INTO activities (name, activity_type, points, active) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ACTIVITY_COLUMNS}"
        ))
        .bind(&req.name)
        .bind(&req.activity_type)
        .bind(req.points)
        .bind(req.active)
        .fetch_one(self.pool)
        .await?;

        Ok(activity)
    }

    /// Update an existing activity, keeping fields the request leaves unset
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Activity,
        req: &UpdateActivityRequest,
    ) -> Result<Activity> {
        let activity = sqlx::query_as::<_, Activity>(&format!(
            "UPDATE activities \
             SET name = $2, activity_type = $3, points = $4, active = $5 \
             WHERE activity_id = $1 \
             RETURNING {ACTIVITY_COLUMNS}"
        ))
        .bind(id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.activity_type.as_ref().unwrap_or(&existing.activity_type))
        .bind(req.points.unwrap_or(existing.points))
        .bind(req.active.unwrap_or(existing.active))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(activity)
    }
}
