use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::prize::{CreatePrizeRequest, UpdatePrizeRequest};
use crate::error::{Result, StorageError};
use crate::models::Prize;

const PRIZE_COLUMNS: &str = "prize_id, name, description, points_required, active, image_url, \
                             registration_start, registration_end, deadline, created_at";

/// Repository for Prize database operations
pub struct PrizeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PrizeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all prizes, newest first
    pub async fn list(&self) -> Result<Vec<Prize>> {
        let prizes = sqlx::query_as::<_, Prize>(&format!(
            "SELECT {PRIZE_COLUMNS} FROM prizes ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(prizes)
    }

    /// List active prizes only
    pub async fn list_active(&self) -> Result<Vec<Prize>> {
        let prizes = sqlx::query_as::<_, Prize>(&format!(
            "SELECT {PRIZE_COLUMNS} FROM prizes WHERE active ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(prizes)
    }

    /// Get a prize by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Prize> {
        let prize = sqlx::query_as::<_, Prize>(&format!(
            "SELECT {PRIZE_COLUMNS} FROM prizes WHERE prize_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(prize)
    }

    /// Create a new prize
    pub async fn create(&self, req: &CreatePrizeRequest) -> Result<Prize> {
        let prize = sqlx::query_as::<_, Prize>(&format!(
            "INSERT INTO prizes (name, description, points_required, active, image_url, \
                                 registration_start, registration_end, deadline) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PRIZE_COLUMNS}"
        ))
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.points_required)
        .bind(req.active)
        .bind(&req.image_url)
        .bind(req.registration_start)
        .bind(req.registration_end)
        .bind(req.deadline)
        .fetch_one(self.pool)
        .await?;

        Ok(prize)
    }

    /// Update an existing prize. Absent request fields keep their stored
    /// value; an explicit null clears a nullable column.
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Prize,
        req: &UpdatePrizeRequest,
    ) -> Result<Prize> {
        let prize = sqlx::query_as::<_, Prize>(&format!(
            "UPDATE prizes \
             SET name = $2, description = $3, points_required = $4, active = $5, \
                 image_url = $6, registration_start = $7, registration_end = $8, deadline = $9 \
             WHERE prize_id = $1 \
             RETURNING {PRIZE_COLUMNS}"
        ))
        .bind(id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.description.as_ref().unwrap_or(&existing.description))
        .bind(req.points_required.unwrap_or(existing.points_required))
        .bind(req.active.unwrap_or(existing.active))
        .bind(req.image_url.as_ref().unwrap_or(&existing.image_url))
        .bind(req.registration_start.unwrap_or(existing.registration_start))
        .bind(req.registration_end.unwrap_or(existing.registration_end))
        .bind(req.deadline.unwrap_or(existing.deadline))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(prize)
    }

    /// Delete a prize by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM prizes WHERE prize_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_foreign_key_violation() {
                    return StorageError::ConstraintViolation(
                        "Prize still has registrations or submissions".to_string(),
                    );
                }
                err
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
