use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::submission::{CreateSubmissionRequest, PendingSubmissionEntry};
use crate::error::{Result, StorageError};
use crate::models::{Submission, SubmissionStatus};

const SUBMISSION_COLUMNS: &str =
    "submission_id, user_id, activity_id, prize_id, status, proof_url, content, \
     admin_comment, bonus_points, reviewed_by, reviewed_at, created_at";

/// Free-text content of a submission, used by the duplicate advisory
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionContent {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct PendingRow {
    submission_id: Uuid,
    user_id: Uuid,
    username: String,
    activity_name: String,
    activity_points: i32,
    prize_id: Option<Uuid>,
    proof_url: Option<String>,
    content: Option<String>,
    created_at: DateTime<Utc>,
}

/// Repository for Submission database operations
pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a submission by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE submission_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }

    /// Create a pending submission
    pub async fn create(&self, user_id: Uuid, req: &CreateSubmissionRequest) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "INSERT INTO submissions (user_id, activity_id, prize_id, proof_url, content) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SUBMISSION_COLUMNS}"
        ))
        .bind(user_id)
        .bind(req.activity_id)
        .bind(req.prize_id)
        .bind(&req.proof_url)
        .bind(&req.content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                return StorageError::ConstraintViolation("Unknown user or activity".to_string());
            }
            err
        })?;

        Ok(submission)
    }

    /// A user's own submissions, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions \
             WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    /// The admin review queue: pending submissions with submitter and
    /// activity context, oldest first
    pub async fn list_pending(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<PendingSubmissionEntry>, i64)> {
        let total_items: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE status = 'pending'")
                .fetch_one(self.pool)
                .await?;

        let rows = sqlx::query_as::<_, PendingRow>(
            "SELECT s.submission_id, s.user_id, p.username, \
                    a.name AS activity_name, a.points AS activity_points, \
                    s.prize_id, s.proof_url, s.content, s.created_at \
             FROM submissions s \
             INNER JOIN profiles p ON p.user_id = s.user_id \
             INNER JOIN activities a ON a.activity_id = s.activity_id \
             WHERE s.status = 'pending' \
             ORDER BY s.created_at ASC \
             LIMIT $1 OFFSET $2",
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| PendingSubmissionEntry {
                submission_id: row.submission_id,
                user_id: row.user_id,
                username: row.username,
                activity_name: row.activity_name,
                activity_points: row.activity_points,
                prize_id: row.prize_id,
                proof_url: row.proof_url,
                content: row.content,
                created_at: row.created_at,
            })
            .collect();

        Ok((entries, total_items))
    }

    /// Free-text content of every other submission, for similarity scoring
    pub async fn list_other_content(&self, exclude: Uuid) -> Result<Vec<SubmissionContent>> {
        let rows = sqlx::query_as::<_, SubmissionContent>(
            "SELECT submission_id, user_id, content, status, created_at \
             FROM submissions \
             WHERE submission_id <> $1 AND content IS NOT NULL AND content <> ''",
        )
        .bind(exclude)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
