use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::submission::CreateSubmissionRequest;
use crate::error::{Result, StorageError};
use crate::models::{Submission, SubmissionStatus};
use crate::repository::activity::ActivityRepository;
use crate::repository::prize::PrizeRepository;
use crate::repository::registration::RegistrationRepository;
use crate::repository::submission::SubmissionRepository;

const SUBMISSION_COLUMNS: &str =
    "submission_id, user_id, activity_id, prize_id, status, proof_url, content, \
     admin_comment, bonus_points, reviewed_by, reviewed_at, created_at";

/// Create a pending submission. When the submission is tied to a prize the
/// submitter must already hold a registration for it; this is enforced here
/// and re-checked inside `approve`.
pub async fn create_submission(
    pool: &PgPool,
    user_id: Uuid,
    req: &CreateSubmissionRequest,
) -> Result<Submission> {
    let activity = ActivityRepository::new(pool).find_by_id(req.activity_id).await?;
    if !activity.active {
        return Err(StorageError::NotFound);
    }

    if let Some(prize_id) = req.prize_id {
        let prize = PrizeRepository::new(pool).find_by_id(prize_id).await?;
        if !prize.active {
            return Err(StorageError::NotFound);
        }

        let registration = RegistrationRepository::new(pool).find(prize_id, user_id).await?;
        if registration.is_none() {
            return Err(StorageError::NotRegistered);
        }
    }

    SubmissionRepository::new(pool).create(user_id, req).await
}

/// Approve a pending submission and credit its points, as one transaction.
///
/// The status flip is a compare-and-set on `status = 'pending'`, so a
/// concurrent or retried approval observes NotPending instead of crediting
/// twice. The point record and the registration increment commit together
/// with the status change or not at all.
pub async fn approve(
    pool: &PgPool,
    submission_id: Uuid,
    reviewer: Uuid,
    bonus_points: Option<i32>,
    now: DateTime<Utc>,
) -> Result<Submission> {
    let mut tx = pool.begin().await?;

    let submission = sqlx::query_as::<_, Submission>(&format!(
        "UPDATE submissions \
         SET status = 'approved', bonus_points = $2, reviewed_by = $3, reviewed_at = $4 \
         WHERE submission_id = $1 AND status = 'pending' \
         RETURNING {SUBMISSION_COLUMNS}"
    ))
    .bind(submission_id)
    .bind(bonus_points)
    .bind(reviewer)
    .bind(now)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(submission) = submission else {
        return Err(resolved_or_missing(&mut tx, submission_id).await?);
    };

    let activity_points: i32 =
        sqlx::query_scalar("SELECT points FROM activities WHERE activity_id = $1")
            .bind(submission.activity_id)
            .fetch_one(&mut *tx)
            .await?;

    let amount = activity_points + bonus_points.unwrap_or(0);

    if let Some(prize_id) = submission.prize_id {
        let updated = sqlx::query(
            "UPDATE prize_registrations SET points = points + $3 \
             WHERE prize_id = $1 AND user_id = $2",
        )
        .bind(prize_id)
        .bind(submission.user_id)
        .bind(amount)
        .execute(&mut *tx)
        .await?;

        // Hard server-side precondition: no registration, no credit.
        // Dropping the transaction rolls the status flip back.
        if updated.rows_affected() == 0 {
            return Err(StorageError::NotRegistered);
        }
    }

    sqlx::query(
        "INSERT INTO point_records (user_id, submission_id, prize_id, amount) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(submission.user_id)
    .bind(submission.submission_id)
    .bind(submission.prize_id)
    .bind(amount)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(submission)
}

/// Reject a pending submission with a reason. Never touches points.
pub async fn reject(
    pool: &PgPool,
    submission_id: Uuid,
    reviewer: Uuid,
    reason: &str,
    now: DateTime<Utc>,
) -> Result<Submission> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(StorageError::MissingReason);
    }

    let mut tx = pool.begin().await?;

    let submission = sqlx::query_as::<_, Submission>(&format!(
        "UPDATE submissions \
         SET status = 'rejected', admin_comment = $2, reviewed_by = $3, reviewed_at = $4 \
         WHERE submission_id = $1 AND status = 'pending' \
         RETURNING {SUBMISSION_COLUMNS}"
    ))
    .bind(submission_id)
    .bind(reason)
    .bind(reviewer)
    .bind(now)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(submission) = submission else {
        return Err(resolved_or_missing(&mut tx, submission_id).await?);
    };

    tx.commit().await?;

    Ok(submission)
}

/// Distinguish a submission that never existed from one already reviewed.
async fn resolved_or_missing(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    submission_id: Uuid,
) -> Result<StorageError> {
    let status: Option<SubmissionStatus> =
        sqlx::query_scalar("SELECT status FROM submissions WHERE submission_id = $1")
            .bind(submission_id)
            .fetch_optional(&mut **tx)
            .await?;

    Ok(match status {
        None => StorageError::NotFound,
        Some(_) => StorageError::NotPending,
    })
}
