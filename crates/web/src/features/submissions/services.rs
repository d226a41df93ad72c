use chrono::{DateTime, Utc};
use sqlx::PgPool;
use storage::{
    dto::common::PaginationParams,
    dto::submission::{CreateSubmissionRequest, PendingSubmissionEntry, SimilarityAdvisory},
    error::Result,
    models::Submission,
    repository::submission::SubmissionRepository,
    services::{review, similarity},
};
use uuid::Uuid;

/// Create a pending submission for the current user
pub async fn create_submission(
    pool: &PgPool,
    user_id: Uuid,
    request: &CreateSubmissionRequest,
) -> Result<Submission> {
    review::create_submission(pool, user_id, request).await
}

/// The current user's submissions, newest first
pub async fn my_submissions(pool: &PgPool, user_id: Uuid) -> Result<Vec<Submission>> {
    let repo = SubmissionRepository::new(pool);
    repo.list_for_user(user_id).await
}

/// Admin review queue, oldest first
pub async fn pending_submissions(
    pool: &PgPool,
    pagination: &PaginationParams,
) -> Result<(Vec<PendingSubmissionEntry>, i64)> {
    let repo = SubmissionRepository::new(pool);
    repo.list_pending(pagination).await
}

/// Duplicate-content advisory for one submission
pub async fn similar_submissions(pool: &PgPool, id: Uuid) -> Result<SimilarityAdvisory> {
    similarity::find_similar(pool, id).await
}

/// Approve a pending submission, crediting its points atomically
pub async fn approve_submission(
    pool: &PgPool,
    id: Uuid,
    reviewer: Uuid,
    bonus_points: Option<i32>,
    now: DateTime<Utc>,
) -> Result<Submission> {
    review::approve(pool, id, reviewer, bonus_points, now).await
}

/// Reject a pending submission with a reason
pub async fn reject_submission(
    pool: &PgPool,
    id: Uuid,
    reviewer: Uuid,
    reason: &str,
    now: DateTime<Utc>,
) -> Result<Submission> {
    review::reject(pool, id, reviewer, reason, now).await
}
