use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Submission, SubmissionStatus};

/// Request payload for submitting a completed activity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSubmissionRequest {
    pub activity_id: Uuid,

    /// Competition this submission should count toward, if any.
    /// Requires an existing registration for that prize.
    pub prize_id: Option<Uuid>,

    #[validate(url(message = "proof_url must be a valid URL"))]
    pub proof_url: Option<String>,

    #[validate(length(max = 5000, message = "content must be at most 5000 characters"))]
    pub content: Option<String>,
}

impl CreateSubmissionRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_proof(&self) -> Result<(), &'static str> {
        let has_url = self.proof_url.as_deref().is_some_and(|u| !u.is_empty());
        let has_content = self
            .content
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty());

        if !has_url && !has_content {
            return Err("Provide a proof URL or proof content");
        }

        Ok(())
    }
}

/// Request payload for approving a pending submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApproveSubmissionRequest {
    #[validate(range(min = 0, max = 500, message = "bonus_points must be between 0 and 500"))]
    pub bonus_points: Option<i32>,
}

/// Request payload for rejecting a pending submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RejectSubmissionRequest {
    #[validate(length(max = 1000))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub activity_id: Uuid,
    pub prize_id: Option<Uuid>,
    pub status: SubmissionStatus,
    pub proof_url: Option<String>,
    pub content: Option<String>,
    pub admin_comment: Option<String>,
    pub bonus_points: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            submission_id: s.submission_id,
            activity_id: s.activity_id,
            prize_id: s.prize_id,
            status: s.status,
            proof_url: s.proof_url,
            content: s.content,
            admin_comment: s.admin_comment,
            bonus_points: s.bonus_points,
            created_at: s.created_at,
        }
    }
}

/// One row of the admin review queue
#[derive(Debug, Serialize, ToSchema)]
pub struct PendingSubmissionEntry {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub activity_name: String,
    pub activity_points: i32,
    pub prize_id: Option<Uuid>,
    pub proof_url: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One earlier submission whose content resembles the one under review
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SimilarSubmissionEntry {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    /// Cosine similarity on 0..=1
    pub similarity: f64,
    pub similarity_percent: i32,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

/// Non-blocking duplicate-content warning shown to the reviewing admin.
/// Never prevents approval; only pre-fills a suggested rejection reason.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SimilarityAdvisory {
    pub matches: Vec<SimilarSubmissionEntry>,
    pub suggested_reason: Option<String>,
}
