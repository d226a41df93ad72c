use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::common::{PaginatedResponse, PaginationParams},
    dto::submission::{
        ApproveSubmissionRequest, CreateSubmissionRequest, PendingSubmissionEntry,
        RejectSubmissionRequest, SimilarityAdvisory, SubmissionResponse,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission created and awaiting review", body = SubmissionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid user identity"),
        (status = 403, description = "Not registered for the chosen prize"),
        (status = 404, description = "Activity or prize not found")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_proof()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let submission = services::create_submission(db.pool(), user_id, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::from(submission)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/mine",
    responses(
        (status = 200, description = "The current user's submissions", body = Vec<SubmissionResponse>),
        (status = 401, description = "Missing or invalid user identity")
    ),
    tag = "submissions"
)]
pub async fn my_submissions(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<SubmissionResponse>>, WebError> {
    let submissions = services::my_submissions(db.pool(), user_id).await?;

    let response: Vec<SubmissionResponse> = submissions
        .into_iter()
        .map(SubmissionResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/submissions/pending",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending submissions awaiting review, oldest first", body = PaginatedResponse<PendingSubmissionEntry>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "submissions"
)]
pub async fn pending_submissions(
    State(db): State<Database>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (entries, total_items) = services::pending_submissions(db.pool(), &pagination).await?;

    Ok(Json(PaginatedResponse::new(
        entries,
        pagination.page,
        pagination.page_size,
        total_items,
    ))
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/{id}/similar",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Earlier submissions with similar content, closest first", body = SimilarityAdvisory),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn similar_submissions(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let advisory = services::similar_submissions(db.pool(), id).await?;

    Ok(Json(advisory).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = ApproveSubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission approved and points credited", body = SubmissionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Submitter is not registered for the tied prize"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Submission already reviewed")
    ),
    tag = "submissions"
)]
pub async fn approve_submission(
    State(db): State<Database>,
    CurrentUser(reviewer): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ApproveSubmissionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let submission =
        services::approve_submission(db.pool(), id, reviewer, req.bonus_points, Utc::now()).await?;

    tracing::info!(submission_id = %id, reviewer = %reviewer, "submission approved");

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = RejectSubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission rejected", body = SubmissionResponse),
        (status = 400, description = "Missing rejection reason"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Submission already reviewed")
    ),
    tag = "submissions"
)]
pub async fn reject_submission(
    State(db): State<Database>,
    CurrentUser(reviewer): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectSubmissionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let submission =
        services::reject_submission(db.pool(), id, reviewer, &req.reason, Utc::now()).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}
