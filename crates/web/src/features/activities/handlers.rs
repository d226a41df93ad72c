use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::activity::{ActivityResponse, CreateActivityRequest, UpdateActivityRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/activities",
    responses(
        (status = 200, description = "List active catalog activities", body = Vec<ActivityResponse>)
    ),
    tag = "activities"
)]
pub async fn list_activities(
    State(db): State<Database>,
) -> Result<Json<Vec<ActivityResponse>>, WebError> {
    let activities = services::list_activities(db.pool()).await?;

    let response: Vec<ActivityResponse> = activities
        .into_iter()
        .map(ActivityResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/activities",
    request_body = CreateActivityRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Activity created successfully", body = ActivityResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "activities"
)]
pub async fn create_activity(
    State(db): State<Database>,
    Json(req): Json<CreateActivityRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let activity = services::create_activity(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ActivityResponse::from(activity))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    params(
        ("id" = Uuid, Path, description = "Activity ID")
    ),
    request_body = UpdateActivityRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Activity updated successfully", body = ActivityResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Activity not found")
    ),
    tag = "activities"
)]
pub async fn update_activity(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateActivityRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_activity(db.pool(), id, &req).await?;

    Ok(Json(ActivityResponse::from(updated)).into_response())
}
