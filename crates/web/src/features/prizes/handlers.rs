use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::leaderboard::LeaderboardResponse,
    dto::prize::{CreatePrizeRequest, PrizeResponse, UpdatePrizeRequest},
    models::PrizeRegistration,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/prizes",
    responses(
        (status = 200, description = "List active prize competitions with their derived phase", body = Vec<PrizeResponse>)
    ),
    tag = "prizes"
)]
pub async fn list_prizes(State(db): State<Database>) -> Result<Json<Vec<PrizeResponse>>, WebError> {
    let now = Utc::now();
    let prizes = services::list_active_prizes(db.pool()).await?;

    let response: Vec<PrizeResponse> = prizes
        .into_iter()
        .map(|prize| PrizeResponse::from_prize(prize, now))
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/prizes/all",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all prizes, including inactive ones", body = Vec<PrizeResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "prizes"
)]
pub async fn list_all_prizes(State(db): State<Database>) -> Result<Response, WebError> {
    let now = Utc::now();
    let prizes = services::list_all_prizes(db.pool()).await?;

    let response: Vec<PrizeResponse> = prizes
        .into_iter()
        .map(|prize| PrizeResponse::from_prize(prize, now))
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/prizes/{id}",
    params(
        ("id" = Uuid, Path, description = "Prize ID")
    ),
    responses(
        (status = 200, description = "Prize found", body = PrizeResponse),
        (status = 404, description = "Prize not found")
    ),
    tag = "prizes"
)]
pub async fn get_prize(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let prize = services::get_prize(db.pool(), id).await?;

    Ok(Json(PrizeResponse::from_prize(prize, Utc::now())).into_response())
}

#[utoipa::path(
    post,
    path = "/api/prizes",
    request_body = CreatePrizeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Prize created successfully", body = PrizeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "prizes"
)]
pub async fn create_prize(
    State(db): State<Database>,
    Json(req): Json<CreatePrizeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_windows()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let prize = services::create_prize(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(PrizeResponse::from_prize(prize, Utc::now())),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/prizes/{id}",
    params(
        ("id" = Uuid, Path, description = "Prize ID")
    ),
    request_body = UpdatePrizeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Prize updated successfully", body = PrizeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Prize not found"),
        (status = 409, description = "Window invariant violated")
    ),
    tag = "prizes"
)]
pub async fn update_prize(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePrizeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_prize(db.pool(), id, &req).await?;

    Ok(Json(PrizeResponse::from_prize(updated, Utc::now())).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/prizes/{id}",
    params(
        ("id" = Uuid, Path, description = "Prize ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Prize deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Prize not found"),
        (status = 409, description = "Prize is still active")
    ),
    tag = "prizes"
)]
pub async fn delete_prize(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_prize(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/prizes/{id}/register",
    params(
        ("id" = Uuid, Path, description = "Prize ID")
    ),
    responses(
        (status = 201, description = "Registered for the prize", body = PrizeRegistration),
        (status = 401, description = "Missing or invalid user identity"),
        (status = 403, description = "Registration window not open"),
        (status = 404, description = "Prize not found"),
        (status = 409, description = "Already registered")
    ),
    tag = "prizes"
)]
pub async fn register_for_prize(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let registration = services::register(db.pool(), id, user_id, Utc::now()).await?;

    tracing::info!(prize_id = %id, user_id = %user_id, "user registered for prize");

    Ok((StatusCode::CREATED, Json(registration)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/prizes/{id}/leaderboard",
    params(
        ("id" = Uuid, Path, description = "Prize ID")
    ),
    responses(
        (status = 200, description = "Standings for the competition", body = LeaderboardResponse),
        (status = 401, description = "Missing or invalid user identity"),
        (status = 403, description = "Viewer is not registered for this prize"),
        (status = 404, description = "Prize not found")
    ),
    tag = "prizes"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let leaderboard = services::get_leaderboard(db.pool(), id, user_id, Utc::now()).await?;

    Ok(Json(leaderboard).into_response())
}
