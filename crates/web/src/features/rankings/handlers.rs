use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{PaginatedResponse, PaginationParams},
    dto::ranking::{GlobalRankingEntry, MyRankResponse},
};

use crate::error::{WebError, WebResult};
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings",
    params(PaginationParams),
    responses(
        (status = 200, description = "Global points ranking across all prizes", body = PaginatedResponse<GlobalRankingEntry>),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "rankings"
)]
pub async fn global_ranking(
    State(db): State<Database>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (entries, total_items) = services::global_ranking(db.pool(), &pagination).await?;

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
    path = "/api/rankings/me",
    responses(
        (status = 200, description = "The current user's global rank; rank is null without any earned points", body = MyRankResponse),
        (status = 401, description = "Missing or invalid user identity")
    ),
    tag = "rankings"
)]
pub async fn my_rank(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
) -> WebResult<Json<MyRankResponse>> {
    let response = services::my_rank(db.pool(), user_id).await?;

    Ok(Json(response))
}
