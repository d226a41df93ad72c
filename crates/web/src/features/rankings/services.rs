use sqlx::PgPool;
use storage::{
    dto::common::PaginationParams,
    dto::ranking::{GlobalRankingEntry, MyRankResponse},
    error::Result,
    repository::ranking::RankingRepository,
};
use uuid::Uuid;

/// One page of the global points ranking
pub async fn global_ranking(
    pool: &PgPool,
    pagination: &PaginationParams,
) -> Result<(Vec<GlobalRankingEntry>, i64)> {
    let repo = RankingRepository::new(pool);
    repo.global(pagination).await
}

/// The current user's position in the global ranking
pub async fn my_rank(pool: &PgPool, user_id: Uuid) -> Result<MyRankResponse> {
    let repo = RankingRepository::new(pool);
    repo.my_rank(user_id).await
}
