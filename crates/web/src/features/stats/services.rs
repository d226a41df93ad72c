use sqlx::PgPool;
use storage::{dto::stats::AdminStats, error::Result, repository::stats::StatsRepository};

/// Admin dashboard counters
pub async fn admin_stats(pool: &PgPool) -> Result<AdminStats> {
    let repo = StatsRepository::new(pool);
    repo.admin_stats().await
}
