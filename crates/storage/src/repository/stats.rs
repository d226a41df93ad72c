use sqlx::PgPool;

use crate::dto::stats::AdminStats;
use crate::error::Result;

/// Repository for admin dashboard counters
pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        let stats = sqlx::query_as::<_, AdminStats>(
            "SELECT \
                 (SELECT COUNT(*) FROM profiles) AS total_users, \
                 (SELECT COUNT(*) FROM prizes WHERE active) AS active_prizes, \
                 (SELECT COUNT(*) FROM submissions WHERE status = 'pending') \
                     AS pending_submissions, \
                 (SELECT COUNT(*) FROM submissions WHERE status = 'approved') \
                     AS approved_submissions, \
                 (SELECT COALESCE(SUM(amount), 0)::BIGINT FROM point_records) \
                     AS points_awarded",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(stats)
    }
}
