use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::ranking::{GlobalRankingEntry, MyRankResponse};
use crate::error::Result;

#[derive(FromRow)]
struct RankingRow {
    rank: i64,
    user_id: Uuid,
    username: String,
    points: i64,
}

#[derive(FromRow)]
struct MyRankRow {
    rank: i64,
    points: i64,
}

/// Repository for the cross-prize points ranking
pub struct RankingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RankingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Global ranking page: point-record totals per user, densest earners
    /// first, earliest earner breaking ties
    pub async fn global(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<GlobalRankingEntry>, i64)> {
        let total_items: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT user_id) FROM point_records")
                .fetch_one(self.pool)
                .await?;

        let rows = sqlx::query_as::<_, RankingRow>(
            "SELECT ROW_NUMBER() OVER (ORDER BY SUM(pr.amount) DESC, MIN(pr.created_at) ASC) \
                        AS rank, \
                    pr.user_id, p.username, SUM(pr.amount)::BIGINT AS points \
             FROM point_records pr \
             INNER JOIN profiles p ON p.user_id = pr.user_id \
             GROUP BY pr.user_id, p.username \
             ORDER BY rank \
             LIMIT $1 OFFSET $2",
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| GlobalRankingEntry {
                rank: row.rank,
                user_id: row.user_id,
                username: row.username,
                points: row.points,
            })
            .collect();

        Ok((entries, total_items))
    }

    /// The caller's own global rank. Users with no point records are absent
    /// from the ranking and get a null rank with zero points.
    pub async fn my_rank(&self, user_id: Uuid) -> Result<MyRankResponse> {
        let row = sqlx::query_as::<_, MyRankRow>(
            "WITH totals AS ( \
                 SELECT user_id, SUM(amount)::BIGINT AS points, MIN(created_at) AS first_earned \
                 FROM point_records \
                 GROUP BY user_id \
             ), ranked AS ( \
                 SELECT user_id, points, \
                        ROW_NUMBER() OVER (ORDER BY points DESC, first_earned ASC) AS rank \
                 FROM totals \
             ) \
             SELECT rank, points FROM ranked WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(match row {
            Some(row) => MyRankResponse {
                rank: Some(row.rank),
                points: row.points,
            },
            None => MyRankResponse {
                rank: None,
                points: 0,
            },
        })
    }
}
