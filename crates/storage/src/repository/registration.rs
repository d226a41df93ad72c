use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::leaderboard::StandingRow;
use crate::error::{Result, StorageError};
use crate::models::PrizeRegistration;

const REGISTRATION_COLUMNS: &str =
    "registration_id, prize_id, user_id, points, registered_at";

/// Repository for PrizeRegistration database operations
pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's registration for a prize, if any
    pub async fn find(&self, prize_id: Uuid, user_id: Uuid) -> Result<Option<PrizeRegistration>> {
        let registration = sqlx::query_as::<_, PrizeRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM prize_registrations \
             WHERE prize_id = $1 AND user_id = $2"
        ))
        .bind(prize_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(registration)
    }

    /// Create a registration with zero points.
    /// The unique (prize_id, user_id) index is the last line of defense
    /// against concurrent double registration.
    pub async fn create(&self, prize_id: Uuid, user_id: Uuid) -> Result<PrizeRegistration> {
        let registration = sqlx::query_as::<_, PrizeRegistration>(&format!(
            "INSERT INTO prize_registrations (prize_id, user_id) \
             VALUES ($1, $2) \
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(prize_id)
        .bind(user_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_unique_violation() {
                return StorageError::AlreadyRegistered;
            }
            if err.is_foreign_key_violation() {
                return StorageError::ConstraintViolation("Unknown user".to_string());
            }
            err
        })?;

        Ok(registration)
    }

    /// All registrations for a prize with participant names, ordered for the
    /// leaderboard: points descending, earliest registration breaking ties.
    pub async fn standings_for_prize(&self, prize_id: Uuid) -> Result<Vec<StandingRow>> {
        let rows = sqlx::query_as::<_, StandingRow>(
            "SELECT r.user_id, p.username, r.points, r.registered_at \
             FROM prize_registrations r \
             INNER JOIN profiles p ON p.user_id = r.user_id \
             WHERE r.prize_id = $1 \
             ORDER BY r.points DESC, r.registered_at ASC, r.registration_id ASC",
        )
        .bind(prize_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Number of registrations held by a prize
    pub async fn count_for_prize(&self, prize_id: Uuid) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM prize_registrations WHERE prize_id = $1")
                .bind(prize_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
