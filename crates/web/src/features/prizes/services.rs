use chrono::{DateTime, Utc};
use sqlx::PgPool;
use storage::{
    dto::leaderboard::LeaderboardResponse,
    dto::prize::{CreatePrizeRequest, UpdatePrizeRequest, validate_windows},
    error::{Result, StorageError},
    models::{Prize, PrizeRegistration},
    repository::{prize::PrizeRepository, registration::RegistrationRepository},
    services::{leaderboard, registration},
};
use uuid::Uuid;

/// List active prizes
pub async fn list_active_prizes(pool: &PgPool) -> Result<Vec<Prize>> {
    let repo = PrizeRepository::new(pool);
    repo.list_active().await
}

/// List every prize, including inactive ones (admin view)
pub async fn list_all_prizes(pool: &PgPool) -> Result<Vec<Prize>> {
    let repo = PrizeRepository::new(pool);
    repo.list().await
}

/// Get a prize by ID
pub async fn get_prize(pool: &PgPool, id: Uuid) -> Result<Prize> {
    let repo = PrizeRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new prize
pub async fn create_prize(pool: &PgPool, request: &CreatePrizeRequest) -> Result<Prize> {
    let repo = PrizeRepository::new(pool);
    repo.create(request).await
}

/// Update a prize, re-checking the window invariants on the merged result
pub async fn update_prize(pool: &PgPool, id: Uuid, request: &UpdatePrizeRequest) -> Result<Prize> {
    let repo = PrizeRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    let merged_start = request.registration_start.unwrap_or(existing.registration_start);
    let merged_end = request.registration_end.unwrap_or(existing.registration_end);
    let merged_deadline = request.deadline.unwrap_or(existing.deadline);
    validate_windows(merged_start, merged_end, merged_deadline)
        .map_err(|e| StorageError::ConstraintViolation(e.to_string()))?;

    repo.update(id, &existing, request).await
}

/// Delete a prize. Only inactive prizes with no registrations may be
/// deleted; a competition someone enrolled in stays on record.
pub async fn delete_prize(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = PrizeRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    if existing.active {
        return Err(StorageError::ConstraintViolation(
            "Only inactive prizes can be deleted".to_string(),
        ));
    }

    let registrations = RegistrationRepository::new(pool).count_for_prize(id).await?;
    if registrations > 0 {
        return Err(StorageError::ConstraintViolation(
            "Prize still has registrations".to_string(),
        ));
    }

    repo.delete(id).await
}

/// Enroll a user in a prize competition
pub async fn register(
    pool: &PgPool,
    prize_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<PrizeRegistration> {
    registration::register(pool, prize_id, user_id, now).await
}

/// Leaderboard for a prize, visible to registered participants only
pub async fn get_leaderboard(
    pool: &PgPool,
    prize_id: Uuid,
    viewer: Uuid,
    now: DateTime<Utc>,
) -> Result<LeaderboardResponse> {
    leaderboard::standings(pool, prize_id, viewer, now).await
}
