use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Prize, PrizeRegistration};
use crate::repository::prize::PrizeRepository;
use crate::repository::registration::RegistrationRepository;

/// The registration gate: admit or reject a user's attempt to enroll in a
/// prize competition.
///
/// On success exactly one registration row is created with zero points;
/// every failure leaves no partial state behind.
pub async fn register(
    pool: &PgPool,
    prize_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<PrizeRegistration> {
    let prizes = PrizeRepository::new(pool);
    let prize = prizes.find_by_id(prize_id).await?;

    if !prize.active {
        return Err(StorageError::NotFound);
    }

    let registrations = RegistrationRepository::new(pool);
    if registrations.find(prize_id, user_id).await?.is_some() {
        return Err(StorageError::AlreadyRegistered);
    }

    ensure_window_open(&prize, now)?;

    // The unique index maps a concurrent duplicate to AlreadyRegistered
    // inside the repository.
    registrations.create(prize_id, user_id).await
}

/// Window check for the registration gate. A prize with no window configured
/// is always open.
pub fn ensure_window_open(prize: &Prize, now: DateTime<Utc>) -> Result<()> {
    if let Some(start) = prize.registration_start
        && now < start
    {
        return Err(StorageError::RegistrationNotOpen);
    }

    if let Some(end) = prize.registration_end
        && now > end
    {
        return Err(StorageError::RegistrationClosed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn prize(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Prize {
        Prize {
            prize_id: Uuid::new_v4(),
            name: "Networking Champion".to_string(),
            description: String::new(),
            points_required: 100,
            active: true,
            image_url: None,
            registration_start: start,
            registration_end: end,
            deadline: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn open_when_no_window_configured() {
        assert!(ensure_window_open(&prize(None, None), t0()).is_ok());
    }

    #[test]
    fn rejects_before_window_opens() {
        let p = prize(Some(t0()), Some(t0() + Duration::days(7)));
        let err = ensure_window_open(&p, t0() - Duration::days(1)).unwrap_err();
        assert!(matches!(err, StorageError::RegistrationNotOpen));
    }

    #[test]
    fn rejects_after_window_closes() {
        let p = prize(Some(t0()), Some(t0() + Duration::days(7)));
        let err = ensure_window_open(&p, t0() + Duration::days(8)).unwrap_err();
        assert!(matches!(err, StorageError::RegistrationClosed));
    }

    #[test]
    fn accepts_inside_the_window() {
        let p = prize(Some(t0()), Some(t0() + Duration::days(7)));
        assert!(ensure_window_open(&p, t0() + Duration::days(1)).is_ok());
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let p = prize(Some(t0()), Some(t0() + Duration::days(7)));
        assert!(ensure_window_open(&p, t0()).is_ok());
        assert!(ensure_window_open(&p, t0() + Duration::days(7)).is_ok());
    }

    #[test]
    fn half_open_windows_check_only_the_configured_bound() {
        let only_start = prize(Some(t0()), None);
        assert!(ensure_window_open(&only_start, t0() + Duration::days(365)).is_ok());

        let only_end = prize(None, Some(t0()));
        assert!(ensure_window_open(&only_end, t0() - Duration::days(365)).is_ok());
    }
}
