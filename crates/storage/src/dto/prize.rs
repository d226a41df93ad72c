use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Prize;

/// Request payload for creating a new prize competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePrizeRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,

    #[validate(range(min = 1, message = "points_required must be at least 1"))]
    pub points_required: i32,

    #[serde(default = "default_active")]
    pub active: bool,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    pub registration_start: Option<DateTime<Utc>>,

    pub registration_end: Option<DateTime<Utc>>,

    pub deadline: Option<DateTime<Utc>>,
}

/// Request payload for updating an existing prize competition.
///
/// Nullable columns take a double `Option`: a field left out of the JSON
/// keeps the stored value, an explicit `null` clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePrizeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(range(min = 1))]
    pub points_required: Option<i32>,

    pub active: Option<bool>,

    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub registration_start: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub registration_end: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub deadline: Option<Option<DateTime<Utc>>>,
}

/// Maps a present-but-null JSON field to `Some(None)`; `#[serde(default)]`
/// keeps an absent field at `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Display status of a prize competition, derived from `now` against its
/// three instants. Used for display only; the registration gate enforces
/// the window itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrizePhase {
    Ended,
    RegistrationNotStarted,
    RegistrationOpen,
    RegistrationClosed,
}

impl PrizePhase {
    pub fn derive(prize: &Prize, now: DateTime<Utc>) -> Self {
        if let Some(deadline) = prize.deadline
            && now > deadline
        {
            return Self::Ended;
        }

        // No window configured means the competition is always open.
        if prize.registration_start.is_none() && prize.registration_end.is_none() {
            return Self::RegistrationOpen;
        }

        if let Some(start) = prize.registration_start
            && now < start
        {
            return Self::RegistrationNotStarted;
        }

        if let Some(end) = prize.registration_end
            && now > end
        {
            return Self::RegistrationClosed;
        }

        Self::RegistrationOpen
    }
}

/// Response containing prize details plus the derived phase
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeResponse {
    pub prize_id: Uuid,
    pub name: String,
    pub description: String,
    pub points_required: i32,
    pub active: bool,
    pub image_url: Option<String>,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub phase: PrizePhase,
}

impl PrizeResponse {
    pub fn from_prize(prize: Prize, now: DateTime<Utc>) -> Self {
        let phase = PrizePhase::derive(&prize, now);
        Self {
            prize_id: prize.prize_id,
            name: prize.name,
            description: prize.description,
            points_required: prize.points_required,
            active: prize.active,
            image_url: prize.image_url,
            registration_start: prize.registration_start,
            registration_end: prize.registration_end,
            deadline: prize.deadline,
            created_at: prize.created_at,
            phase,
        }
    }
}

// Validation helpers
fn default_active() -> bool {
    true
}

impl CreatePrizeRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_windows(&self) -> Result<(), &'static str> {
        validate_windows(
            self.registration_start,
            self.registration_end,
            self.deadline,
        )
    }
}

pub fn validate_windows(
    registration_start: Option<DateTime<Utc>>,
    registration_end: Option<DateTime<Utc>>,
    deadline: Option<DateTime<Utc>>,
) -> Result<(), &'static str> {
    if let (Some(start), Some(end)) = (registration_start, registration_end)
        && start >= end
    {
        return Err("registration_start must be before registration_end");
    }

    if let (Some(end), Some(deadline)) = (registration_end, deadline)
        && end >= deadline
    {
        return Err("registration_end must be before the deadline");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn prize_with_windows(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        deadline: Option<DateTime<Utc>>,
    ) -> Prize {
        Prize {
            prize_id: Uuid::new_v4(),
            name: "Spring Hackathon Grand Prize".to_string(),
            description: String::new(),
            points_required: 100,
            active: true,
            image_url: None,
            registration_start: start,
            registration_end: end,
            deadline,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn no_window_is_always_open() {
        let prize = prize_with_windows(None, None, None);
        assert_eq!(
            PrizePhase::derive(&prize, t0()),
            PrizePhase::RegistrationOpen
        );
    }

    #[test]
    fn before_start_is_not_started() {
        let prize = prize_with_windows(Some(t0() + Duration::days(1)), None, None);
        assert_eq!(
            PrizePhase::derive(&prize, t0()),
            PrizePhase::RegistrationNotStarted
        );
    }

    #[test]
    fn after_end_is_closed() {
        let prize = prize_with_windows(
            Some(t0() - Duration::days(7)),
            Some(t0() - Duration::days(1)),
            None,
        );
        assert_eq!(
            PrizePhase::derive(&prize, t0()),
            PrizePhase::RegistrationClosed
        );
    }

    #[test]
    fn inside_window_is_open() {
        let prize = prize_with_windows(
            Some(t0() - Duration::days(1)),
            Some(t0() + Duration::days(6)),
            Some(t0() + Duration::days(29)),
        );
        assert_eq!(
            PrizePhase::derive(&prize, t0()),
            PrizePhase::RegistrationOpen
        );
    }

    #[test]
    fn past_deadline_wins_over_everything() {
        let prize = prize_with_windows(
            Some(t0() + Duration::days(1)),
            Some(t0() + Duration::days(7)),
            Some(t0() - Duration::hours(1)),
        );
        assert_eq!(PrizePhase::derive(&prize, t0()), PrizePhase::Ended);
    }

    #[test]
    fn update_request_tells_absent_from_null() {
        let keep: UpdatePrizeRequest =
            serde_json::from_value(serde_json::json!({"name": "Renamed"})).unwrap();
        assert_eq!(keep.deadline, None);
        assert_eq!(keep.image_url, None);

        let clear: UpdatePrizeRequest =
            serde_json::from_value(serde_json::json!({"deadline": null, "image_url": null}))
                .unwrap();
        assert_eq!(clear.deadline, Some(None));
        assert_eq!(clear.image_url, Some(None));

        let set: UpdatePrizeRequest =
            serde_json::from_value(serde_json::json!({"deadline": "2024-06-01T00:00:00Z"}))
                .unwrap();
        assert_eq!(
            set.deadline,
            Some(Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))
        );
    }

    #[test]
    fn window_validation_rejects_inverted_ranges() {
        let start = t0();
        let end = t0() + Duration::days(7);
        let deadline = t0() + Duration::days(30);

        assert!(validate_windows(Some(start), Some(end), Some(deadline)).is_ok());
        assert!(validate_windows(Some(end), Some(start), None).is_err());
        assert!(validate_windows(None, Some(deadline), Some(end)).is_err());
        assert!(validate_windows(Some(start), Some(start), None).is_err());
    }
}
