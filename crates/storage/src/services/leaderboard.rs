use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::leaderboard::{LeaderboardResponse, Outcome, StandingEntry, StandingRow};
use crate::dto::prize::PrizePhase;
use crate::error::{Result, StorageError};
use crate::models::Prize;
use crate::repository::prize::PrizeRepository;
use crate::repository::registration::RegistrationRepository;

/// Leaderboard for one prize competition. Only visible to participants:
/// a viewer without a registration gets NotRegistered and no data.
pub async fn standings(
    pool: &PgPool,
    prize_id: Uuid,
    viewer: Uuid,
    now: DateTime<Utc>,
) -> Result<LeaderboardResponse> {
    let prize = PrizeRepository::new(pool).find_by_id(prize_id).await?;

    let registrations = RegistrationRepository::new(pool);
    if registrations.find(prize_id, viewer).await?.is_none() {
        return Err(StorageError::NotRegistered);
    }

    let rows = registrations.standings_for_prize(prize_id).await?;
    let entries = build_standings(&prize, rows, now);
    let phase = PrizePhase::derive(&prize, now);

    Ok(LeaderboardResponse {
        prize_id: prize.prize_id,
        prize_name: prize.name,
        points_required: prize.points_required,
        phase,
        standings: entries,
    })
}

/// Total ordering of participants: points descending, earliest registration
/// breaking ties, distinct sequential positions (no shared ranks).
///
/// Outcome labels are only attached once the deadline has passed; before
/// that the entry carries progress percent alone.
pub fn build_standings(
    prize: &Prize,
    mut rows: Vec<StandingRow>,
    now: DateTime<Utc>,
) -> Vec<StandingEntry> {
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(a.registered_at.cmp(&b.registered_at))
            .then(a.user_id.cmp(&b.user_id))
    });

    let ended = prize.deadline.is_some_and(|d| now > d);

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let outcome = ended.then(|| {
                if row.points >= prize.points_required {
                    Outcome::Winner
                } else {
                    Outcome::DidNotQualify
                }
            });

            StandingEntry {
                position: (i + 1) as u32,
                user_id: row.user_id,
                username: row.username,
                points: row.points,
                percent: progress_percent(row.points, prize.points_required),
                outcome,
            }
        })
        .collect()
}

/// Progress toward the points threshold, rounded, capped at 100.
pub fn progress_percent(points: i32, points_required: i32) -> i32 {
    let required = points_required.max(1);
    let percent = (points.max(0) as f64 / required as f64 * 100.0).round() as i32;
    percent.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn prize(points_required: i32, deadline: Option<DateTime<Utc>>) -> Prize {
        Prize {
            prize_id: Uuid::new_v4(),
            name: "Hackathon Hero".to_string(),
            description: String::new(),
            points_required,
            active: true,
            image_url: None,
            registration_start: Some(t0()),
            registration_end: Some(t0() + Duration::days(7)),
            deadline,
            created_at: t0(),
        }
    }

    fn row(username: &str, points: i32, registered_offset_hours: i64) -> StandingRow {
        StandingRow {
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            points,
            registered_at: t0() + Duration::hours(registered_offset_hours),
        }
    }

    #[test]
    fn orders_by_points_descending() {
        let p = prize(100, None);
        let rows = vec![row("low", 10, 0), row("high", 90, 1), row("mid", 50, 2)];

        let standings = build_standings(&p, rows, t0() + Duration::days(1));

        let names: Vec<_> = standings.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        let positions: Vec<_> = standings.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn ties_get_distinct_positions_by_registration_time() {
        let p = prize(100, None);
        let rows = vec![row("later", 50, 5), row("earlier", 50, 1)];

        let standings = build_standings(&p, rows, t0() + Duration::days(1));

        assert_eq!(standings[0].username, "earlier");
        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[1].username, "later");
        assert_eq!(standings[1].position, 2);
    }

    #[test]
    fn rerunning_yields_identical_ordering() {
        let p = prize(100, None);
        let rows = vec![
            row("a", 50, 3),
            row("b", 50, 3),
            row("c", 70, 1),
            row("d", 50, 2),
        ];

        let first = build_standings(&p, rows.clone(), t0() + Duration::days(1));
        let second = build_standings(&p, rows, t0() + Duration::days(1));

        let ids: Vec<_> = first.iter().map(|e| e.user_id).collect();
        let ids_again: Vec<_> = second.iter().map(|e| e.user_id).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn percent_is_rounded_and_capped() {
        assert_eq!(progress_percent(0, 100), 0);
        assert_eq!(progress_percent(60, 100), 60);
        assert_eq!(progress_percent(33, 90), 37);
        assert_eq!(progress_percent(110, 100), 100);
    }

    #[test]
    fn no_outcome_before_the_deadline() {
        let p = prize(100, Some(t0() + Duration::days(30)));
        let rows = vec![row("ahead", 150, 0), row("behind", 10, 1)];

        let standings = build_standings(&p, rows, t0() + Duration::days(10));

        assert!(standings.iter().all(|e| e.outcome.is_none()));
    }

    #[test]
    fn outcomes_after_the_deadline() {
        let p = prize(100, Some(t0() + Duration::days(30)));
        let rows = vec![row("champion", 110, 0), row("close", 99, 1)];

        let standings = build_standings(&p, rows, t0() + Duration::days(31));

        assert_eq!(standings[0].outcome, Some(Outcome::Winner));
        assert_eq!(standings[1].outcome, Some(Outcome::DidNotQualify));
    }

    #[test]
    fn exactly_at_threshold_wins() {
        let p = prize(100, Some(t0() + Duration::days(30)));
        let rows = vec![row("exact", 100, 0)];

        let standings = build_standings(&p, rows, t0() + Duration::days(31));

        assert_eq!(standings[0].outcome, Some(Outcome::Winner));
    }

    // Prize{points_required=100, window T0..T0+7d, deadline T0+30d}:
    // 60 points shows 60% progress, a further 50 points reaches 110 and
    // wins once the deadline passes.
    #[test]
    fn full_competition_scenario() {
        let p = prize(100, Some(t0() + Duration::days(30)));

        let mid = build_standings(&p, vec![row("runner", 60, 24)], t0() + Duration::days(10));
        assert_eq!(mid[0].percent, 60);
        assert!(mid[0].outcome.is_none());

        let done = build_standings(&p, vec![row("runner", 110, 24)], t0() + Duration::days(31));
        assert_eq!(done[0].percent, 100);
        assert_eq!(done[0].outcome, Some(Outcome::Winner));
    }
}
