//! Database-level tests for the submission review flow: approval credits
//! points exactly once, rejection never touches them, and a failed
//! precondition rolls the whole transaction back.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use storage::dto::prize::{CreatePrizeRequest, UpdatePrizeRequest};
use storage::dto::submission::CreateSubmissionRequest;
use storage::error::StorageError;
use storage::models::SubmissionStatus;
use storage::repository::prize::PrizeRepository;
use storage::services::{registration, review};

async fn seed_user(pool: &PgPool, username: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO profiles (user_id, username) VALUES (gen_random_uuid(), $1) \
         RETURNING user_id",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_activity(pool: &PgPool, points: i32) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO activities (name, activity_type, points) \
         VALUES ('Conference workshop', 'workshop', $1) RETURNING activity_id",
    )
    .bind(points)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_prize(pool: &PgPool) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO prizes (name, points_required) \
         VALUES ('Quarterly grand prize', 100) RETURNING prize_id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn submit(pool: &PgPool, user_id: Uuid, activity_id: Uuid, prize_id: Option<Uuid>) -> Uuid {
    let req = CreateSubmissionRequest {
        activity_id,
        prize_id,
        proof_url: Some("https://example.com/proof".to_string()),
        content: None,
    };

    review::create_submission(pool, user_id, &req)
        .await
        .unwrap()
        .submission_id
}

async fn registration_points(pool: &PgPool, prize_id: Uuid, user_id: Uuid) -> i32 {
    sqlx::query_scalar(
        "SELECT points FROM prize_registrations WHERE prize_id = $1 AND user_id = $2",
    )
    .bind(prize_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn point_record_count(pool: &PgPool, user_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM point_records WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn submission_status(pool: &PgPool, submission_id: Uuid) -> SubmissionStatus {
    sqlx::query_scalar("SELECT status FROM submissions WHERE submission_id = $1")
        .bind(submission_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn approving_twice_credits_points_once(pool: PgPool) {
    let admin = seed_user(&pool, "review-admin").await;
    let user = seed_user(&pool, "participant").await;
    let activity = seed_activity(&pool, 40).await;
    let prize = seed_prize(&pool).await;

    registration::register(&pool, prize, user, Utc::now())
        .await
        .unwrap();
    let submission = submit(&pool, user, activity, Some(prize)).await;

    let approved = review::approve(&pool, submission, admin, Some(10), Utc::now())
        .await
        .unwrap();
    assert_eq!(approved.status, SubmissionStatus::Approved);
    assert_eq!(registration_points(&pool, prize, user).await, 50);
    assert_eq!(point_record_count(&pool, user).await, 1);

    let err = review::approve(&pool, submission, admin, Some(10), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotPending));

    // No double credit.
    assert_eq!(registration_points(&pool, prize, user).await, 50);
    assert_eq!(point_record_count(&pool, user).await, 1);
}

#[sqlx::test]
async fn rejecting_never_touches_points(pool: PgPool) {
    let admin = seed_user(&pool, "review-admin").await;
    let user = seed_user(&pool, "participant").await;
    let activity = seed_activity(&pool, 40).await;
    let prize = seed_prize(&pool).await;

    registration::register(&pool, prize, user, Utc::now())
        .await
        .unwrap();
    let submission = submit(&pool, user, activity, Some(prize)).await;

    let err = review::reject(&pool, submission, admin, "   ", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::MissingReason));
    assert_eq!(submission_status(&pool, submission).await, SubmissionStatus::Pending);

    let rejected = review::reject(&pool, submission, admin, "Broken proof link", Utc::now())
        .await
        .unwrap();
    assert_eq!(rejected.status, SubmissionStatus::Rejected);
    assert_eq!(rejected.admin_comment.as_deref(), Some("Broken proof link"));
    assert_eq!(registration_points(&pool, prize, user).await, 0);
    assert_eq!(point_record_count(&pool, user).await, 0);

    // A reviewed submission is terminal for approval as well.
    let err = review::approve(&pool, submission, admin, None, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotPending));
    assert_eq!(registration_points(&pool, prize, user).await, 0);
}

#[sqlx::test]
async fn approve_without_registration_rolls_back(pool: PgPool) {
    let admin = seed_user(&pool, "review-admin").await;
    let user = seed_user(&pool, "unregistered").await;
    let activity = seed_activity(&pool, 40).await;
    let prize = seed_prize(&pool).await;

    // Inserted directly: the submission service refuses this combination.
    let submission: Uuid = sqlx::query_scalar(
        "INSERT INTO submissions (user_id, activity_id, prize_id, proof_url) \
         VALUES ($1, $2, $3, 'https://example.com/proof') RETURNING submission_id",
    )
    .bind(user)
    .bind(activity)
    .bind(prize)
    .fetch_one(&pool)
    .await
    .unwrap();

    let err = review::approve(&pool, submission, admin, None, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotRegistered));

    // The status flip rolled back with the rest of the transaction.
    assert_eq!(submission_status(&pool, submission).await, SubmissionStatus::Pending);
    assert_eq!(point_record_count(&pool, user).await, 0);
}

#[sqlx::test]
async fn update_clears_nullable_fields_on_explicit_null(pool: PgPool) {
    let repo = PrizeRepository::new(&pool);
    let now = Utc::now();

    let created = repo
        .create(&CreatePrizeRequest {
            name: "Spring sprint".to_string(),
            description: String::new(),
            points_required: 100,
            active: true,
            image_url: Some("https://example.com/banner.png".to_string()),
            registration_start: Some(now),
            registration_end: Some(now + Duration::days(7)),
            deadline: Some(now + Duration::days(30)),
        })
        .await
        .unwrap();

    let req = UpdatePrizeRequest {
        name: None,
        description: None,
        points_required: None,
        active: None,
        image_url: Some(None),
        registration_start: None,
        registration_end: None,
        deadline: Some(None),
    };
    let updated = repo.update(created.prize_id, &created, &req).await.unwrap();

    assert_eq!(updated.image_url, None);
    assert_eq!(updated.deadline, None);
    // Absent fields keep their stored values.
    assert_eq!(updated.registration_start, created.registration_start);
    assert_eq!(updated.registration_end, created.registration_end);
    assert_eq!(updated.name, created.name);
}
