use sqlx::PgPool;
use storage::{
    dto::activity::{CreateActivityRequest, UpdateActivityRequest},
    error::Result,
    models::Activity,
    repository::activity::ActivityRepository,
};
use uuid::Uuid;

/// List active catalog activities
pub async fn list_activities(pool: &PgPool) -> Result<Vec<Activity>> {
    let repo = ActivityRepository::new(pool);
    repo.list_active().await
}

/// Create a new catalog activity
pub async fn create_activity(pool: &PgPool, request: &CreateActivityRequest) -> Result<Activity> {
    let repo = ActivityRepository::new(pool);
    repo.create(request).await
}

/// Update an activity
pub async fn update_activity(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateActivityRequest,
) -> Result<Activity> {
    let repo = ActivityRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, request).await
}
