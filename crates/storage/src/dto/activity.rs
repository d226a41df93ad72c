use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a new catalog activity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateActivityRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "validate_activity_type"))]
    pub activity_type: String,

    #[validate(range(min = 1, max = 10000, message = "points must be between 1 and 10000"))]
    pub points: i32,

    #[serde(default = "default_active")]
    pub active: bool,
}

/// Request payload for updating an existing activity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_activity_type"))]
    pub activity_type: Option<String>,

    #[validate(range(min = 1, max = 10000))]
    pub points: Option<i32>,

    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityResponse {
    pub activity_id: Uuid,
    pub name: String,
    pub activity_type: String,
    pub points: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

fn validate_activity_type(activity_type: &str) -> Result<(), validator::ValidationError> {
    const VALID_TYPES: &[&str] = &[
        "linkedin_post",
        "hackathon",
        "networking_event",
        "workshop",
        "other",
    ];

    if VALID_TYPES.contains(&activity_type) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_activity_type"))
    }
}

impl From<crate::models::Activity> for ActivityResponse {
    fn from(activity: crate::models::Activity) -> Self {
        Self {
            activity_id: activity.activity_id,
            name: activity.name,
            activity_type: activity.activity_type,
            points: activity.points,
            active: activity.active,
            created_at: activity.created_at,
        }
    }
}
