use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::prizes::handlers::list_prizes,
        features::prizes::handlers::list_all_prizes,
        features::prizes::handlers::get_prize,
        features::prizes::handlers::create_prize,
        features::prizes::handlers::update_prize,
        features::prizes::handlers::delete_prize,
        features::prizes::handlers::register_for_prize,
        features::prizes::handlers::get_leaderboard,
        features::activities::handlers::list_activities,
        features::activities::handlers::create_activity,
        features::activities::handlers::update_activity,
        features::submissions::handlers::create_submission,
        features::submissions::handlers::my_submissions,
        features::submissions::handlers::pending_submissions,
        features::submissions::handlers::similar_submissions,
        features::submissions::handlers::approve_submission,
        features::submissions::handlers::reject_submission,
        features::rankings::handlers::global_ranking,
        features::rankings::handlers::my_rank,
        features::stats::handlers::admin_stats,
    ),
    components(
        schemas(
            storage::dto::prize::CreatePrizeRequest,
            storage::dto::prize::UpdatePrizeRequest,
            storage::dto::prize::PrizeResponse,
            storage::dto::prize::PrizePhase,
            storage::dto::activity::CreateActivityRequest,
            storage::dto::activity::UpdateActivityRequest,
            storage::dto::activity::ActivityResponse,
            storage::dto::submission::CreateSubmissionRequest,
            storage::dto::submission::ApproveSubmissionRequest,
            storage::dto::submission::RejectSubmissionRequest,
            storage::dto::submission::SubmissionResponse,
            storage::dto::submission::PendingSubmissionEntry,
            storage::dto::submission::SimilarSubmissionEntry,
            storage::dto::submission::SimilarityAdvisory,
            storage::dto::leaderboard::LeaderboardResponse,
            storage::dto::leaderboard::StandingEntry,
            storage::dto::leaderboard::Outcome,
            storage::dto::ranking::GlobalRankingEntry,
            storage::dto::ranking::MyRankResponse,
            storage::dto::stats::AdminStats,
            storage::dto::common::PaginationMeta,
            storage::models::Prize,
            storage::models::PrizeRegistration,
            storage::models::Submission,
            storage::models::SubmissionStatus,
            storage::models::Activity,
            storage::models::PointRecord,
        )
    ),
    tags(
        (name = "prizes", description = "Prize competitions, registration and leaderboards"),
        (name = "activities", description = "Activity catalog"),
        (name = "submissions", description = "Activity submissions and review"),
        (name = "rankings", description = "Global points rankings"),
        (name = "stats", description = "Admin analytics"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Laurel Rewards API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.admin_api_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .nest("/api/prizes", features::prizes::routes::routes(api_keys.clone()))
        .nest(
            "/api/activities",
            features::activities::routes::routes(api_keys.clone()),
        )
        .nest(
            "/api/submissions",
            features::submissions::routes::routes(api_keys.clone()),
        )
        .nest("/api/rankings", features::rankings::routes::routes())
        .nest("/api/stats", features::stats::routes::routes(api_keys))
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
