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
        features::flights::handlers::create_flight,
        features::flights::handlers::update_flight,
        features::flights::handlers::update_flight_status,
        features::flights::handlers::recalculate_flight_status,
        features::flights::handlers::list_flights_by_competition,
        features::results::handlers::save_weigh_in,
        features::results::handlers::save_attempt,
        features::results::handlers::list_by_flight_and_group,
        features::results::handlers::list_by_athletes,
        features::nominations::handlers::list_by_competition,
    ),
    components(
        schemas(
            storage::dto::common::ApiEnvelope<storage::dto::flight::FlightResponse>,
            storage::dto::common::ApiEnvelope<storage::dto::result::ResultResponse>,
            storage::dto::common::ApiEnvelope<storage::models::Flight>,
            storage::dto::flight::CreateFlightRequest,
            storage::dto::flight::UpdateFlightRequest,
            storage::dto::flight::UpdateFlightStatusRequest,
            storage::dto::flight::GroupSpec,
            storage::dto::flight::GroupDetail,
            storage::dto::flight::FlightResponse,
            storage::dto::result::WeighInRequest,
            storage::dto::result::AttemptRequest,
            storage::dto::result::StartWeights,
            storage::dto::result::ResultsByAthletesRequest,
            storage::dto::result::ResultResponse,
            storage::models::Flight,
            storage::models::FlightStatus,
            storage::models::Group,
            storage::models::Nomination,
            storage::models::AttemptCard,
            storage::models::AttemptSlot,
            storage::models::AttemptStatus,
            storage::models::LiftType,
        )
    ),
    tags(
        (name = "flights", description = "Flight and group scheduling"),
        (name = "results", description = "Weigh-ins, attempts and scoring records"),
        (name = "nominations", description = "Competition entries consumed by the scheduler"),
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

    tracing::info!("Starting federation scoring API");

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

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/api/flights",
            features::flights::routes::routes(api_keys.clone()),
        )
        .nest(
            "/api/results",
            features::results::routes::routes(api_keys.clone()),
        )
        .nest("/api/nominations", features::nominations::routes::routes())
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
