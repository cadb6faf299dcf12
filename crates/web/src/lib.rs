pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

use std::time::Duration;

use axum::Router;
use scrimhub_storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use features::{dashboard, events, health, registrations, scrimmages};
use middleware::auth::JwtKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        scrimmages::handlers::list_scrimmages,
        scrimmages::handlers::get_scrimmage,
        scrimmages::handlers::create_scrimmage,
        scrimmages::handlers::update_scrimmage,
        scrimmages::handlers::delete_scrimmage,
        registrations::handlers::get_capacity,
        registrations::handlers::list_registrations,
        registrations::handlers::sign_up,
        registrations::handlers::my_registration,
        registrations::handlers::approve_registration,
        registrations::handlers::reject_registration,
        registrations::handlers::withdraw_registration,
        registrations::handlers::delete_registration,
        events::handlers::list_events,
        events::handlers::next_event,
        events::handlers::get_event,
        events::handlers::create_event,
        events::handlers::update_event,
        events::handlers::delete_event,
        dashboard::handlers::get_dashboard,
        health::handlers::health,
    ),
    components(
        schemas(
            scrimhub_storage::dto::scrimmage::CreateScrimmageRequest,
            scrimhub_storage::dto::scrimmage::UpdateScrimmageRequest,
            scrimhub_storage::dto::scrimmage::ScrimmageResponse,
            scrimhub_storage::dto::scrimmage::ScrimmageDetailResponse,
            scrimhub_storage::dto::scrimmage::ScrimmageListResponse,
            scrimhub_storage::dto::event::CreateEventRequest,
            scrimhub_storage::dto::event::UpdateEventRequest,
            scrimhub_storage::dto::event::EventResponse,
            scrimhub_storage::dto::event::EventListResponse,
            scrimhub_storage::dto::registration::CreateRegistrationRequest,
            scrimhub_storage::dto::registration::RegistrationResponse,
            scrimhub_storage::dto::dashboard::DashboardResponse,
            scrimhub_storage::dto::common::PaginationMeta,
            scrimhub_storage::services::capacity::CapacitySummary,
            scrimhub_storage::models::EventType,
            scrimhub_storage::models::RegistrationStatus,
            error::ErrorResponse,
            health::handlers::HealthResponse,
        )
    ),
    tags(
        (name = "scrimmages", description = "Scrimmage listings"),
        (name = "registrations", description = "Team registrations and the approval workflow"),
        (name = "events", description = "STEM event listings"),
        (name = "dashboard", description = "The caller's own scrimmages, events and registrations"),
        (name = "health", description = "Liveness probe"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

/// Assemble the HTTP application on top of an opened store.
pub fn app(db: Database, jwt: JwtKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .nest("/api/scrimmages", scrimmages::routes::routes(jwt.clone()))
        .nest("/api/registrations", registrations::routes::routes(jwt.clone()))
        .nest("/api/events", events::routes::routes(jwt.clone()))
        .nest("/api/dashboard", dashboard::routes::routes(jwt))
        .merge(health::routes::routes())
        .with_state(db);

    api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
