//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{RoleEnricher, UserService};
use crate::domain::RoleServiceClient;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::ErrorBody;
use crate::interfaces::http::modules::{
    health::{self, HealthState},
    metrics::{self, MetricsState},
    request_id::request_id_middleware,
    roles::{self, RoleHandlerState},
    users::{self, UserHandlerState},
};

/// Everything the handlers need. Axum extracts the per-handler state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub user_service: Arc<UserService<UserRepository>>,
    pub enricher: Arc<RoleEnricher>,
    pub role_client: Arc<dyn RoleServiceClient>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    /// Wire services over a database connection and a role service client.
    pub fn new(db: DatabaseConnection, role_client: Arc<dyn RoleServiceClient>) -> Self {
        let repo = Arc::new(UserRepository::new(db.clone()));
        Self {
            user_service: Arc::new(UserService::new(repo)),
            enricher: Arc::new(RoleEnricher::new(role_client.clone())),
            role_client,
            db,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<AppState> for UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        UserHandlerState {
            user_service: Arc::clone(&s.user_service),
            enricher: Arc::clone(&s.enricher),
        }
    }
}

impl FromRef<AppState> for RoleHandlerState {
    fn from_ref(s: &AppState) -> Self {
        RoleHandlerState {
            role_client: Arc::clone(&s.role_client),
        }
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::liveness,
        health::health_check,
        // Roles
        roles::list_roles,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            ErrorBody,
            health::HealthResponse,
            health::ComponentHealth,
            users::UserDto,
            users::EnrichedUserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and health check endpoints"),
        (name = "Roles", description = "Role catalogue from the role service"),
        (name = "Users", description = "User CRUD; listings are enriched with roles"),
    ),
    info(
        title = "User Directory API",
        version = "1.0.0",
        description = "Users backed by a relational store, enriched with data from the role service",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(state: AppState, prometheus: Option<PrometheusHandle>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/", get(health::liveness))
        .route("/health", get(health::health_check))
        .route("/roles", get(roles::list_roles))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new().merge(swagger_routes).merge(api_routes);

    if let Some(handle) = prometheus {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(MetricsState { handle }),
        );
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
