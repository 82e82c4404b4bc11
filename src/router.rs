use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use campus_auth::Role;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::{Authenticator, require_auth};
use crate::middleware::ownership::ensure_school_access;
use crate::modules::auth::router::init_auth_router;
use crate::modules::classes::router::init_classes_router;
use crate::modules::schools::router::init_schools_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let any_user = Authenticator::new(state.jwt_config.clone(), &[]);
    let super_admin = Authenticator::new(state.jwt_config.clone(), &[Role::SuperAdmin]);
    let staff = Authenticator::new(state.jwt_config.clone(), &[Role::Admin, Role::SuperAdmin]);

    // Layers run bottom-up: the token gate before the tenant gate.
    let tenant = Router::new()
        .nest("/classes", init_classes_router())
        .nest("/subjects", init_subjects_router())
        .nest("/users", init_users_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ensure_school_access,
        ))
        .route_layer(middleware::from_fn_with_state(staff, require_auth));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router(any_user, super_admin.clone()))
                .nest(
                    "/schools",
                    init_schools_router()
                        .route_layer(middleware::from_fn_with_state(super_admin, require_auth)),
                )
                .nest("/schools/{school_id}", tenant),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-auth-token"),
        ])
        .allow_credentials(true)
}
