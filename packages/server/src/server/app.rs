//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::AuthService;
use crate::server::routes::{
    health_handler, login_handler, logout_handler, profile_handler, root_handler,
    verify_code_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth: Arc<AuthService>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, auth: Arc<AuthService>) -> Router {
    let app_state = AppState {
        db_pool: pool,
        auth,
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/login", post(login_handler))
        .route("/verify-code", post(verify_code_handler))
        .route("/profile", post(profile_handler))
        .route("/logout", post(logout_handler))
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
