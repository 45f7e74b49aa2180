// ABOUTME: HTTP API layer for RecordHub providing REST endpoints and routing
// ABOUTME: Integration layer that wires storage, auth and mailer together

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use recordhub_auth::PasswordResetService;
use recordhub_mailer::EmailSender;
use recordhub_storage::DbState;

pub mod auth;
pub mod auth_handlers;
pub mod categories_handlers;
pub mod dashboard_handlers;
pub mod records_handlers;
pub mod response;
pub mod users_handlers;
pub mod validation;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub mailer: Arc<dyn EmailSender>,
    pub reset_service: Arc<PasswordResetService>,
    pub app_url: String,
}

impl AppState {
    pub fn new(db: DbState, mailer: Arc<dyn EmailSender>, app_url: String) -> Self {
        let reset_service = Arc::new(PasswordResetService::new(
            db.user_storage.clone(),
            db.reset_token_storage.clone(),
            mailer.clone(),
            app_url.clone(),
        ));

        Self {
            db,
            mailer,
            reset_service,
            app_url,
        }
    }
}

/// Creates the full application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest("/api/records", create_records_router())
        .nest("/api/categories", create_categories_router())
        .nest("/api/dashboard", create_dashboard_router())
        .nest("/api/users", create_users_router())
        .with_state(state)
}

/// Creates the auth API router
fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/logout", post(auth_handlers::logout))
        .route("/me", get(auth_handlers::me))
        .route("/forgot-password", post(auth_handlers::forgot_password))
        .route("/reset-password", post(auth_handlers::reset_password))
}

/// Creates the records API router
fn create_records_router() -> Router<AppState> {
    Router::new()
        .route("/", get(records_handlers::list_records))
        .route("/", post(records_handlers::create_record))
        .route("/{id}", get(records_handlers::get_record))
        .route("/{id}", patch(records_handlers::update_record))
        .route("/{id}", delete(records_handlers::delete_record))
}

/// Creates the categories API router
fn create_categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories_handlers::list_categories))
        .route("/", post(categories_handlers::create_category))
        .route("/{id}", get(categories_handlers::get_category))
        .route("/{id}", patch(categories_handlers::update_category))
        .route("/{id}", delete(categories_handlers::delete_category))
}

/// Creates the dashboard API router
fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/stats", get(dashboard_handlers::get_stats))
}

/// Creates the users API router
fn create_users_router() -> Router<AppState> {
    Router::new().route("/me", patch(users_handlers::update_me))
}
