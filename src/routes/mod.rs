use axum::{
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::department;
use crate::state::AppState;

pub mod health;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Department routes
        .route("/departments", post(department::save_department))
        .route("/departments", get(department::fetch_department_list))
        .route("/departments/:id", get(department::fetch_department_by_id))
        .route("/departments/:id", delete(department::delete_department_by_id))
        .route("/departments/:id", put(department::update_department))
        .route(
            "/departments/name/all/:name",
            get(department::fetch_departments_by_name),
        )
        .route(
            "/departments/name/one/:name",
            get(department::fetch_one_department_by_name),
        )
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for unmatched routes
pub async fn fallback() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": 404,
            "timestamp": Utc::now(),
            "errors": [{"field": "path", "message": "Not Found"}],
        })),
    )
}
