use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// Create the main application router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Chart data consumed by the statistics sidebar
        .route("/statistics-data", get(handlers::statistics_data))
        .route("/weekly-expense-data", get(handlers::weekly_expense_data))
        .route("/expenses/export", get(handlers::export_expenses))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
