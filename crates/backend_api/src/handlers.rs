use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use expense_stats::{expense_by_type, expense_by_weekly_dates, expenses_in_month, expenses_to_csv};

use crate::{error::ApiError, state::AppState, Result};

/// GET /statistics-data
/// Current month totals per expense type
pub async fn statistics_data(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let today = state.today();
    let expenses = state.repo.fetch_all().await?;
    let in_month = expenses_in_month(&expenses, today);

    let totals = expense_by_type(in_month.iter().copied());
    tracing::debug!(%today, categories = totals.len(), "statistics data");

    Ok(Json(totals))
}

/// GET /weekly-expense-data
/// Current month totals bucketed by key day (1, Sundays, last day)
pub async fn weekly_expense_data(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let today = state.today();
    let expenses = state.repo.fetch_all().await?;
    let in_month = expenses_in_month(&expenses, today);

    let totals = expense_by_weekly_dates(in_month.iter().copied(), today);
    tracing::debug!(%today, buckets = totals.len(), "weekly expense data");

    Ok(Json(totals))
}

/// GET /expenses/export
/// All expenses as a CSV download
pub async fn export_expenses(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let expenses = state.repo.fetch_all().await?;
    let body = expenses_to_csv(&expenses).map_err(|e| ApiError::Export(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=\"expenses.csv\""),
            ),
        ],
        body,
    ))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "expense-statistics-api"
    }))
}
