use async_trait::async_trait;
use models::{CategoryTotals, DailyTotals, Totals};
use reqwest::{Client, Url};

use crate::error::{DashboardError, Result};

pub const STATISTICS_ENDPOINT: &str = "/statistics-data";
pub const WEEKLY_EXPENSE_ENDPOINT: &str = "/weekly-expense-data";

/// Where the pre-aggregated chart data comes from.
#[async_trait]
pub trait StatisticsSource: Send + Sync {
    async fn category_totals(&self) -> Result<CategoryTotals>;

    async fn daily_totals(&self) -> Result<DailyTotals>;
}

/// Fetches both documents over HTTP from the expense server.
/// No timeout is configured: a request that never answers never renders.
#[derive(Debug, Clone)]
pub struct HttpStatisticsSource {
    http: Client,
    base_url: Url,
}

impl HttpStatisticsSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| DashboardError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DashboardError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let http = Client::builder().build().map_err(DashboardError::Client)?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DashboardError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    async fn get_totals(&self, path: &str) -> Result<Totals> {
        let url = self.endpoint(path)?;

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| DashboardError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| DashboardError::Request {
                url: url.to_string(),
                source,
            })?;

        let totals: Totals = serde_json::from_str(&body).map_err(|source| DashboardError::Decode {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(%url, entries = totals.len(), "fetched chart data");
        Ok(totals)
    }
}

#[async_trait]
impl StatisticsSource for HttpStatisticsSource {
    async fn category_totals(&self) -> Result<CategoryTotals> {
        self.get_totals(STATISTICS_ENDPOINT).await
    }

    async fn daily_totals(&self) -> Result<DailyTotals> {
        self.get_totals(WEEKLY_EXPENSE_ENDPOINT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use backend_api::{create_router, AppState, InMemoryExpenseRepository};
    use chrono::NaiveDate;
    use models::Expense;
    use std::net::SocketAddr;
    use std::sync::Arc;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn expense(id: u64, kind: &str, amount: f64, date: &str) -> Expense {
        let date: NaiveDate = date.parse().unwrap();
        Expense {
            id,
            name: format!("expense {id}"),
            expense_type: kind.to_string(),
            amount,
            date,
            creation_date: date.and_hms_opt(8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            HttpStatisticsSource::new("not a url"),
            Err(DashboardError::InvalidUrl { .. })
        ));
        assert!(HttpStatisticsSource::new("mailto:me@example.com").is_err());
    }

    #[test]
    fn test_endpoints_are_root_relative() {
        let source = HttpStatisticsSource::new("http://localhost:3000/app/").unwrap();
        assert_eq!(
            source.endpoint(STATISTICS_ENDPOINT).unwrap().as_str(),
            "http://localhost:3000/statistics-data"
        );
    }

    #[tokio::test]
    async fn test_fetches_from_expense_server() {
        let repo = InMemoryExpenseRepository::new(vec![
            expense(1, "Food", 120.5, "2025-06-03"),
            expense(2, "Transport", 40.0, "2025-06-09"),
        ]);
        let state = AppState::new(Arc::new(repo))
            .with_pinned_date(NaiveDate::from_ymd_opt(2025, 6, 10));
        let addr = serve(create_router(state)).await;

        let source = HttpStatisticsSource::new(&format!("http://{addr}")).unwrap();

        let categories = source.category_totals().await.unwrap();
        assert_eq!(categories.labels(), vec!["Food", "Transport"]);
        assert_eq!(categories.values(), vec![120.5, 40.0]);

        let daily = source.daily_totals().await.unwrap();
        assert_eq!(daily.labels(), vec!["1", "8", "15", "22", "29", "30"]);
        assert_eq!(daily.values(), vec![120.5, 40.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_non_object_body_is_a_decode_error() {
        let app = Router::new()
            .route(STATISTICS_ENDPOINT, get(|| async { "[1, 2, 3]" }))
            .route(WEEKLY_EXPENSE_ENDPOINT, get(|| async { "not json" }));
        let addr = serve(app).await;
        let source = HttpStatisticsSource::new(&format!("http://{addr}")).unwrap();

        assert!(matches!(
            source.category_totals().await,
            Err(DashboardError::Decode { .. })
        ));
        assert!(matches!(
            source.daily_totals().await,
            Err(DashboardError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let app = Router::new().route(
            STATISTICS_ENDPOINT,
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "{}") }),
        );
        let addr = serve(app).await;
        let source = HttpStatisticsSource::new(&format!("http://{addr}")).unwrap();

        match source.category_totals().await {
            Err(DashboardError::Status { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected status error, got {other:?}"),
        }
        // Unrouted endpoint
        assert!(matches!(
            source.daily_totals().await,
            Err(DashboardError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_request_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpStatisticsSource::new(&format!("http://{addr}")).unwrap();
        assert!(matches!(
            source.category_totals().await,
            Err(DashboardError::Request { .. })
        ));
    }
}
