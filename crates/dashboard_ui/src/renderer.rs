use chrono::NaiveDate;

use crate::backend::{CanvasId, ChartBackend, ChartHandle, EXPENSE_CHART, WEEKLY_EXPENSE_CHART};
use crate::chart::{month_name, pie_chart, weekly_line_chart, ChartConfig, DEFAULT_CURRENCY_SYMBOL};
use crate::error::Result;
use crate::registry::ChartRegistry;
use crate::source::StatisticsSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Rendered(ChartHandle),
    /// The canvas is not on the page; nothing was fetched.
    MissingCanvas,
    /// Fetching, decoding or drawing failed; the canvas stays unrendered.
    Failed(String),
}

impl PipelineOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, PipelineOutcome::Rendered(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub expense_chart: PipelineOutcome,
    pub weekly_chart: PipelineOutcome,
}

impl RenderReport {
    pub fn any_rendered(&self) -> bool {
        self.expense_chart.is_rendered() || self.weekly_chart.is_rendered()
    }
}

/// Owns the chart backend and the per-canvas registry, and runs the two chart
/// pipelines against a [`StatisticsSource`].
pub struct RenderContext<B: ChartBackend> {
    backend: B,
    registry: ChartRegistry,
    currency_symbol: String,
    expense_canvas: CanvasId,
    weekly_canvas: CanvasId,
}

impl<B: ChartBackend> RenderContext<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            registry: ChartRegistry::new(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            expense_canvas: CanvasId::from(EXPENSE_CHART),
            weekly_canvas: CanvasId::from(WEEKLY_EXPENSE_CHART),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn registry(&self) -> &ChartRegistry {
        &self.registry
    }

    /// Runs both pipelines. The two fetches are in flight at the same time and
    /// neither outcome affects the other. `today` picks the month named in the
    /// line chart title.
    pub async fn render<S>(&mut self, source: &S, today: NaiveDate) -> RenderReport
    where
        S: StatisticsSource + ?Sized,
    {
        let want_pie = self.canvas_present(&self.expense_canvas);
        let want_line = self.canvas_present(&self.weekly_canvas);

        let (categories, daily) = tokio::join!(
            async {
                if want_pie {
                    Some(source.category_totals().await)
                } else {
                    None
                }
            },
            async {
                if want_line {
                    Some(source.daily_totals().await)
                } else {
                    None
                }
            }
        );

        let symbol = self.currency_symbol.clone();
        let month = month_name(today);

        let expense_chart = match categories {
            None => PipelineOutcome::MissingCanvas,
            Some(result) => {
                let canvas = self.expense_canvas.clone();
                self.draw(&canvas, result.map(|totals| {
                    tracing::debug!(?totals, "fetched category totals");
                    pie_chart(totals, &symbol)
                }))
            }
        };

        let weekly_chart = match daily {
            None => PipelineOutcome::MissingCanvas,
            Some(result) => {
                let canvas = self.weekly_canvas.clone();
                self.draw(&canvas, result.map(|totals| {
                    tracing::debug!(?totals, "fetched weekly totals");
                    weekly_line_chart(totals, &month, &symbol)
                }))
            }
        };

        RenderReport {
            expense_chart,
            weekly_chart,
        }
    }

    /// Destroys every chart this context has drawn.
    pub fn clear(&mut self) {
        self.registry.clear(&mut self.backend);
    }

    fn canvas_present(&self, canvas: &CanvasId) -> bool {
        let present = self.backend.has_canvas(canvas);
        if !present {
            tracing::debug!(%canvas, "canvas not on page, skipping chart");
        }
        present
    }

    fn draw(&mut self, canvas: &CanvasId, config: Result<ChartConfig>) -> PipelineOutcome {
        let drawn = config.and_then(|config| self.registry.replace(&mut self.backend, canvas, &config));
        match drawn {
            Ok(handle) => PipelineOutcome::Rendered(handle),
            Err(e) => {
                tracing::error!(%canvas, error = %e, "Chart loading error");
                PipelineOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::backend::MemoryChartBackend;
    use crate::error::DashboardError;
    use async_trait::async_trait;
    use models::{CategoryTotals, DailyTotals};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Barrier;

    /// Serves fixed documents; `None` behaves like a failed request.
    pub(crate) struct FixedSource {
        pub categories: Option<CategoryTotals>,
        pub daily: Option<DailyTotals>,
        pub calls: AtomicUsize,
    }

    impl FixedSource {
        pub(crate) fn new(categories: Option<CategoryTotals>, daily: Option<DailyTotals>) -> Self {
            Self {
                categories,
                daily,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn sample() -> Self {
            Self::new(
                Some(serde_json::from_value(json!({"Food": 120.5, "Transport": 40})).unwrap()),
                Some(serde_json::from_value(json!({"1": 10, "7": 25.3, "14": 0})).unwrap()),
            )
        }

        fn answer(&self, doc: &Option<models::Totals>, url: &str) -> Result<models::Totals> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            doc.clone().ok_or_else(|| DashboardError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    #[async_trait]
    impl StatisticsSource for FixedSource {
        async fn category_totals(&self) -> Result<CategoryTotals> {
            self.answer(&self.categories, "/statistics-data")
        }

        async fn daily_totals(&self) -> Result<DailyTotals> {
            self.answer(&self.daily, "/weekly-expense-data")
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    #[tokio::test]
    async fn test_renders_both_charts() {
        let mut ctx = RenderContext::new(MemoryChartBackend::dashboard());
        let report = ctx.render(&FixedSource::sample(), today()).await;

        assert!(report.expense_chart.is_rendered());
        assert!(report.weekly_chart.is_rendered());

        let pie = ctx.backend().chart_on(&EXPENSE_CHART.into()).unwrap();
        assert_eq!(pie.labels(), ["Food", "Transport"]);
        assert_eq!(pie.values(), [120.5, 40.0]);
        assert_eq!(pie.tooltip_label(0).as_deref(), Some("Food: ₹120.50"));

        let line = ctx.backend().chart_on(&WEEKLY_EXPENSE_CHART.into()).unwrap();
        assert_eq!(line.labels(), ["1", "7", "14"]);
        assert_eq!(line.values(), [10.0, 25.3, 0.0]);
        assert_eq!(line.title(), Some("Expenses in March"));
    }

    #[tokio::test]
    async fn test_rerender_replaces_instead_of_stacking() {
        let mut ctx = RenderContext::new(MemoryChartBackend::dashboard());
        let source = FixedSource::sample();

        let first = ctx.render(&source, today()).await;
        let second = ctx.render(&source, today()).await;
        assert_ne!(first, second);

        let backend = ctx.backend();
        assert_eq!(backend.live_charts_on(&EXPENSE_CHART.into()), 1);
        assert_eq!(backend.live_charts_on(&WEEKLY_EXPENSE_CHART.into()), 1);
        assert_eq!(backend.created(), 4);
        assert_eq!(backend.destroyed(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_affect_other_chart() {
        let mut ctx = RenderContext::new(MemoryChartBackend::dashboard());
        let source = FixedSource::new(
            None,
            Some(serde_json::from_value(json!({"1": 5})).unwrap()),
        );

        let report = ctx.render(&source, today()).await;

        assert!(matches!(report.expense_chart, PipelineOutcome::Failed(ref msg) if msg.contains("503")));
        assert!(report.weekly_chart.is_rendered());
        assert_eq!(ctx.backend().live_charts_on(&EXPENSE_CHART.into()), 0);
        assert!(ctx.registry().get(&EXPENSE_CHART.into()).is_none());
    }

    #[tokio::test]
    async fn test_missing_canvas_skips_fetch() {
        let mut ctx = RenderContext::new(MemoryChartBackend::with_canvases([WEEKLY_EXPENSE_CHART]));
        let source = FixedSource::sample();

        let report = ctx.render(&source, today()).await;

        assert_eq!(report.expense_chart, PipelineOutcome::MissingCanvas);
        assert!(report.weekly_chart.is_rendered());
        assert!(report.any_rendered());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_canvas_means_nothing_rendered() {
        let mut ctx = RenderContext::new(MemoryChartBackend::default());
        let report = ctx.render(&FixedSource::sample(), today()).await;

        assert_eq!(report.expense_chart, PipelineOutcome::MissingCanvas);
        assert_eq!(report.weekly_chart, PipelineOutcome::MissingCanvas);
        assert!(!report.any_rendered());
    }

    /// Each request only answers once the other one has also been sent.
    struct BarrierSource {
        barrier: Barrier,
        inner: FixedSource,
    }

    #[async_trait]
    impl StatisticsSource for BarrierSource {
        async fn category_totals(&self) -> Result<CategoryTotals> {
            self.barrier.wait().await;
            self.inner.category_totals().await
        }

        async fn daily_totals(&self) -> Result<DailyTotals> {
            self.barrier.wait().await;
            self.inner.daily_totals().await
        }
    }

    #[tokio::test]
    async fn test_both_fetches_are_in_flight_together() {
        let mut ctx = RenderContext::new(MemoryChartBackend::dashboard());
        let source = BarrierSource {
            barrier: Barrier::new(2),
            inner: FixedSource::sample(),
        };

        let report = tokio::time::timeout(Duration::from_secs(5), ctx.render(&source, today()))
            .await
            .expect("fetches ran one after the other");

        assert!(report.expense_chart.is_rendered());
        assert!(report.weekly_chart.is_rendered());
    }

    #[tokio::test]
    async fn test_failed_rerender_leaves_canvas_unrendered() {
        let mut ctx = RenderContext::new(MemoryChartBackend::dashboard());
        ctx.render(&FixedSource::sample(), today()).await;

        let broken = FixedSource::new(None, None);
        let report = ctx.render(&broken, today()).await;

        assert!(!report.expense_chart.is_rendered());
        assert!(!report.weekly_chart.is_rendered());
        assert!(!report.any_rendered());
        // Earlier charts stay until a replacement is actually drawn.
        assert_eq!(ctx.backend().live_charts_on(&EXPENSE_CHART.into()), 1);
    }

    #[tokio::test]
    async fn test_currency_symbol_is_configurable() {
        let mut ctx = RenderContext::new(MemoryChartBackend::dashboard()).with_currency_symbol("€");
        ctx.render(&FixedSource::sample(), today()).await;

        let pie = ctx.backend().chart_on(&EXPENSE_CHART.into()).unwrap();
        assert_eq!(pie.tooltip_label(1).as_deref(), Some("Transport: €40.00"));

        ctx.clear();
        assert!(ctx.registry().is_empty());
        assert_eq!(ctx.backend().live_charts_on(&EXPENSE_CHART.into()), 0);
    }
}
