use std::collections::HashMap;

use crate::backend::{CanvasId, ChartBackend, ChartHandle};
use crate::chart::ChartConfig;
use crate::error::Result;

/// Which chart is currently bound to each canvas.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: HashMap<CanvasId, ChartHandle>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, canvas: &CanvasId) -> Option<ChartHandle> {
        self.charts.get(canvas).copied()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Destroys the chart bound to `canvas`, if any, then creates the new one.
    /// When creation fails the canvas is left empty.
    pub fn replace<B>(
        &mut self,
        backend: &mut B,
        canvas: &CanvasId,
        config: &ChartConfig,
    ) -> Result<ChartHandle>
    where
        B: ChartBackend + ?Sized,
    {
        if let Some(previous) = self.charts.remove(canvas) {
            tracing::debug!(%canvas, handle = previous.id(), "destroying previous chart");
            backend.destroy(previous);
        }

        let handle = backend.create(canvas, config)?;
        self.charts.insert(canvas.clone(), handle);
        Ok(handle)
    }

    /// Destroys every bound chart.
    pub fn clear<B>(&mut self, backend: &mut B)
    where
        B: ChartBackend + ?Sized,
    {
        for (_, handle) in self.charts.drain() {
            backend.destroy(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryChartBackend, EXPENSE_CHART, WEEKLY_EXPENSE_CHART};
    use crate::chart::{pie_chart, weekly_line_chart};
    use models::Totals;

    #[test]
    fn test_replace_destroys_previous_chart() {
        let mut backend = MemoryChartBackend::dashboard();
        let mut registry = ChartRegistry::new();
        let canvas = CanvasId::from(EXPENSE_CHART);

        let first = registry
            .replace(&mut backend, &canvas, &pie_chart(Totals::new(), "₹"))
            .unwrap();
        let second = registry
            .replace(&mut backend, &canvas, &pie_chart(Totals::new(), "₹"))
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(registry.get(&canvas), Some(second));
        assert_eq!(backend.live_charts_on(&canvas), 1);
        assert_eq!(backend.destroyed(), 1);
    }

    #[test]
    fn test_canvases_are_independent() {
        let mut backend = MemoryChartBackend::dashboard();
        let mut registry = ChartRegistry::new();
        let pie = CanvasId::from(EXPENSE_CHART);
        let line = CanvasId::from(WEEKLY_EXPENSE_CHART);

        registry
            .replace(&mut backend, &pie, &pie_chart(Totals::new(), "₹"))
            .unwrap();
        registry
            .replace(&mut backend, &line, &weekly_line_chart(Totals::new(), "June", "₹"))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(backend.destroyed(), 0);

        registry.clear(&mut backend);
        assert!(registry.is_empty());
        assert_eq!(backend.live_charts_on(&pie), 0);
        assert_eq!(backend.live_charts_on(&line), 0);
    }

    #[test]
    fn test_failed_create_leaves_canvas_empty() {
        let mut backend = MemoryChartBackend::with_canvases([EXPENSE_CHART]);
        let mut registry = ChartRegistry::new();
        let missing = CanvasId::from("nowhere");

        assert!(registry
            .replace(&mut backend, &missing, &pie_chart(Totals::new(), "₹"))
            .is_err());
        assert_eq!(registry.get(&missing), None);
    }
}
