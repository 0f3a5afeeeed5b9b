//! Statistics sidebar of the expense tracker: the open/closed sidebar state,
//! and the two charts (expense categories pie, weekly spend line) rendered from
//! the `/statistics-data` and `/weekly-expense-data` endpoints.
//!
//! Charts are described as Chart.js-shaped [`chart::ChartConfig`] values and
//! handed to a [`backend::ChartBackend`], which owns the actual drawing surface.

pub mod backend;
pub mod chart;
pub mod error;
pub mod panel;
pub mod registry;
pub mod renderer;
pub mod sidebar;
pub mod source;

pub use backend::{
    CanvasId, ChartBackend, ChartHandle, JsonFileBackend, MemoryChartBackend, EXPENSE_CHART,
    WEEKLY_EXPENSE_CHART,
};
pub use chart::{pie_chart, weekly_line_chart, ChartConfig, CurrencyFormat};
pub use error::{DashboardError, Result};
pub use panel::StatisticsPanel;
pub use registry::ChartRegistry;
pub use renderer::{PipelineOutcome, RenderContext, RenderReport};
pub use sidebar::{ClickEvent, Sidebar, SidebarState};
pub use source::{HttpStatisticsSource, StatisticsSource};
