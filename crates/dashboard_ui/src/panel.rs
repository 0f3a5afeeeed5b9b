use chrono::NaiveDate;

use crate::backend::ChartBackend;
use crate::renderer::{RenderContext, RenderReport};
use crate::sidebar::{ClickEvent, Sidebar, SidebarState};
use crate::source::StatisticsSource;

/// The statistics sidebar as a page sees it: the panel that slides open and
/// the charts drawn inside it.
pub struct StatisticsPanel<B: ChartBackend> {
    sidebar: Sidebar,
    charts: RenderContext<B>,
}

impl<B: ChartBackend> StatisticsPanel<B> {
    pub fn new(sidebar: Sidebar, charts: RenderContext<B>) -> Self {
        Self { sidebar, charts }
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn charts(&self) -> &RenderContext<B> {
        &self.charts
    }

    /// Page load: fetch and draw both charts.
    pub async fn on_load<S>(&mut self, source: &S, today: NaiveDate) -> RenderReport
    where
        S: StatisticsSource + ?Sized,
    {
        self.charts.render(source, today).await
    }

    pub fn toggle_sidebar(&mut self) -> SidebarState {
        self.sidebar.toggle()
    }

    /// Any click on the document. The toggle control flips the sidebar through
    /// its own handler; the document handler then only dismisses on clicks
    /// outside both the sidebar and the control.
    pub fn on_click(&mut self, click: &ClickEvent) -> SidebarState {
        if click.is_within(self.sidebar.toggle_id()) {
            self.sidebar.toggle();
        }
        self.sidebar.dismiss_on_click(click);
        self.sidebar.state()
    }
}
