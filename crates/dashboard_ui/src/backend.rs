use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::ChartConfig;
use crate::error::{DashboardError, Result};

pub const EXPENSE_CHART: &str = "expenseChart";
pub const WEEKLY_EXPENSE_CHART: &str = "weeklyExpenseChart";

/// Id of a drawing surface on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanvasId(String);

impl CanvasId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanvasId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to one live chart, issued by the backend that drew it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartHandle(u64);

impl ChartHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// The charting library seam. A chart must be destroyed before another one is
/// bound to the same canvas; [`crate::ChartRegistry`] takes care of that.
pub trait ChartBackend {
    fn has_canvas(&self, canvas: &CanvasId) -> bool;

    fn create(&mut self, canvas: &CanvasId, config: &ChartConfig) -> Result<ChartHandle>;

    fn destroy(&mut self, handle: ChartHandle);
}

/// Keeps live charts in memory. Counts creations and destructions so callers
/// can check that no canvas ever holds two charts.
#[derive(Debug, Default)]
pub struct MemoryChartBackend {
    canvases: BTreeSet<CanvasId>,
    live: BTreeMap<ChartHandle, (CanvasId, ChartConfig)>,
    next_id: u64,
    created: usize,
    destroyed: usize,
}

impl MemoryChartBackend {
    pub fn with_canvases<I, C>(canvases: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CanvasId>,
    {
        Self {
            canvases: canvases.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Both dashboard canvases present.
    pub fn dashboard() -> Self {
        Self::with_canvases([EXPENSE_CHART, WEEKLY_EXPENSE_CHART])
    }

    pub fn live_charts_on(&self, canvas: &CanvasId) -> usize {
        self.live.values().filter(|(c, _)| c == canvas).count()
    }

    pub fn chart_on(&self, canvas: &CanvasId) -> Option<&ChartConfig> {
        self.live
            .values()
            .find(|(c, _)| c == canvas)
            .map(|(_, config)| config)
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed
    }
}

impl ChartBackend for MemoryChartBackend {
    fn has_canvas(&self, canvas: &CanvasId) -> bool {
        self.canvases.contains(canvas)
    }

    fn create(&mut self, canvas: &CanvasId, config: &ChartConfig) -> Result<ChartHandle> {
        if !self.has_canvas(canvas) {
            return Err(DashboardError::Backend(format!("no canvas '{canvas}'")));
        }
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.live.insert(handle, (canvas.clone(), config.clone()));
        self.created += 1;
        Ok(handle)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}

/// Writes each chart's configuration to `<out_dir>/<canvas>.json`, ready to be
/// passed to `new Chart(...)` by a page. Destroying a chart removes its file.
#[derive(Debug)]
pub struct JsonFileBackend {
    out_dir: PathBuf,
    canvases: BTreeSet<CanvasId>,
    files: BTreeMap<ChartHandle, PathBuf>,
    next_id: u64,
}

impl JsonFileBackend {
    pub fn new<P, I, C>(out_dir: P, canvases: I) -> Self
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = C>,
        C: Into<CanvasId>,
    {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            canvases: canvases.into_iter().map(Into::into).collect(),
            files: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn path_for(&self, canvas: &CanvasId) -> PathBuf {
        self.out_dir.join(format!("{canvas}.json"))
    }
}

impl ChartBackend for JsonFileBackend {
    fn has_canvas(&self, canvas: &CanvasId) -> bool {
        self.canvases.contains(canvas)
    }

    fn create(&mut self, canvas: &CanvasId, config: &ChartConfig) -> Result<ChartHandle> {
        if !self.has_canvas(canvas) {
            return Err(DashboardError::Backend(format!("no canvas '{canvas}'")));
        }
        fs::create_dir_all(&self.out_dir)?;

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| DashboardError::Backend(format!("serializing chart config: {e}")))?;
        let path = self.path_for(canvas);
        fs::write(&path, json)?;
        tracing::info!(%canvas, path = %path.display(), "chart config written");

        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.files.insert(handle, path);
        Ok(handle)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if let Some(path) = self.files.remove(&handle) {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not remove chart config");
            }
        }
    }
}
