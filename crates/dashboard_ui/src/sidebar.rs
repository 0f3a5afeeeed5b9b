//! Open/closed state of the statistics sidebar.
//!
//! The state lives here; the element's class list is derived from it after
//! every transition (`["open"]` while open, empty otherwise). The toggle
//! control is identified by its element id, passed in at construction.

pub const SIDEBAR_ID: &str = "statisticsSidebar";
pub const TOGGLE_ID: &str = "statsSidebarToggle";
pub const OPEN_CLASS: &str = "open";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarState {
    Open,
    #[default]
    Closed,
}

impl SidebarState {
    pub fn flipped(self) -> Self {
        match self {
            SidebarState::Open => SidebarState::Closed,
            SidebarState::Closed => SidebarState::Open,
        }
    }

    pub fn is_open(self) -> bool {
        self == SidebarState::Open
    }
}

/// A document click, described by the ids along the path from the clicked
/// element up to the root (target first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    path: Vec<String>,
}

impl ClickEvent {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    /// True when the target is `element_id` or one of its descendants.
    pub fn is_within(&self, element_id: &str) -> bool {
        self.path.iter().any(|id| id == element_id)
    }
}

#[derive(Debug, Clone)]
pub struct Sidebar {
    element_id: String,
    toggle_id: String,
    state: SidebarState,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new(SIDEBAR_ID, TOGGLE_ID)
    }
}

impl Sidebar {
    /// Starts closed.
    pub fn new(element_id: impl Into<String>, toggle_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            toggle_id: toggle_id.into(),
            state: SidebarState::Closed,
        }
    }

    pub fn toggle_id(&self) -> &str {
        &self.toggle_id
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn class_list(&self) -> &'static [&'static str] {
        match self.state {
            SidebarState::Open => &[OPEN_CLASS],
            SidebarState::Closed => &[],
        }
    }

    /// Handler of the toggle control.
    pub fn toggle(&mut self) -> SidebarState {
        self.state = self.state.flipped();
        tracing::trace!(sidebar = %self.element_id, state = ?self.state, "sidebar toggled");
        self.state
    }

    /// Document-level click handler. Closes an open sidebar when the click
    /// landed outside both the sidebar and its toggle control; returns whether
    /// it did.
    pub fn dismiss_on_click(&mut self, click: &ClickEvent) -> bool {
        let outside = !click.is_within(&self.element_id) && !click.is_within(&self.toggle_id);
        if self.state.is_open() && outside {
            self.state = SidebarState::Closed;
            tracing::trace!(sidebar = %self.element_id, target = ?click.target(), "sidebar dismissed");
            return true;
        }
        false
    }
}
