use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::repository::ExpenseRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ExpenseRepository>,
    /// Fixed "today" for the month-scoped endpoints; `None` follows the clock.
    pub pinned_date: Option<NaiveDate>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ExpenseRepository>) -> Self {
        Self {
            repo,
            pinned_date: None,
        }
    }

    pub fn with_pinned_date(mut self, date: Option<NaiveDate>) -> Self {
        self.pinned_date = date;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
