
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// Expense records
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Expense {
	pub id: u64,
	pub name: String,
	#[serde(alias = "type", alias = "expenseType")]
	pub expense_type: String,
	pub amount: f64,
	pub date: NaiveDate,
	#[serde(alias = "creationDate")]
	pub creation_date: NaiveDateTime,
}

/// Ordered label -> amount mapping as exchanged with the statistics endpoints.
///
/// The JSON object key order is the display order, so it is kept as read.
/// A repeated key keeps its first position and takes the last value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Totals {
	entries: IndexMap<String, f64>,
}

/// Category label -> total amount, consumed by the pie chart.
pub type CategoryTotals = Totals;

/// Day-of-month label -> total amount, consumed by the weekly line chart.
pub type DailyTotals = Totals;

impl Totals {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or overwrites the amount for `label`.
	pub fn insert(&mut self, label: impl Into<String>, amount: f64) {
		self.entries.insert(label.into(), amount);
	}

	pub fn get(&self, label: &str) -> Option<f64> {
		self.entries.get(label).copied()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn labels(&self) -> Vec<String> {
		self.entries.keys().cloned().collect()
	}

	pub fn values(&self) -> Vec<f64> {
		self.entries.values().copied().collect()
	}

	/// Splits into the parallel label and value sequences, same order.
	pub fn into_parallel(self) -> (Vec<String>, Vec<f64>) {
		self.entries.into_iter().unzip()
	}
}

// Order is part of the value.
impl PartialEq for Totals {
	fn eq(&self, other: &Self) -> bool {
		self.entries.iter().eq(other.entries.iter())
	}
}

impl<K: Into<String>> FromIterator<(K, f64)> for Totals {
	fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(|(label, amount)| (label.into(), amount)).collect(),
		}
	}
}

// Settings models
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub data: DataSettings,
	pub dashboard: DashboardSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3000,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DataSettings {
	pub expenses_path: String,
	/// Fixes "today" for the month-scoped statistics; `None` uses the local clock.
	pub pinned_date: Option<NaiveDate>,
}

impl Default for DataSettings {
	fn default() -> Self {
		Self {
			expenses_path: "database/expenses.json".to_string(),
			pinned_date: None,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
	pub base_url: String,
	pub currency_symbol: String,
	pub output_dir: String,
}

impl Default for DashboardSettings {
	fn default() -> Self {
		Self {
			base_url: "http://127.0.0.1:3000".to_string(),
			currency_symbol: "₹".to_string(),
			output_dir: "charts".to_string(),
		}
	}
}
