use anyhow::{anyhow, Context, Result};
use models::Expense;

pub const CSV_HEADER: [&str; 6] = [
    "Id",
    "Name of Expense",
    "Type of expense",
    "Amount",
    "Date",
    "Creation Timestamp",
];

/// Renders expenses as CSV, one row per expense in the given order.
pub fn expenses_to_csv<'a, I>(expenses: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for e in expenses {
        writer.write_record([
            e.id.to_string(),
            e.name.clone(),
            e.expense_type.clone(),
            format!("{:.2}", e.amount),
            e.date.to_string(),
            e.creation_date.format("%Y-%m-%dT%H:%M:%S").to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Flushing CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}
