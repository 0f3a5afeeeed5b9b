use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use expense_stats::{load_expenses, summarize_month};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "expense-summary", about = "Print the month statistics served to the dashboard.")]
struct Args {
    /// Path to the expenses JSON file; defaults to the configured data path
    #[arg(short, long)]
    expenses: Option<PathBuf>,

    /// Optional settings file (defaults to settings.json when present)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Any day of the month to summarize (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    month_of: Option<NaiveDate>,
}

fn main() -> Result<()> {
    logger::init("expense_stats=info")?;
    let args = Args::parse();

    let expenses_path = match args.expenses {
        Some(path) => path,
        None => {
            let settings = settings_loader::load_with_env(args.settings.as_ref())?;
            PathBuf::from(settings.data.expenses_path)
        }
    };
    let today = args.month_of.unwrap_or_else(|| Local::now().date_naive());

    let expenses = load_expenses(&expenses_path)?;
    tracing::info!(count = expenses.len(), path = %expenses_path.display(), "loaded expenses");

    let summary = summarize_month(&expenses, today);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
