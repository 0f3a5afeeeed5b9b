use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use dashboard_ui::{
    HttpStatisticsSource, JsonFileBackend, PipelineOutcome, RenderContext, EXPENSE_CHART,
    WEEKLY_EXPENSE_CHART,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "render-dashboard",
    about = "Fetch the statistics endpoints and write Chart.js configs for the sidebar charts."
)]
struct Args {
    /// Optional settings file (defaults to settings.json when present)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Expense server base URL; overrides settings
    #[arg(short, long)]
    base_url: Option<String>,

    /// Directory receiving <canvas>.json files; overrides settings
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Date whose month names the weekly chart (YYYY-MM-DD); defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logger::init("dashboard_ui=info")?;
    let args = Args::parse();

    let settings = settings_loader::load_with_env(args.settings.as_ref())?;
    let base_url = args.base_url.unwrap_or(settings.dashboard.base_url);
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| PathBuf::from(&settings.dashboard.output_dir));
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let source = HttpStatisticsSource::new(&base_url)?;
    let backend = JsonFileBackend::new(&out_dir, [EXPENSE_CHART, WEEKLY_EXPENSE_CHART]);
    let mut charts =
        RenderContext::new(backend).with_currency_symbol(settings.dashboard.currency_symbol);

    tracing::info!(%base_url, out_dir = %out_dir.display(), "rendering dashboard charts");
    let report = charts.render(&source, today).await;

    for (canvas, outcome) in [
        (EXPENSE_CHART, &report.expense_chart),
        (WEEKLY_EXPENSE_CHART, &report.weekly_chart),
    ] {
        match outcome {
            PipelineOutcome::Rendered(_) => {
                println!("{canvas}: written to {}", out_dir.join(format!("{canvas}.json")).display())
            }
            PipelineOutcome::MissingCanvas => println!("{canvas}: skipped"),
            PipelineOutcome::Failed(reason) => eprintln!("{canvas}: not rendered ({reason})"),
        }
    }

    if !report.any_rendered() {
        bail!("no chart could be rendered from {base_url}");
    }
    Ok(())
}
