use backend_api::{run_server, AppState, FileExpenseRepository};
use std::sync::Arc;
use std::{env, path::PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init("backend_api=debug,expense_stats=debug,tower_http=debug,axum=trace")?;

    // Settings file is optional; env vars override it (HOST, PORT, EXPENSES_PATH, PINNED_DATE)
    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let settings = settings_loader::load_with_env(settings_path.as_ref())?;

    let crate_root = env::current_dir()?;
    let workspace_root = find_workspace_root().unwrap_or_else(|| crate_root.clone());

    // Resolve against workspace root first (data lives at workspace level), then crate root.
    let expenses_path = resolve_with_fallback(
        &settings.data.expenses_path,
        &[&workspace_root, &crate_root],
    );

    println!("Expense Statistics Server");
    println!("=========================");
    println!("Workspace root: {}", workspace_root.display());
    println!("Expenses path (resolved): {}", expenses_path.display());
    if let Some(date) = settings.data.pinned_date {
        println!("Pinned date: {}", date);
    }
    println!("Listening on: {}:{}", settings.server.host, settings.server.port);
    println!();

    if !expenses_path.exists() {
        eprintln!("[WARN] expenses file not found at: {}", expenses_path.display());
        eprintln!("       Continuing; statistics will be empty until the file exists.");
    }

    let repo = Arc::new(FileExpenseRepository::new(expenses_path));
    let state = AppState::new(repo).with_pinned_date(settings.data.pinned_date);

    run_server(state, &settings.server.host, settings.server.port).await?;

    Ok(())
}

/// Find the Cargo workspace root by traversing up until a Cargo.toml that contains a [workspace] section.
fn find_workspace_root() -> Option<PathBuf> {
    let mut dir = env::current_dir().ok()?;
    for _ in 0..10 {
        let candidate = dir.join("Cargo.toml");
        if let Ok(content) = std::fs::read_to_string(&candidate) {
            if content.contains("[workspace]") {
                return Some(dir);
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Resolve a raw path string against a list of base directories, returning the first existing match, or the path under the first base.
fn resolve_with_fallback(raw: &str, bases: &[&PathBuf]) -> PathBuf {
    let input = PathBuf::from(raw);
    if input.is_absolute() {
        return input;
    }
    for base in bases {
        let candidate = base.join(&input);
        if candidate.exists() {
            return candidate;
        }
    }
    match bases.first() {
        Some(base) => base.join(input),
        None => input,
    }
}
