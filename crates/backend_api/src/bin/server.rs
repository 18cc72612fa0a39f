use backend_api::{run_server, AppState, FileDataRepository};
use std::{env, path::PathBuf, sync::Arc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional settings path as the first argument, otherwise SETTINGS_PATH or ./settings.json
    let settings_path = env::args().nth(1).map(PathBuf::from);
    let settings = settings_loader::load_runtime_settings(settings_path.as_ref())?;

    if settings.invites.secret.trim().is_empty() {
        anyhow::bail!("No invite secret configured. Set INVITE_SECRET or invites.secret in settings.json");
    }

    println!("Debt Strategy API Server");
    println!("========================");
    println!("Data dir: {}", settings.data_dir.display());
    println!("Listening on: {}:{}", settings.server.host, settings.server.port);
    println!("Payoff month cap: {}", settings.payoff.max_months);
    println!("Invite validity: {} days", settings.invites.validity_days);
    println!();

    // Pre-flight checks
    if !settings.data_dir.exists() {
        eprintln!("[WARN] data directory not found at: {}", settings.data_dir.display());
        eprintln!("       Continuing; stored debts and households will 404 until files exist.");
    }

    let repo = Arc::new(FileDataRepository::new(&settings.data_dir));
    let state = AppState::from_settings(&settings, repo)?;

    // Start the server
    run_server(state, &settings.server.host, settings.server.port, &settings.logging.filter).await?;

    Ok(())
}
