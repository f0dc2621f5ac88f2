use std::sync::Arc;

use clap::Parser;

use triviaterm::cli::Cli;
use triviaterm::config;
use triviaterm::logging;
use triviaterm::model::CATEGORIES;
use triviaterm::provider::HttpProvider;
use triviaterm::state::SessionState;
use triviaterm::{timer, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    if cli.list_categories {
        for (id, name) in CATEGORIES {
            println!("{:>3}  {}", id, name);
        }
        return Ok(());
    }

    let settings = config::resolve(&cli).map_err(|e| e.to_string())?;

    let _log_guard = logging::init(&config::default_log_dir(), &settings.log_level)?;
    let provider = HttpProvider::new(settings.endpoint.clone())
        .map_err(|e| format!("Cannot create HTTP client: {}", e))?;
    tracing::info!(endpoint = provider.endpoint(), options = ?settings.options, "starting triviaterm");

    let state = SessionState::new(settings.options);
    let timer_rx = timer::spawn_ticker();

    tui::run_tui(state, Arc::new(provider), timer_rx)?;

    tracing::info!("exiting");
    Ok(())
}
