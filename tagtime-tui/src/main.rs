mod app;
mod cli;
mod config;
mod logging;
mod periodic;
mod runtime;
mod store;
mod time_utils;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::TagtimeConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tagtime_client::{ApiEndpoints, TrackerClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = TagtimeConfig::load()?;

    let client = match cli.command() {
        Commands::ConfigPath => return print_config_path(),
        Commands::Dev => TrackerClient::dev(),
        Commands::Run => {
            let endpoints = ApiEndpoints::resolve(cfg.api_url.as_deref());
            TrackerClient::new(endpoints).context("Failed to create API client")?
        }
    };

    let log_path = TagtimeConfig::log_path()?;
    logging::init_file_logging(&log_path, &cfg.log_filter)?;
    if client.is_dev() {
        tracing::info!("Starting tagtime with in-memory dev data");
    } else {
        tracing::info!("Starting tagtime against {}", client.endpoints().base_url());
    }

    let mut app = App::new(&cfg, client.is_dev());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, client, &cfg).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("tagtime exited with error: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn print_config_path() -> Result<()> {
    let path = TagtimeConfig::config_path()?;
    if !path.exists() {
        TagtimeConfig::default()
            .save()
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
    }
    println!("{}", path.display());
    Ok(())
}
