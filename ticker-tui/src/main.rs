mod app;
mod cli;
mod config;
mod logging;
mod runtime;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::TickerConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use runtime::Drivers;
use std::io;
use std::sync::Arc;
use ticker::{Coordinator, HttpRemote, MemoryRemote, RefreshDriver, TimerRemote};
use time::OffsetDateTime;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = TickerConfig::ensure_exists()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Run => {
            let config = TickerConfig::load()?;
            let remote = HttpRemote::new(&config.api_url)
                .with_context(|| format!("Invalid api_url '{}'", config.api_url))?;
            run(config, Arc::new(remote)).await
        }
        Commands::Dev => {
            let config = TickerConfig::load()?;
            let remote = MemoryRemote::seeded(OffsetDateTime::now_utc());
            run(config, Arc::new(remote)).await
        }
    }
}

async fn run(config: TickerConfig, remote: Arc<dyn TimerRemote>) -> Result<()> {
    logging::init(&TickerConfig::log_path()?)?;
    tracing::info!(api_url = %config.api_url, "Starting ticker-tui");

    let (events_tx, events_rx) = ticker::channel();
    let coordinator = Coordinator::new(Arc::clone(&remote)).with_events(events_tx.clone());
    let mut app = App::new(coordinator);
    let drivers = Drivers {
        refresh: RefreshDriver::new(remote, config.refresh_interval()),
        tick_interval: config.tick_interval(),
        events_tx,
        events_rx,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = runtime::run_app(&mut terminal, &mut app, drivers).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "ticker-tui exited with an error");
    }
    result
}
