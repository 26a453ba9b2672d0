use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use stockdesk::config::AppConfig;
use stockdesk::tui::app::AppState;
use stockdesk::tui::services::Services;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();

    // Initialize logging
    let _log_guard = stockdesk::logging::init(&config.data_dir());
    log::info!("{} v{} starting", stockdesk::NAME, stockdesk::VERSION);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Wire the event loop
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, event_tx.clone());
    let mut app = AppState::new(&config, event_rx, event_tx, services);

    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("stockdesk shut down cleanly");
    Ok(())
}
