use anyhow::Result;
use confessions::store::SlotBackend;
use confessions::ConfessionsService;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tracing::{error, info};

mod app;
mod event;
mod input;
mod screens;
mod theme;
mod ui;
pub mod widgets;

pub use app::App;
pub use event::EventHandler;

/// Toast expiry is checked at this rate
const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the TUI application
pub async fn run_tui(service: ConfessionsService<SlotBackend>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run it
    let mut app = App::new(service);
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("TUI exited with error: {:?}", err);
        println!("{:?}", err)
    }

    info!("Board closed");
    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut event_handler = EventHandler::new(TICK_RATE);

    loop {
        // Draw the current state
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events
        match event_handler.next().await {
            Some(event) => {
                if !app.handle_event(event) {
                    break; // Exit on quit
                }
            }
            None => break,
        }
    }

    Ok(())
}
