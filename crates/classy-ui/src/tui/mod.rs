//! Terminal front end for Classy.
//!
//! One search box, a loading indicator and the forecast cards for the
//! current query.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use classy_core::{Config, LocalStorage};
use classy_weather::WeatherClient;
use crossterm::{
    event::{self as crossterm_event, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub mod app;
pub mod ui;

use app::App;

/// Run the TUI until the user quits
pub async fn run(config: Arc<Config>, storage: LocalStorage) -> Result<()> {
    let client = Arc::new(WeatherClient::new(
        &config.weather.geocoding_url,
        &config.weather.forecast_url,
    )?);
    let mut app = App::new(&config, storage, client);
    let tick = Duration::from_millis(config.ui.tick_millis);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.mount();
    let result = run_app(&mut terminal, &mut app, tick).await;
    app.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("UI loop failed: {:#}", err);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if crossterm_event::poll(tick)? {
            if let Event::Key(key) = crossterm_event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    app.handle_exit_request();
                } else {
                    app.handle_key(key);
                }
            }
        }

        if app.should_exit {
            break;
        }

        // Pick up finished lookups
        app.tick();

        // Let spawned lookups make progress on a current-thread runtime
        tokio::task::yield_now().await;
    }

    Ok(())
}
