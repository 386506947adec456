mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::AppConfig;
use controller::AppController;
use model::{AppModel, PreferencesStore, Route, TmdbClient};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== movie-explorer starting ===");

    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        api_url = %config.api_url,
        site_url = %config.site_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Configuration loaded"
    );

    let client = TmdbClient::new(&config)?;

    let store = PreferencesStore::default();
    let preferences = match store.load() {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::warn!(error = %e, path = %store.path().display(), "Could not read preferences, using defaults");
            Default::default()
        }
    };

    let app_model = AppModel::new(
        Arc::new(client),
        store,
        preferences,
        config.site_url.clone(),
        config.browser.clone(),
    );
    let controller = AppController::new(app_model);

    // Genre list and a warm random id, both in the background
    let controller_for_genres = controller.clone();
    tokio::spawn(async move {
        controller_for_genres.load_genres().await;
    });
    let controller_for_prefetch = controller.clone();
    tokio::spawn(async move {
        controller_for_prefetch.prefetch_random_id().await;
    });

    // `movie-explorer /movie/603` opens straight on that movie
    if let Some(path) = std::env::args().nth(1) {
        match Route::parse(&path) {
            Some(route) => {
                let controller_for_route = controller.clone();
                tokio::spawn(async move {
                    controller_for_route.navigate(route, true).await;
                });
            }
            None => tracing::warn!(path, "Ignoring unknown start path"),
        }
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("movie-explorer shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: AppController,
) -> io::Result<()> {
    let model = controller.model().clone();
    loop {
        let size = terminal.size()?;
        model.set_viewport(size.width, size.height).await;

        let now = Instant::now();
        model.tick(now).await;

        // Get current state
        let (ui_state, content_state, preferences, should_quit) = (
            model.get_ui_state().await,
            model.get_content_state().await,
            model.preferences().await,
            model.should_quit().await,
        );

        if should_quit {
            break;
        }

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, &preferences, now);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            let handled = match event::read()? {
                Event::Key(key) => controller.handle_key_event(key).await,
                Event::Mouse(mouse) => controller.handle_mouse_event(mouse).await,
                _ => Ok(()),
            };
            if let Err(e) = handled {
                tracing::warn!(error = %e, "Event handling failed");
            }
        }
    }

    Ok(())
}
