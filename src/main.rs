mod config;
mod controller;
mod logging;
mod media;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use anyhow::{Context, Result};
use tokio::sync::Mutex;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use config::Config;
use controller::AppController;
use media::{player_event_channel, MediaBackend, TerminalFullscreen};
use model::{AppModel, DetailView, FileStorage, InteractionFacade, SeedCatalog, VideoCatalog};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== WeTube Starting ===");

    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let storage = Arc::new(FileStorage::new(&config.data_dir));
    tracing::info!(dir = %storage.dir().display(), "Using file storage");
    let facade = InteractionFacade::init(storage, config.viewer()).into_shared();
    let (viewer_name, revisions) = {
        let facade = facade.lock().await;
        (facade.viewer().name.clone(), facade.subscribe())
    };

    // Recommended rail: regular videos first, then shorts, in catalog order
    let catalog = SeedCatalog::new();
    let (videos, shorts) = futures::try_join!(catalog.fetch_videos(), catalog.fetch_shorts())
        .context("failed to load catalog")?;
    let rail: Vec<String> = videos.iter().chain(shorts.iter()).map(|v| v.id.clone()).collect();

    let start_video = config
        .start_video
        .clone()
        .or_else(|| rail.first().cloned())
        .context("catalog is empty")?;

    let detail = DetailView::new(facade.clone(), rail, config.view_delay());
    let model = Arc::new(Mutex::new(AppModel::new(facade.clone(), detail)));

    let (events_tx, events_rx) = player_event_channel();
    let media = Arc::new(MediaBackend::new(events_tx.clone(), config.autoplay));
    let fullscreen = Arc::new(TerminalFullscreen::new(events_tx));

    let controller = AppController::new(model.clone(), media.clone(), fullscreen);
    controller.start_player_event_listener(events_rx);
    controller.start_revision_listener(revisions);
    controller.open_video(&start_video).await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model.clone(), controller, &viewer_name).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    media.unload();
    model.lock().await.detail.lock().await.unmount();

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("WeTube shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    viewer_name: &str,
) -> io::Result<()> {
    loop {
        controller.tick().await;

        let (snapshot, ui_state, durability, should_quit) = {
            let model_guard = model.lock().await;
            let durability = model_guard.facade.lock().await.durability();
            (
                model_guard.get_snapshot(Instant::now()).await,
                model_guard.get_ui_state().await,
                durability,
                model_guard.should_quit().await,
            )
        };

        terminal.draw(|f| {
            AppView::render(f, snapshot.as_ref(), &ui_state, viewer_name, durability);
        })?;

        if should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    let _ = controller.handle_key_event(key).await;
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let frame = Rect::new(0, 0, size.width, size.height);
                    let _ = controller.handle_mouse_event(mouse, frame).await;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
