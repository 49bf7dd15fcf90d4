//! Terminal UI for Tic Tac Meow

mod app;
mod input;
mod ui;

use crate::config::ClientConfig;
use crate::orchestrator::{Intent, Orchestrator};
use crate::service::HttpGameService;
use crate::session::{Session, Snapshot};
use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Runs the terminal client until the user quits.
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(server_url = %config.server_url(), "Starting Tic Tac Meow TUI");

    let service = HttpGameService::new(config.server_url(), config.request_timeout())?;
    let settings = config.orchestrator_settings();

    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(Session::new().snapshot(settings.difficulty));

    let orchestrator = Orchestrator::new(Arc::new(service), settings);
    let driver = tokio::spawn(orchestrator.run(intent_rx, snapshot_tx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(settings.difficulty);
    let res = run_app(&mut terminal, &mut app, intent_tx, snapshot_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // The intent sender was dropped with run_app, which stops the driver.
    if let Err(e) = driver.await {
        error!(error = %e, "Orchestrator task failed");
    }

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw and input loop: renders every new snapshot and forwards key presses.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    intents: mpsc::UnboundedSender<Intent>,
    mut snapshots: watch::Receiver<Snapshot>,
) -> Result<()> {
    loop {
        if snapshots.has_changed()? {
            app.update(snapshots.borrow_and_update().clone());
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Check for keyboard input without blocking the runtime for long
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(intent) = app.handle_key(key.code) {
                    intents.send(intent)?;
                }
                if app.should_quit() {
                    info!("User quit");
                    return Ok(());
                }
            }
        }

        tokio::task::yield_now().await;
    }
}
