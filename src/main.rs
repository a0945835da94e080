//! hn-search — search Hacker News stories from the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  FetchMsg  ┌──────────┐  draw()  ┌──────────┐
//! │ fetch.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (tokio)  │  (channel) │ (state)  │          │ (render) │
//! └──────────┘            └──────────┘          └──────────┘
//!      ▲                       ▲
//!      │ FetchRequest          │ handle_key_event()
//!      └──────────────── ┌──────────┐
//!                        │ input.rs │
//!                        └──────────┘
//! ```
//!
//! * **`source/`** — the `ArticleSource` trait and the Hacker News source.
//! * **`state`** — the pure result set state machine.
//! * **`session`** — search term, query target and request sequencing.
//! * **`store`** — persistence of the last search term.
//! * **`fetch`** — runs requests on the tokio runtime.
//! * **`app`** — owns all application state and applies actions.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`config`** — layered configuration.
//! * **`main`** — wires everything together: parse args, set up logging and
//!   the terminal, and run the event loop.

mod app;
mod config;
mod fetch;
mod input;
mod session;
mod source;
mod state;
mod store;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use config::{load_config, validate_config};
use session::SearchSession;
use source::{ArticleSource, HnSource};
use store::{FileStore, KeyValueStore, MemoryStore};

/// Search Hacker News stories in a sortable, dismissable list.
#[derive(Parser)]
#[command(name = "hn-search")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Term to search for on start-up (remembered for next time)
    term: Option<String>,

    /// Configuration file (default: <config dir>/hn-search/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the search endpoint prefix
    #[arg(long)]
    endpoint: Option<String>,
}

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send `tracing` output to `path`.  The terminal belongs to the UI, so if
/// the file cannot be opened logging is simply off.
fn init_logging(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
}

fn open_store(path: Option<PathBuf>) -> Box<dyn KeyValueStore> {
    match path {
        Some(path) => {
            let store = FileStore::new(path);
            info!(path = %store.path().display(), "search term store");
            Box::new(store)
        }
        None => {
            warn!("no data directory; search term will not be remembered");
            Box::new(MemoryStore::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    install_panic_hook();

    // -- configuration -------------------------------------------------------
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    validate_config(&config).context("Configuration validation failed")?;

    init_logging(config.log_file().as_deref());
    info!(endpoint = %config.endpoint, "starting hn-search");

    // -- session -------------------------------------------------------------
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let source: Arc<dyn ArticleSource> = Arc::new(
        HnSource::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
            .context("Failed to create HTTP client")?,
    );
    let mut session = SearchSession::new(source, open_store(config.store_path()), &config.default_term);
    if let Some(term) = cli.term {
        session.set_search_term(term);
    }

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(session);

    // Mount-time fetch, before any input.
    let request = app.start();
    fetch::spawn_fetch(runtime.handle(), app.session().source(), request, tx.clone());

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply finished fetches.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = rx.try_recv() {
            app.handle_fetch(msg);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if let Some(request) = input::handle_key_event(&mut app, key) {
                    fetch::spawn_fetch(runtime.handle(), app.session().source(), request, tx.clone());
                }
            }
        }

        if app.quit {
            break;
        }
    }

    drop(guard);
    // Don't wait on requests nobody will look at.
    runtime.shutdown_background();
    info!("exiting");
    Ok(())
}
