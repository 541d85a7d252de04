//! Magic Stream TUI - a terminal client for the Magic Stream movie platform.
//!
//! Sign in, browse the catalog and your recommendations, read and (as an
//! admin) write reviews, and grab stream links, all from the terminal.

mod app;
mod ui;

use std::io;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use magicstream_core::{ApiClient, Config, Route, Session, SessionStore};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Environment variable controlling the log filter (falls back to RUST_LOG)
const LOG_ENV: &str = "MAGICSTREAM_LOG";

/// Initialize tracing with a daily-rolling log file. The TUI owns the
/// terminal, so logs cannot go to stderr while it runs.
fn init_tracing(config: &Config) -> Result<WorkerGuard> {
    let log_dir = config.log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Could not create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, "magicstream.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Config::load()?;

    // Maintenance flags run without the TUI
    let args: Vec<String> = std::env::args().collect();
    if let Some(flag) = args.get(1) {
        match flag.as_str() {
            "--version" => {
                println!("magicstream {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--login" => return cli_login(config).await,
            "--logout" => return cli_logout(&config).await,
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Usage: magicstream [--login | --logout | --version]");
                std::process::exit(2);
            }
        }
    }

    let _log_guard = init_tracing(&config)?;
    info!("Magic Stream TUI starting");

    // Create app; hydrates the session snapshot before any navigation
    let mut app = App::new(config)?;
    app.restore_credentials().await;
    app.navigate(Route::Home);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Magic Stream TUI shutting down");
    Ok(())
}

/// `--login`: sign in from the terminal without the TUI, saving the session
/// snapshot for later runs. Useful over SSH or in scripts.
async fn cli_login(mut config: Config) -> Result<()> {
    let mut email = String::new();
    print!("Email: ");
    io::stdout().flush()?;
    io::stdin().read_line(&mut email)?;
    let email = email.trim().to_string();
    if email.is_empty() {
        anyhow::bail!("No email given");
    }
    let password = rpassword::prompt_password("Password: ")?;

    let api = ApiClient::new(&config.base_url())?;
    let user = api.login(&email, &password).await?;

    let store = SessionStore::new(config.data_dir()?);
    store.hydrate();
    store.set(Some(Session::from_user(user)));

    config.last_email = Some(email.clone());
    config.save()?;

    println!("Signed in as {}", email);
    Ok(())
}

/// `--logout`: clear the local session. The server call is best effort.
async fn cli_logout(config: &Config) -> Result<()> {
    let store = SessionStore::new(config.data_dir()?);
    store.hydrate();

    let Some(user_id) = store.user_id() else {
        println!("Not signed in");
        return Ok(());
    };

    let api = ApiClient::new(&config.base_url())?;
    if let Err(e) = api.logout(&user_id).await {
        eprintln!("Server logout failed ({}); clearing the local session anyway", e);
    }
    store.set(None);

    println!("Signed out");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks().await;

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
