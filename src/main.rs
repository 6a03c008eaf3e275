//! user-registry binary entry point.
//!
//! Reads configuration, sets up file logging, builds the HTTP-backed
//! controllers, runs the TUI event loop and restores the terminal on exit.
//!
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use user_registry_tui::Result;
use user_registry_tui::api::ApiClient;
use user_registry_tui::api::test_data::HttpTestDataSource;
use user_registry_tui::api::users::HttpUserRepository;
use user_registry_tui::app::{self, AppState, TestDataController, Theme, UserFormController};
use user_registry_tui::config::{ApiConfig, Cli};
use user_registry_tui::service::UserService;

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: configuration errors are reported before the
/// terminal switches to raw mode; runtime errors after it is restored.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ApiConfig::from_cli(&cli);
    config.validate()?;
    init_tracing(&cli.log_file)?;
    tracing::info!(base_url = %config.base_url, timeout = ?config.timeout, "starting");

    let runtime = tokio::runtime::Runtime::new().context("start tokio runtime")?;
    let client = ApiClient::new(config).context("build HTTP client")?;
    let users = UserFormController::new(UserService::new(HttpUserRepository::new(client.clone())));
    let test_data = TestDataController::new(HttpTestDataSource::new(client));
    let mut state = AppState::new(users, test_data, Theme::load_or_init(&cli.theme));

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut state, runtime.handle());

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    report(res)
}

/// Log a failed run and hand it back so the process exits non-zero.
fn report(res: Result<()>) -> Result<()> {
    if let Err(err) = &res {
        tracing::error!(error = %err, "application error");
    }
    res
}
