mod app;
mod browser;
mod components;
mod error;
mod event;
mod handler;
mod settings;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::browser::filter::AudioFilter;
use crate::browser::tags::LoftyTagReader;
use crate::browser::DirectoryBrowser;
use crate::event::{Event, EventHandler};
use crate::settings::TomlSettings;
use crate::theme::ThemeColors;
use crate::tui::{install_panic_hook, Tui};

/// A terminal-based music folder browser TUI.
#[derive(Parser, Debug)]
#[command(name = "music_browser_tui", version, about)]
struct Cli {
    /// Directory to open (defaults to the saved home directory or a music
    /// directory heuristic)
    path: Option<PathBuf>,

    /// Settings file location
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    // Validate the start path before touching the terminal.
    let start_path = match cli.path {
        Some(path) => Some(path.canonicalize().map_err(|_| {
            error::AppError::InvalidPath(format!("{} does not exist", path.display()))
        })?),
        None => None,
    };

    let settings_path = cli
        .settings
        .or_else(TomlSettings::default_path)
        .ok_or_else(|| {
            error::AppError::InvalidPath("no config directory available for settings".into())
        })?;
    let settings = TomlSettings::load(&settings_path);
    let theme = ThemeColors::from_scheme(settings.theme_scheme());
    let filter = settings
        .extensions()
        .map(|exts| AudioFilter::with_extensions(exts.iter().cloned()))
        .unwrap_or_default();

    let mut browser =
        DirectoryBrowser::new(Box::new(settings), Box::new(LoftyTagReader), filter);
    browser.bind_ui_thread();

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut app = App::new(browser);
    let mut events = EventHandler::new(Duration::from_millis(16));
    let event_tx = events.sender();

    match start_path {
        Some(path) => app.request_load(path, &event_tx),
        None => app.request_initial_dir(&event_tx),
    }

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame, &theme);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key, &event_tx),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
            Event::DirLoaded { dir, entries } => app.handle_dir_loaded(dir, entries),
            Event::InitialDir(dir) => app.handle_initial_dir(dir, &event_tx),
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    Ok(())
}
