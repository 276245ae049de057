use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::App;
use crate::event::Event;

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent, tx: &UnboundedSender<Event>) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),

        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.open_selected(tx),
        KeyCode::Backspace | KeyCode::Left => app.navigate_up(tx),
        KeyCode::Char('r') => app.reload(tx),

        KeyCode::Char('s') => app.cycle_files_sort(tx),
        KeyCode::Char('S') => app.cycle_folders_sort(tx),
        KeyCode::Char('a') => app.toggle_files_ascending(tx),
        KeyCode::Char('A') => app.toggle_folders_ascending(tx),

        KeyCode::Char('h') => app.go_home(tx),
        KeyCode::Char('m') => app.toggle_home(),

        _ => {}
    }
}
