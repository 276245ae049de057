use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::listing::ListingWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::theme::ThemeColors;

/// Render the application UI: the listing with the status bar underneath.
pub fn render(app: &mut App, frame: &mut Frame, theme: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    // Keep the selected item visible inside the bordered listing area.
    let visible_height = chunks[0].height.saturating_sub(2) as usize;
    app.update_scroll(visible_height);

    let title = match &app.current_dir {
        Some(dir) => format!(" {} ", dir.display()),
        None => " music browser ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg));

    let listing = ListingWidget::new(&app.entries, app.selected_index, app.scroll_offset, theme)
        .loading(app.loading)
        .block(block);
    frame.render_widget(listing, chunks[0]);

    let path_str = app
        .current_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    let prefs_str = format!(
        "files:{}{} folders:{}{} {}",
        app.files_sort.label(),
        arrow(app.files_ascending),
        app.folders_sort.label(),
        arrow(app.folders_ascending),
        app.home_state.indicator(),
    );
    let mut status_bar = StatusBarWidget::new(&path_str, &prefs_str, theme)
        .home_action(app.home_state.action_label());
    if let Some((msg, _)) = &app.status_message {
        status_bar = status_bar.status_message(msg);
    }
    frame.render_widget(status_bar, chunks[1]);
}

fn arrow(ascending: bool) -> &'static str {
    if ascending {
        "↑"
    } else {
        "↓"
    }
}
