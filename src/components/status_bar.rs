use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar widget: current path and preferences on the left, key hints on
/// the right; a transient status message takes over the whole bar.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    prefs_str: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    /// Label for the `m` key, which changes with the home-directory state.
    home_action: &'a str,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, prefs_str: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            path_str,
            prefs_str,
            theme,
            status_message: None,
            home_action: "set home",
        }
    }

    pub fn home_action(mut self, label: &'a str) -> Self {
        self.home_action = label;
        self
    }

    pub fn status_message(mut self, msg: &'a str) -> Self {
        self.status_message = Some(msg);
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;
        let style = Style::default().fg(self.theme.status_fg);

        if let Some(msg) = self.status_message {
            let line = Line::from(Span::styled(msg.to_string(), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // Normal bar: [path | prefs] ... [key hints]
        let left = format!("{} | {}", self.path_str, self.prefs_str);
        let hints = format!(" s/S:sort a/A:asc h:home m:{} q:quit ", self.home_action);
        let gap = width.saturating_sub(left.len() + hints.len());
        let text = if gap > 0 {
            format!("{}{}{}", left, " ".repeat(gap), hints)
        } else {
            left
        };
        let line = Line::from(Span::styled(text, style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
