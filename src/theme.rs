use ratatui::style::Color;

/// Resolved color palette used by the widgets.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub folder_fg: Color,
    pub file_fg: Color,
    pub parent_fg: Color,
    pub tag_fg: Color,
    pub status_fg: Color,
    pub border_fg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            selected_bg: Color::DarkGray,
            selected_fg: Color::White,
            folder_fg: Color::Cyan,
            file_fg: Color::Gray,
            parent_fg: Color::Yellow,
            tag_fg: Color::DarkGray,
            status_fg: Color::Gray,
            border_fg: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,
            folder_fg: Color::Blue,
            file_fg: Color::Black,
            parent_fg: Color::Magenta,
            tag_fg: Color::Gray,
            status_fg: Color::Black,
            border_fg: Color::Gray,
        }
    }

    /// Resolve a scheme name; anything unrecognized gets the dark palette.
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_resolution() {
        assert_eq!(ThemeColors::from_scheme("light").file_fg, Color::Black);
        assert_eq!(ThemeColors::from_scheme("dark").file_fg, Color::Gray);
        assert_eq!(ThemeColors::from_scheme("unknown").file_fg, Color::Gray);
    }
}
