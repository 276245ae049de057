use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::browser::entry::Entry;
use crate::theme::ThemeColors;

/// Listing widget that renders directory entries: the parent link, folders
/// with their sub-counts, and files with tag summary and size.
pub struct ListingWidget<'a> {
    entries: &'a [Entry],
    selected_index: usize,
    scroll_offset: usize,
    loading: bool,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> ListingWidget<'a> {
    pub fn new(
        entries: &'a [Entry],
        selected_index: usize,
        scroll_offset: usize,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            entries,
            selected_index,
            scroll_offset,
            loading: false,
            theme,
            block: None,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Left-hand text for one entry.
    fn entry_text(entry: &Entry) -> String {
        match entry {
            Entry::Parent(parent) => format!("{}/", parent.name),
            Entry::Folder(folder) => format!(
                "{}/  ({} folders, {} tracks)",
                folder.name, folder.sub_folder_count, folder.sub_file_count
            ),
            Entry::File(file) => {
                let mut text = format!("{}.{}", file.name, file.extension);
                let mut tag_parts = Vec::new();
                if let Some(artist) = &file.tag.artist {
                    tag_parts.push(artist.clone());
                }
                if let Some(album) = &file.tag.album {
                    tag_parts.push(album.clone());
                }
                if let Some(track) = file.tag.track_number {
                    tag_parts.push(format!("#{track}"));
                }
                if !tag_parts.is_empty() {
                    text.push_str(&format!("  [{}]", tag_parts.join(" / ")));
                }
                text
            }
        }
    }

    fn entry_style(&self, entry: &Entry, selected: bool) -> Style {
        if selected {
            return Style::default()
                .bg(self.theme.selected_bg)
                .fg(self.theme.selected_fg);
        }
        let fg = match entry {
            Entry::Parent(_) => self.theme.parent_fg,
            Entry::Folder(_) => self.theme.folder_fg,
            Entry::File(_) => self.theme.file_fg,
        };
        Style::default().fg(fg)
    }
}

impl<'a> Widget for ListingWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.entries.is_empty() {
            let text = if self.loading { "Scanning..." } else { "No entries" };
            let line = Line::from(Span::styled(text, Style::default().fg(self.theme.tag_fg)));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let width = inner.width as usize;
        let visible = self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(inner.height as usize);

        for (row, (index, entry)) in visible.enumerate() {
            let selected = index == self.selected_index;
            let style = self.entry_style(entry, selected);

            let mut left = Self::entry_text(entry);
            let right = match entry {
                Entry::File(file) => format_size(file.size_bytes),
                _ => String::new(),
            };

            // Pad the selected row to the full width so the highlight spans it.
            let budget = width.saturating_sub(right.len() + 1);
            if left.len() > budget {
                let mut cut = budget;
                while cut > 0 && !left.is_char_boundary(cut) {
                    cut -= 1;
                }
                left.truncate(cut);
            }
            let gap = width.saturating_sub(left.len() + right.len());
            let text = format!("{}{}{}", left, " ".repeat(gap), right);

            let line = Line::from(Span::styled(text, style));
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}

/// Humanize a byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::entry::{FileEntry, FolderEntry, ParentEntry, TagInfo};
    use std::path::Path;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::Parent(ParentEntry::for_dir(Path::new("/music"))),
            Entry::Folder(FolderEntry {
                path: "/music/Rock".into(),
                name: "Rock".into(),
                sub_folder_count: 2,
                sub_file_count: 3,
            }),
            Entry::File(FileEntry {
                path: "/music/intro.mp3".into(),
                name: "intro".into(),
                size_bytes: 2048,
                extension: "mp3".into(),
                tag: TagInfo {
                    track_number: Some(1),
                    artist: Some("Abba".into()),
                    album: None,
                    title: None,
                },
            }),
        ]
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn renders_each_entry_kind() {
        let entries = sample_entries();
        let theme = ThemeColors::dark();
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 3));
        ListingWidget::new(&entries, 0, 0, &theme).render(buf.area, &mut buf);

        assert!(row_text(&buf, 0).starts_with("../"));
        assert!(row_text(&buf, 1).contains("Rock/  (2 folders, 3 tracks)"));
        let file_row = row_text(&buf, 2);
        assert!(file_row.contains("intro.mp3  [Abba / #1]"));
        assert!(file_row.trim_end().ends_with("2.0 KB"));
    }

    #[test]
    fn scroll_offset_skips_rows() {
        let entries = sample_entries();
        let theme = ThemeColors::dark();
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 2));
        ListingWidget::new(&entries, 2, 1, &theme).render(buf.area, &mut buf);
        assert!(row_text(&buf, 0).contains("Rock/"));
        assert!(row_text(&buf, 1).contains("intro.mp3"));
    }

    #[test]
    fn empty_listing_shows_placeholder() {
        let theme = ThemeColors::dark();
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 1));
        ListingWidget::new(&[], 0, 0, &theme)
            .loading(true)
            .render(buf.area, &mut buf);
        assert!(row_text(&buf, 0).contains("Scanning..."));
    }
}
