use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tokio::sync::mpsc::UnboundedSender;

use crate::browser::entry::{Entry, FileEntry};
use crate::browser::sorting::{FileSortOrder, FolderSortOrder};
use crate::browser::{DirectoryBrowser, HomeState};
use crate::event::Event;

/// Lock the shared browser, recovering the inner value if a scan thread
/// panicked while holding the lock.
fn lock_browser(browser: &Arc<Mutex<DirectoryBrowser>>) -> MutexGuard<'_, DirectoryBrowser> {
    browser.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Main application state.
///
/// The browser is shared with short-lived `spawn_blocking` scan tasks; the
/// event loop stays responsive while a directory is read, and the finished
/// listing comes back through the event channel. Concurrent loads are not
/// coordinated beyond last-writer-wins on the browser's current directory.
pub struct App {
    browser: Arc<Mutex<DirectoryBrowser>>,
    pub entries: Vec<Entry>,
    pub current_dir: Option<PathBuf>,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub loading: bool,
    pub should_quit: bool,
    pub status_message: Option<(String, Instant)>,
    // Mirrors of the persisted preferences for the status bar.
    pub home_state: HomeState,
    pub files_sort: FileSortOrder,
    pub folders_sort: FolderSortOrder,
    pub files_ascending: bool,
    pub folders_ascending: bool,
}

impl App {
    pub fn new(browser: DirectoryBrowser) -> Self {
        let browser = Arc::new(Mutex::new(browser));
        let mut app = Self {
            browser,
            entries: Vec::new(),
            current_dir: None,
            selected_index: 0,
            scroll_offset: 0,
            loading: false,
            should_quit: false,
            status_message: None,
            home_state: HomeState::NoHome,
            files_sort: FileSortOrder::Default,
            folders_sort: FolderSortOrder::Default,
            files_ascending: true,
            folders_ascending: true,
        };
        app.refresh_prefs();
        app
    }

    /// Re-read the preference mirrors from the shared browser.
    fn refresh_prefs(&mut self) {
        let guard = lock_browser(&self.browser);
        self.home_state = guard.home_state();
        self.files_sort = guard.files_sort_order();
        self.folders_sort = guard.folders_sort_order();
        self.files_ascending = guard.files_ascending();
        self.folders_ascending = guard.folders_ascending();
    }

    // ── Background scans ─────────────────────────────────────────────────────

    /// Kick off a directory scan on the blocking pool; the listing arrives as
    /// an `Event::DirLoaded`.
    pub fn request_load(&mut self, dir: PathBuf, tx: &UnboundedSender<Event>) {
        self.loading = true;
        let browser = Arc::clone(&self.browser);
        let tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            let entries = lock_browser(&browser).load_dir(&dir);
            let _ = tx.send(Event::DirLoaded { dir, entries });
        });
    }

    /// Resolve the startup directory off the UI thread; the result arrives as
    /// an `Event::InitialDir`.
    pub fn request_initial_dir(&mut self, tx: &UnboundedSender<Event>) {
        self.loading = true;
        let browser = Arc::clone(&self.browser);
        let tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            let dir = lock_browser(&browser).initial_dir();
            let _ = tx.send(Event::InitialDir(dir));
        });
    }

    /// A scan finished: swap in the new listing and reset the cursor.
    pub fn handle_dir_loaded(&mut self, dir: PathBuf, entries: Vec<Entry>) {
        self.current_dir = Some(dir);
        self.entries = entries;
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.loading = false;
        self.refresh_prefs();
    }

    /// Startup resolution finished.
    pub fn handle_initial_dir(&mut self, dir: Option<PathBuf>, tx: &UnboundedSender<Event>) {
        match dir {
            Some(dir) => self.request_load(dir, tx),
            None => {
                self.loading = false;
                self.set_status_message("No music directory found; pass a path".to_string());
            }
        }
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected_index)
    }

    /// Open the selected entry: folders and the parent link navigate, files
    /// show their tag summary.
    pub fn open_selected(&mut self, tx: &UnboundedSender<Event>) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        match entry {
            Entry::Folder(folder) => {
                let dir = folder.path.clone();
                self.request_load(dir, tx);
            }
            Entry::Parent(_) => self.navigate_up(tx),
            Entry::File(file) => {
                let summary = describe_file(file);
                self.set_status_message(summary);
            }
        }
    }

    /// Navigate to the parent of the current directory.
    pub fn navigate_up(&mut self, tx: &UnboundedSender<Event>) {
        let parent = self
            .current_dir
            .as_ref()
            .and_then(|dir| dir.parent())
            .map(|p| p.to_path_buf());
        match parent {
            Some(parent) => self.request_load(parent, tx),
            None => self.set_status_message("Already at the filesystem root".to_string()),
        }
    }

    /// Reload the current directory.
    pub fn reload(&mut self, tx: &UnboundedSender<Event>) {
        if let Some(dir) = self.current_dir.clone() {
            self.request_load(dir, tx);
        }
    }

    /// Navigate to the home directory, if one is set.
    pub fn go_home(&mut self, tx: &UnboundedSender<Event>) {
        let home = lock_browser(&self.browser).home_dir();
        match home {
            Some(home) => self.request_load(home, tx),
            None => self.set_status_message("No home directory set".to_string()),
        }
    }

    /// Set or clear the home directory depending on where we are.
    pub fn toggle_home(&mut self) {
        {
            let mut guard = lock_browser(&self.browser);
            match guard.home_state() {
                HomeState::AtHome => {
                    guard.clear_home_dir();
                }
                _ => guard.set_home_dir(),
            }
        }
        self.refresh_prefs();
        let message = match self.home_state {
            HomeState::AtHome => "Home directory set".to_string(),
            HomeState::NoHome if self.current_dir.is_none() => {
                "Nothing loaded yet; no home directory to set".to_string()
            }
            _ => "Home directory cleared".to_string(),
        };
        self.set_status_message(message);
    }

    // ── Sort preferences ─────────────────────────────────────────────────────

    pub fn cycle_files_sort(&mut self, tx: &UnboundedSender<Event>) {
        {
            let mut guard = lock_browser(&self.browser);
            let next = guard.files_sort_order().next();
            guard.set_files_sort_order(next);
        }
        self.refresh_prefs();
        self.set_status_message(format!("Files sorted by {}", self.files_sort.label()));
        self.reload(tx);
    }

    pub fn cycle_folders_sort(&mut self, tx: &UnboundedSender<Event>) {
        {
            let mut guard = lock_browser(&self.browser);
            let next = guard.folders_sort_order().next();
            guard.set_folders_sort_order(next);
        }
        self.refresh_prefs();
        self.set_status_message(format!("Folders sorted by {}", self.folders_sort.label()));
        self.reload(tx);
    }

    pub fn toggle_files_ascending(&mut self, tx: &UnboundedSender<Event>) {
        {
            let mut guard = lock_browser(&self.browser);
            let flipped = !guard.files_ascending();
            guard.set_files_ascending(flipped);
        }
        self.refresh_prefs();
        self.reload(tx);
    }

    pub fn toggle_folders_ascending(&mut self, tx: &UnboundedSender<Event>) {
        {
            let mut guard = lock_browser(&self.browser);
            let flipped = !guard.folders_ascending();
            guard.set_folders_ascending(flipped);
        }
        self.refresh_prefs();
        self.reload(tx);
    }

    // ── Selection ────────────────────────────────────────────────────────────

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        let len = self.entries.len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up by one item.
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Jump to the first item.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item.
    pub fn select_last(&mut self) {
        let len = self.entries.len();
        if len > 0 {
            self.selected_index = len - 1;
        }
    }

    /// Update the scroll offset to ensure the selected item is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }

    // ── Status line ──────────────────────────────────────────────────────────

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// One-line tag summary for a file entry.
fn describe_file(file: &FileEntry) -> String {
    let mut parts = Vec::new();
    if let Some(artist) = &file.tag.artist {
        parts.push(artist.clone());
    }
    if let Some(album) = &file.tag.album {
        parts.push(album.clone());
    }
    match (&file.tag.track_number, &file.tag.title) {
        (Some(n), Some(title)) => parts.push(format!("#{n} {title}")),
        (Some(n), None) => parts.push(format!("track {n}")),
        (None, Some(title)) => parts.push(title.clone()),
        (None, None) => {}
    }
    if parts.is_empty() {
        format!("{}.{}: no tags", file.name, file.extension)
    } else {
        format!("{}.{}: {}", file.name, file.extension, parts.join(", "))
    }
}
