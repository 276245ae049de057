//! Music folder browsing: listing, classification, sorting, and home-directory
//! navigation.
//!
//! A listing is recomputed in full on every [`DirectoryBrowser::load_dir`]
//! call; there is no caching. The browser performs blocking filesystem I/O
//! (directory reads, stats, tag parsing) and must therefore run its scans off
//! the UI thread — callers go through `tokio::task::spawn_blocking` and the
//! event channel.

pub mod entry;
pub mod filter;
pub mod sorting;
pub mod tags;

use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, ThreadId};

use crate::browser::entry::{Entry, FileEntry, FolderEntry, ParentEntry, TagInfo};
use crate::browser::filter::AudioFilter;
use crate::browser::sorting::{sort_files, sort_folders, FileSortOrder, FolderSortOrder};
use crate::browser::tags::TagReader;
use crate::settings::SettingsStore;

/// Presentation state of the home-directory action, a pure function of
/// `{has_home_dir, at_home_dir}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeState {
    #[default]
    NoHome,
    AtHome,
    HasHomeElsewhere,
}

impl HomeState {
    /// Label for the home-directory action in the current state.
    pub fn action_label(&self) -> &'static str {
        match self {
            HomeState::NoHome => "set home",
            HomeState::AtHome => "remove home",
            HomeState::HasHomeElsewhere => "go home",
        }
    }

    /// Short status-bar indicator.
    pub fn indicator(&self) -> &'static str {
        match self {
            HomeState::NoHome => "",
            HomeState::AtHome => "⌂ here",
            HomeState::HasHomeElsewhere => "⌂ set",
        }
    }
}

/// Whether a directory is a filesystem root (no parent to link to).
fn is_root(dir: &Path) -> bool {
    dir.parent().is_none()
}

/// Lists a directory's audio-relevant children, classifies them into folders
/// and playable files, attaches tag metadata, and produces an ordered,
/// optionally per-group-reversed, navigation-ready listing.
pub struct DirectoryBrowser {
    settings: Box<dyn SettingsStore>,
    tag_reader: Box<dyn TagReader>,
    filter: AudioFilter,
    current_dir: Option<PathBuf>,
    /// Set once from `main`; scans invoked on this thread are a bug.
    ui_thread: Option<ThreadId>,
}

impl DirectoryBrowser {
    pub fn new(
        settings: Box<dyn SettingsStore>,
        tag_reader: Box<dyn TagReader>,
        filter: AudioFilter,
    ) -> Self {
        Self {
            settings,
            tag_reader,
            filter,
            current_dir: None,
            ui_thread: None,
        }
    }

    /// Mark the calling thread as the UI thread. Blocking scans invoked on it
    /// afterwards panic, surfacing the misuse during development.
    pub fn bind_ui_thread(&mut self) {
        self.ui_thread = Some(thread::current().id());
    }

    fn ensure_worker_thread(&self) {
        if let Some(ui_thread) = self.ui_thread {
            assert_ne!(
                thread::current().id(),
                ui_thread,
                "blocking directory scan invoked on the UI thread"
            );
        }
    }

    /// The directory of the most recent `load_dir` call.
    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    // ── Listing ──────────────────────────────────────────────────────────────

    /// Load one directory and return its ordered listing.
    ///
    /// Folders come before files; each group is sorted by its active key and
    /// reversed wholesale when its ascending flag is off; a parent link is
    /// prepended iff the directory is not a filesystem root. A missing or
    /// unreadable directory yields zero children, never an error. Updates
    /// `current_dir` as a side effect.
    pub fn load_dir(&mut self, dir: &Path) -> Vec<Entry> {
        self.ensure_worker_thread();
        self.current_dir = Some(dir.to_path_buf());

        let mut folders = Vec::new();
        let mut files = Vec::new();
        for child in self.filter.children(dir) {
            if child.is_dir() {
                folders.push(self.folder_entry(&child));
            } else if let Some(file) = self.file_entry(&child) {
                files.push(file);
            }
        }

        sort_folders(&mut folders, self.settings.folders_sort_order());
        sort_files(&mut files, self.settings.files_sort_order());

        // Descending is a reversal of the sorted group, not a re-sort.
        if !self.settings.folders_ascending() {
            folders.reverse();
        }
        if !self.settings.files_ascending() {
            files.reverse();
        }

        let mut entries: Vec<Entry> = folders
            .into_iter()
            .map(Entry::Folder)
            .chain(files.into_iter().map(Entry::File))
            .collect();

        if !is_root(dir) {
            entries.insert(0, Entry::Parent(ParentEntry::for_dir(dir)));
        }

        entries
    }

    /// Build a folder entry with audio-filtered counts of its own immediate
    /// children (one extra directory read).
    fn folder_entry(&self, path: &Path) -> FolderEntry {
        let children = self.filter.children(path);
        let sub_folder_count = children.iter().filter(|c| c.is_dir()).count();
        FolderEntry {
            path: path.to_path_buf(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            sub_folder_count,
            sub_file_count: children.len() - sub_folder_count,
        }
    }

    /// Build a file entry, or `None` when the file has no extension (not
    /// considered audio). Tag lookup is best-effort: an unreadable tag leaves
    /// the fields empty without failing the listing.
    fn file_entry(&self, path: &Path) -> Option<FileEntry> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .filter(|e| !e.is_empty())?;
        let name = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size_bytes = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let tag = self.tag_reader.read(path).unwrap_or_else(TagInfo::default);
        Some(FileEntry {
            path: path.to_path_buf(),
            name,
            size_bytes,
            extension,
            tag,
        })
    }

    // ── Initial directory ────────────────────────────────────────────────────

    /// Resolve the directory to open on startup. First hit wins: the
    /// persisted home directory if it still exists, then the removable
    /// storage heuristic, then the platform music directory.
    pub fn initial_dir(&self) -> Option<PathBuf> {
        self.ensure_worker_thread();
        self.initial_dir_from_settings()
            .or_else(|| removable_storage_dir(Path::new("/")))
            .or_else(default_music_dir)
    }

    fn initial_dir_from_settings(&self) -> Option<PathBuf> {
        self.home_dir().filter(|dir| dir.exists())
    }

    // ── Home directory ───────────────────────────────────────────────────────

    /// Persist `current_dir` as the home directory. No-op before the first load.
    pub fn set_home_dir(&mut self) {
        if let Some(dir) = self.current_dir.clone() {
            self.settings
                .set_folder_browser_initial_dir(&dir.to_string_lossy());
        }
    }

    /// Clear the persisted home directory.
    pub fn clear_home_dir(&mut self) {
        self.settings.set_folder_browser_initial_dir("");
    }

    /// The persisted home directory, if a non-empty one is stored.
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.settings
            .folder_browser_initial_dir()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }

    pub fn has_home_dir(&self) -> bool {
        self.home_dir().is_some()
    }

    /// Whether `current_dir` equals the home directory, by path equality.
    pub fn at_home_dir(&self) -> bool {
        match (self.current_dir(), self.home_dir()) {
            (Some(current), Some(home)) => current == home,
            _ => false,
        }
    }

    pub fn home_state(&self) -> HomeState {
        if self.at_home_dir() {
            HomeState::AtHome
        } else if self.has_home_dir() {
            HomeState::HasHomeElsewhere
        } else {
            HomeState::NoHome
        }
    }

    // ── Preference passthroughs ──────────────────────────────────────────────

    pub fn files_sort_order(&self) -> FileSortOrder {
        self.settings.files_sort_order()
    }

    pub fn set_files_sort_order(&mut self, order: FileSortOrder) {
        self.settings.set_files_sort_order(order);
    }

    pub fn folders_sort_order(&self) -> FolderSortOrder {
        self.settings.folders_sort_order()
    }

    pub fn set_folders_sort_order(&mut self, order: FolderSortOrder) {
        self.settings.set_folders_sort_order(order);
    }

    pub fn files_ascending(&self) -> bool {
        self.settings.files_ascending()
    }

    pub fn set_files_ascending(&mut self, ascending: bool) {
        self.settings.set_files_ascending(ascending);
    }

    pub fn folders_ascending(&self) -> bool {
        self.settings.folders_ascending()
    }

    pub fn set_folders_ascending(&mut self, ascending: bool) {
        self.settings.set_folders_ascending(ascending);
    }
}

/// Removable-storage discovery: scan `root` for a directory whose name
/// contains "storage" (case-insensitive), then descend through matches for
/// "extsdcard" and "music", each optional once the first hit is found.
fn removable_storage_dir(root: &Path) -> Option<PathBuf> {
    let mut dir = child_containing(root, "storage")?;
    if let Some(ext_sd) = child_containing(&dir, "extsdcard") {
        dir = ext_sd;
    }
    if let Some(music) = child_containing(&dir, "music") {
        dir = music;
    }
    Some(dir)
}

/// First immediate subdirectory whose name contains `needle` (lowercased).
fn child_containing(dir: &Path, needle: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.contains(needle) && entry.path().is_dir() {
            return Some(entry.path());
        }
    }
    None
}

/// The platform's music directory, falling back to the home directory.
fn default_music_dir() -> Option<PathBuf> {
    dirs::audio_dir()
        .filter(|dir| dir.is_dir())
        .or_else(|| dirs::home_dir().filter(|dir| dir.is_dir()))
}
