//! Persisted application settings: TOML file loading, typed accessors, and
//! write-through setters.
//!
//! The default location is `~/.config/mb/settings.toml` (overridable with
//! `--settings`). A missing file means defaults; an unparsable file degrades
//! to defaults with a warning on stderr. Every setter persists immediately,
//! so preferences survive the session without an explicit save step.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::browser::sorting::{FileSortOrder, FolderSortOrder};

/// Typed access to the browser's persisted preferences, injected into the
/// browser at construction.
pub trait SettingsStore: Send {
    /// The persisted home directory, if one was ever stored. An empty string
    /// means the home directory has been cleared.
    fn folder_browser_initial_dir(&self) -> Option<String>;
    fn set_folder_browser_initial_dir(&mut self, dir: &str);

    fn files_sort_order(&self) -> FileSortOrder;
    fn set_files_sort_order(&mut self, order: FileSortOrder);

    fn folders_sort_order(&self) -> FolderSortOrder;
    fn set_folders_sort_order(&mut self, order: FolderSortOrder);

    fn files_ascending(&self) -> bool;
    fn set_files_ascending(&mut self, ascending: bool);

    fn folders_ascending(&self) -> bool;
    fn set_folders_ascending(&mut self, ascending: bool);
}

// ── Serialized shape ─────────────────────────────────────────────────────────

/// Browser preferences section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BrowserConfig {
    /// Home directory pinned by the user ("" once cleared).
    pub initial_dir: Option<String>,
    /// File sort key: "size", "file_name", "artist_name", "album_name",
    /// "track_name", "default".
    pub files_sort: Option<String>,
    /// Folder sort key: "count", "default".
    pub folders_sort: Option<String>,
    pub files_ascending: Option<bool>,
    pub folders_ascending: Option<bool>,
}

/// Audio filter section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterConfig {
    /// Extensions treated as audio; unset means the built-in list.
    pub extensions: Option<Vec<String>>,
}

/// UI section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Color scheme: "dark" or "light".
    pub theme: Option<String>,
}

/// Top-level settings file shape. All fields are optional so a partial file
/// merges over the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SettingsData {
    pub browser: BrowserConfig,
    pub filter: FilterConfig,
    pub ui: UiConfig,
}

// ── TOML-backed store ────────────────────────────────────────────────────────

/// Settings store persisted as a TOML file.
#[derive(Debug)]
pub struct TomlSettings {
    path: PathBuf,
    data: SettingsData,
}

impl TomlSettings {
    /// The default settings file location, when a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mb").join("settings.toml"))
    }

    /// Load settings from the given file. Missing file means defaults; a
    /// parse failure warns on stderr and also means defaults.
    pub fn load(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<SettingsData>(&content) {
                Ok(data) => data,
                Err(e) => {
                    eprintln!(
                        "Warning: failed to parse settings file {}: {}",
                        path.display(),
                        e
                    );
                    SettingsData::default()
                }
            },
            Err(_) => SettingsData::default(),
        };
        Self {
            path: path.to_path_buf(),
            data,
        }
    }

    /// Extensions treated as audio, when configured.
    pub fn extensions(&self) -> Option<&[String]> {
        self.data.filter.extensions.as_deref()
    }

    /// Theme scheme: "dark" or "light".
    pub fn theme_scheme(&self) -> &str {
        self.data.ui.theme.as_deref().unwrap_or("dark")
    }

    /// Write the current settings back to disk. A failed write keeps the
    /// in-memory value and warns on stderr; preferences still apply for the
    /// rest of the session.
    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let serialized = match toml::to_string_pretty(&self.data) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Warning: failed to serialize settings: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, serialized) {
            eprintln!(
                "Warning: failed to write settings file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

impl SettingsStore for TomlSettings {
    fn folder_browser_initial_dir(&self) -> Option<String> {
        self.data.browser.initial_dir.clone()
    }

    fn set_folder_browser_initial_dir(&mut self, dir: &str) {
        self.data.browser.initial_dir = Some(dir.to_string());
        self.save();
    }

    fn files_sort_order(&self) -> FileSortOrder {
        self.data
            .browser
            .files_sort
            .as_deref()
            .map(FileSortOrder::from_str)
            .unwrap_or_default()
    }

    fn set_files_sort_order(&mut self, order: FileSortOrder) {
        self.data.browser.files_sort = Some(order.as_str().to_string());
        self.save();
    }

    fn folders_sort_order(&self) -> FolderSortOrder {
        self.data
            .browser
            .folders_sort
            .as_deref()
            .map(FolderSortOrder::from_str)
            .unwrap_or_default()
    }

    fn set_folders_sort_order(&mut self, order: FolderSortOrder) {
        self.data.browser.folders_sort = Some(order.as_str().to_string());
        self.save();
    }

    fn files_ascending(&self) -> bool {
        self.data.browser.files_ascending.unwrap_or(true)
    }

    fn set_files_ascending(&mut self, ascending: bool) {
        self.data.browser.files_ascending = Some(ascending);
        self.save();
    }

    fn folders_ascending(&self) -> bool {
        self.data.browser.folders_ascending.unwrap_or(true)
    }

    fn set_folders_ascending(&mut self, ascending: bool) {
        self.data.browser.folders_ascending = Some(ascending);
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> TomlSettings {
        TomlSettings::load(&dir.path().join("settings.toml"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        assert_eq!(settings.folder_browser_initial_dir(), None);
        assert_eq!(settings.files_sort_order(), FileSortOrder::Default);
        assert_eq!(settings.folders_sort_order(), FolderSortOrder::Default);
        assert!(settings.files_ascending());
        assert!(settings.folders_ascending());
        assert_eq!(settings.theme_scheme(), "dark");
        assert!(settings.extensions().is_none());
    }

    #[test]
    fn setters_persist_across_reload() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings_in(&dir);
        settings.set_folder_browser_initial_dir("/music");
        settings.set_files_sort_order(FileSortOrder::ArtistName);
        settings.set_folders_sort_order(FolderSortOrder::Count);
        settings.set_files_ascending(false);

        let reloaded = settings_in(&dir);
        assert_eq!(
            reloaded.folder_browser_initial_dir(),
            Some("/music".to_string())
        );
        assert_eq!(reloaded.files_sort_order(), FileSortOrder::ArtistName);
        assert_eq!(reloaded.folders_sort_order(), FolderSortOrder::Count);
        assert!(!reloaded.files_ascending());
        assert!(reloaded.folders_ascending());
    }

    #[test]
    fn cleared_initial_dir_round_trips_as_empty() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings_in(&dir);
        settings.set_folder_browser_initial_dir("/music");
        settings.set_folder_browser_initial_dir("");
        let reloaded = settings_in(&dir);
        assert_eq!(reloaded.folder_browser_initial_dir(), Some(String::new()));
    }

    #[test]
    fn invalid_toml_degrades_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "this is { not valid toml").unwrap();
        let settings = TomlSettings::load(&path);
        assert_eq!(settings.files_sort_order(), FileSortOrder::Default);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[browser]
files_sort = "size"

[ui]
theme = "light"
"#,
        )
        .unwrap();
        let settings = TomlSettings::load(&path);
        assert_eq!(settings.files_sort_order(), FileSortOrder::Size);
        assert_eq!(settings.theme_scheme(), "light");
        assert!(settings.files_ascending());
        assert_eq!(settings.folders_sort_order(), FolderSortOrder::Default);
    }

    #[test]
    fn unknown_sort_strings_fall_back_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[browser]\nfiles_sort = \"mystery\"\n").unwrap();
        let settings = TomlSettings::load(&path);
        assert_eq!(settings.files_sort_order(), FileSortOrder::Default);
    }

    #[test]
    fn extension_override_is_exposed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[filter]\nextensions = [\"mp3\", \"mod\"]\n").unwrap();
        let settings = TomlSettings::load(&path);
        assert_eq!(
            settings.extensions(),
            Some(&["mp3".to_string(), "mod".to_string()][..])
        );
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("settings.toml");
        let mut settings = TomlSettings::load(&path);
        settings.set_files_ascending(false);
        assert!(path.exists());
    }
}
