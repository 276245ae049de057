//! The audio-relevant filter: decides which children of a directory show up
//! in a listing (traversable folders and files with a recognized audio
//! extension). Hidden (dot-prefixed) entries are excluded.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions recognized as audio when no override is configured.
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "m4a", "aac", "flac", "ogg", "opus", "wav", "wma", "aiff", "ape",
];

/// Predicate over directory children selecting the audio-relevant subset.
#[derive(Debug, Clone)]
pub struct AudioFilter {
    extensions: HashSet<String>,
}

impl Default for AudioFilter {
    fn default() -> Self {
        Self::with_extensions(DEFAULT_AUDIO_EXTENSIONS.iter().map(|s| s.to_string()))
    }
}

impl AudioFilter {
    /// Build a filter from an explicit extension list (lowercased on entry).
    pub fn with_extensions<I: IntoIterator<Item = String>>(extensions: I) -> Self {
        Self {
            extensions: extensions.into_iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// Whether a single child is audio-relevant.
    ///
    /// `is_dir` comes from the caller so a directory read is not repeated.
    pub fn is_audio_relevant(&self, path: &Path, is_dir: bool) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        if name.starts_with('.') {
            return false;
        }
        if is_dir {
            return true;
        }
        path.extension()
            .map(|ext| self.extensions.contains(&ext.to_string_lossy().to_lowercase()))
            .unwrap_or(false)
    }

    /// The immediate audio-relevant children of a directory.
    ///
    /// A missing or unreadable directory yields an empty list, never an
    /// error; unreadable individual entries are skipped.
    pub fn children(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut children = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let path = entry.path();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if self.is_audio_relevant(&path, is_dir) {
                children.push(path);
            }
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn setup_music_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Rock")).unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        File::create(dir.path().join("track.mp3")).unwrap();
        File::create(dir.path().join("loud.FLAC")).unwrap();
        File::create(dir.path().join("cover.jpg")).unwrap();
        File::create(dir.path().join("README")).unwrap();
        File::create(dir.path().join(".hidden.mp3")).unwrap();
        dir
    }

    #[test]
    fn accepts_directories_and_audio_extensions() {
        let filter = AudioFilter::default();
        assert!(filter.is_audio_relevant(Path::new("/music/Rock"), true));
        assert!(filter.is_audio_relevant(Path::new("/music/a.mp3"), false));
        assert!(filter.is_audio_relevant(Path::new("/music/a.FLAC"), false));
    }

    #[test]
    fn rejects_non_audio_and_hidden() {
        let filter = AudioFilter::default();
        assert!(!filter.is_audio_relevant(Path::new("/music/cover.jpg"), false));
        assert!(!filter.is_audio_relevant(Path::new("/music/README"), false));
        assert!(!filter.is_audio_relevant(Path::new("/music/.hidden.mp3"), false));
        assert!(!filter.is_audio_relevant(Path::new("/music/.cache"), true));
    }

    #[test]
    fn children_returns_filtered_set() {
        let dir = setup_music_dir();
        let filter = AudioFilter::default();
        let mut names: Vec<String> = filter
            .children(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["Rock", "loud.FLAC", "track.mp3"]);
    }

    #[test]
    fn children_of_missing_directory_is_empty() {
        let filter = AudioFilter::default();
        assert!(filter.children(Path::new("/nonexistent/music")).is_empty());
    }

    #[test]
    fn custom_extension_list_overrides_default() {
        let filter = AudioFilter::with_extensions(vec!["mod".to_string()]);
        assert!(filter.is_audio_relevant(Path::new("/m/song.mod"), false));
        assert!(!filter.is_audio_relevant(Path::new("/m/song.mp3"), false));
    }
}
