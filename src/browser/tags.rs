//! Tag metadata extraction using Lofty.

use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::Accessor;

use crate::browser::entry::TagInfo;

/// Tag-reading collaborator. Implementations must be best-effort: a failed
/// read is `None`, never an error that could fail a whole listing.
pub trait TagReader: Send {
    fn read(&self, path: &Path) -> Option<TagInfo>;
}

/// Reads embedded tags through Lofty's format probe.
#[derive(Debug, Default)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read(&self, path: &Path) -> Option<TagInfo> {
        let tagged_file = Probe::open(path).ok()?.read().ok()?;
        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag())?;

        Some(TagInfo {
            track_number: tag.track(),
            artist: non_empty(tag.artist().as_deref()),
            album: non_empty(tag.album().as_deref()),
            title: non_empty(tag.title().as_deref()),
        })
    }
}

/// Treat an absent or blank tag frame as no value at all.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn non_empty_drops_blank_frames() {
        assert_eq!(non_empty(Some("Abba")), Some("Abba".to_string()));
        assert_eq!(non_empty(Some("  trimmed ")), Some("trimmed".to_string()));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn unreadable_file_yields_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("not_audio.mp3");
        File::create(&path).unwrap();
        // An empty file is not probeable audio; the reader must not error out.
        assert!(LoftyTagReader.read(&path).is_none());
    }

    #[test]
    fn missing_file_yields_none() {
        assert!(LoftyTagReader.read(Path::new("/nonexistent/x.mp3")).is_none());
    }
}
