use std::path::{Path, PathBuf};

/// Display name of the synthetic parent link, also used as the path marker
/// appended to the listed directory's own path.
pub const PARENT_MARKER: &str = "..";

/// Embedded audio metadata for a playable file. Every field is optional:
/// a file with an unreadable or absent tag still gets a `TagInfo` with all
/// fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInfo {
    pub track_number: Option<u32>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
}

/// A traversable folder in a listing, with audio-filtered counts of its own
/// immediate children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub path: PathBuf,
    pub name: String,
    pub sub_folder_count: usize,
    pub sub_file_count: usize,
}

/// A playable audio file in a listing.
///
/// `name` is the display name with the extension stripped; `extension` is
/// always non-empty — candidates without one are not considered audio and
/// never become a `FileEntry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub extension: String,
    pub tag: TagInfo,
}

/// The synthetic parent-navigation link, present iff the listed directory is
/// not a filesystem root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentEntry {
    pub path: PathBuf,
    pub name: String,
}

impl ParentEntry {
    /// Build the parent link for the given directory: the directory's own
    /// path suffixed with the parent marker.
    pub fn for_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(PARENT_MARKER),
            name: PARENT_MARKER.to_string(),
        }
    }
}

/// One row in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Folder(FolderEntry),
    File(FileEntry),
    Parent(ParentEntry),
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::Folder(f) => &f.path,
            Entry::File(f) => &f.path,
            Entry::Parent(p) => &p.path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Folder(f) => &f.name,
            Entry::File(f) => &f.name,
            Entry::Parent(p) => &p.name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Entry::Folder(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }

    pub fn is_parent(&self) -> bool {
        matches!(self, Entry::Parent(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_entry_path_carries_marker() {
        let parent = ParentEntry::for_dir(Path::new("/music"));
        assert_eq!(parent.path, PathBuf::from("/music/.."));
        assert_eq!(parent.name, "..");
    }

    #[test]
    fn entry_accessors_dispatch_by_variant() {
        let folder = Entry::Folder(FolderEntry {
            path: PathBuf::from("/music/Rock"),
            name: "Rock".into(),
            sub_folder_count: 2,
            sub_file_count: 3,
        });
        assert_eq!(folder.name(), "Rock");
        assert_eq!(folder.path(), Path::new("/music/Rock"));
        assert!(folder.is_folder());
        assert!(!folder.is_file());

        let file = Entry::File(FileEntry {
            path: PathBuf::from("/music/intro.mp3"),
            name: "intro".into(),
            size_bytes: 42,
            extension: "mp3".into(),
            tag: TagInfo::default(),
        });
        assert_eq!(file.name(), "intro");
        assert!(file.is_file());

        let parent = Entry::Parent(ParentEntry::for_dir(Path::new("/music")));
        assert!(parent.is_parent());
        assert_eq!(parent.name(), "..");
    }

    #[test]
    fn default_tag_info_is_all_empty() {
        let tag = TagInfo::default();
        assert!(tag.track_number.is_none());
        assert!(tag.artist.is_none());
        assert!(tag.album.is_none());
        assert!(tag.title.is_none());
    }
}
