//! Sort orders and comparators for directory listings.
//!
//! Folders and files are sorted independently, each by its own key, and each
//! group's descending presentation is a full reversal of the already-sorted
//! group rather than a re-sort — ties therefore come out in reverse scan
//! order instead of being re-broken by a secondary key.

use std::cmp::Ordering;

use crate::browser::entry::{FileEntry, FolderEntry};

/// Sort key for playable files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSortOrder {
    Size,
    FileName,
    ArtistName,
    AlbumName,
    TrackName,
    /// Discography order: artist, then album, then track number.
    #[default]
    Default,
}

impl FileSortOrder {
    /// Parse from a settings string; anything unrecognized falls back to Default.
    pub fn from_str(s: &str) -> Self {
        match s {
            "size" => FileSortOrder::Size,
            "file_name" => FileSortOrder::FileName,
            "artist_name" => FileSortOrder::ArtistName,
            "album_name" => FileSortOrder::AlbumName,
            "track_name" => FileSortOrder::TrackName,
            _ => FileSortOrder::Default,
        }
    }

    /// The settings string for this sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileSortOrder::Size => "size",
            FileSortOrder::FileName => "file_name",
            FileSortOrder::ArtistName => "artist_name",
            FileSortOrder::AlbumName => "album_name",
            FileSortOrder::TrackName => "track_name",
            FileSortOrder::Default => "default",
        }
    }

    /// Get the display label for the current sort.
    pub fn label(&self) -> &'static str {
        match self {
            FileSortOrder::Size => "Size",
            FileSortOrder::FileName => "Name",
            FileSortOrder::ArtistName => "Artist",
            FileSortOrder::AlbumName => "Album",
            FileSortOrder::TrackName => "Title",
            FileSortOrder::Default => "Track",
        }
    }

    /// Cycle to the next sort option.
    pub fn next(&self) -> Self {
        match self {
            FileSortOrder::Default => FileSortOrder::Size,
            FileSortOrder::Size => FileSortOrder::FileName,
            FileSortOrder::FileName => FileSortOrder::ArtistName,
            FileSortOrder::ArtistName => FileSortOrder::AlbumName,
            FileSortOrder::AlbumName => FileSortOrder::TrackName,
            FileSortOrder::TrackName => FileSortOrder::Default,
        }
    }
}

/// Sort key for folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderSortOrder {
    /// By sub-folder count, then sub-file count, both descending.
    Count,
    /// Alphabetical (case-insensitive).
    #[default]
    Default,
}

impl FolderSortOrder {
    pub fn from_str(s: &str) -> Self {
        match s {
            "count" => FolderSortOrder::Count,
            _ => FolderSortOrder::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderSortOrder::Count => "count",
            FolderSortOrder::Default => "default",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FolderSortOrder::Count => "Count",
            FolderSortOrder::Default => "Name",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FolderSortOrder::Default => FolderSortOrder::Count,
            FolderSortOrder::Count => FolderSortOrder::Default,
        }
    }
}

/// Case-insensitive string comparison.
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Compare two optional tag strings, case-insensitively when both are present.
///
/// A missing key compares `Greater` no matter which side it is on; two
/// missing keys tie. Untagged files therefore drift toward the end of a
/// stable sort. This is intentionally not a total order, so it is never used
/// to sort a list on its own without the surrounding key chain.
pub fn cmp_optional_ignore_case(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => cmp_ignore_case(a, b),
    }
}

/// Compare two file entries under the given sort key.
pub fn compare_files(a: &FileEntry, b: &FileEntry, order: FileSortOrder) -> Ordering {
    match order {
        FileSortOrder::Size => b.size_bytes.cmp(&a.size_bytes),
        FileSortOrder::FileName => cmp_ignore_case(&a.name, &b.name),
        FileSortOrder::ArtistName => {
            cmp_optional_ignore_case(a.tag.artist.as_deref(), b.tag.artist.as_deref())
        }
        FileSortOrder::AlbumName => {
            cmp_optional_ignore_case(a.tag.album.as_deref(), b.tag.album.as_deref())
        }
        FileSortOrder::TrackName => {
            cmp_optional_ignore_case(a.tag.title.as_deref(), b.tag.title.as_deref())
        }
        FileSortOrder::Default => {
            cmp_optional_ignore_case(a.tag.artist.as_deref(), b.tag.artist.as_deref())
                .then_with(|| {
                    cmp_optional_ignore_case(a.tag.album.as_deref(), b.tag.album.as_deref())
                })
                .then_with(|| {
                    // A missing track number compares as zero, so untracked
                    // files land ahead of track 1 within an album.
                    a.tag
                        .track_number
                        .unwrap_or(0)
                        .cmp(&b.tag.track_number.unwrap_or(0))
                })
        }
    }
}

/// Compare two folder entries under the given sort key.
pub fn compare_folders(a: &FolderEntry, b: &FolderEntry, order: FolderSortOrder) -> Ordering {
    match order {
        FolderSortOrder::Count => b
            .sub_folder_count
            .cmp(&a.sub_folder_count)
            .then_with(|| b.sub_file_count.cmp(&a.sub_file_count)),
        FolderSortOrder::Default => cmp_ignore_case(&a.name, &b.name),
    }
}

/// Stable-sort file entries in place by the given key.
pub fn sort_files(files: &mut [FileEntry], order: FileSortOrder) {
    files.sort_by(|a, b| compare_files(a, b, order));
}

/// Stable-sort folder entries in place by the given key.
pub fn sort_folders(folders: &mut [FolderEntry], order: FolderSortOrder) {
    folders.sort_by(|a, b| compare_folders(a, b, order));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::entry::TagInfo;
    use std::path::PathBuf;

    fn file(name: &str, size: u64, tag: TagInfo) -> FileEntry {
        FileEntry {
            path: PathBuf::from(format!("/music/{name}.mp3")),
            name: name.to_string(),
            size_bytes: size,
            extension: "mp3".into(),
            tag,
        }
    }

    fn tag(track: Option<u32>, artist: Option<&str>, album: Option<&str>) -> TagInfo {
        TagInfo {
            track_number: track,
            artist: artist.map(str::to_string),
            album: album.map(str::to_string),
            title: None,
        }
    }

    fn folder(name: &str, sub_folders: usize, sub_files: usize) -> FolderEntry {
        FolderEntry {
            path: PathBuf::from(format!("/music/{name}")),
            name: name.to_string(),
            sub_folder_count: sub_folders,
            sub_file_count: sub_files,
        }
    }

    #[test]
    fn file_sort_order_string_round_trip() {
        for order in [
            FileSortOrder::Size,
            FileSortOrder::FileName,
            FileSortOrder::ArtistName,
            FileSortOrder::AlbumName,
            FileSortOrder::TrackName,
            FileSortOrder::Default,
        ] {
            assert_eq!(FileSortOrder::from_str(order.as_str()), order);
        }
        assert_eq!(FileSortOrder::from_str("garbage"), FileSortOrder::Default);
    }

    #[test]
    fn folder_sort_order_string_round_trip() {
        assert_eq!(FolderSortOrder::from_str("count"), FolderSortOrder::Count);
        assert_eq!(
            FolderSortOrder::from_str("default"),
            FolderSortOrder::Default
        );
        assert_eq!(
            FolderSortOrder::from_str("garbage"),
            FolderSortOrder::Default
        );
    }

    #[test]
    fn file_sort_cycle_visits_every_mode() {
        let mut order = FileSortOrder::Default;
        let mut seen = vec![order];
        loop {
            order = order.next();
            if order == FileSortOrder::Default {
                break;
            }
            seen.push(order);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn optional_compare_missing_key_is_greater_from_either_side() {
        assert_eq!(
            cmp_optional_ignore_case(None, Some("abba")),
            Ordering::Greater
        );
        assert_eq!(
            cmp_optional_ignore_case(Some("abba"), None),
            Ordering::Greater
        );
        assert_eq!(cmp_optional_ignore_case(None, None), Ordering::Equal);
    }

    #[test]
    fn optional_compare_is_case_insensitive_when_present() {
        assert_eq!(
            cmp_optional_ignore_case(Some("ABBA"), Some("abba")),
            Ordering::Equal
        );
        assert_eq!(
            cmp_optional_ignore_case(Some("abba"), Some("Beatles")),
            Ordering::Less
        );
    }

    #[test]
    fn size_sort_is_descending() {
        let mut files = vec![
            file("small", 10, TagInfo::default()),
            file("big", 1000, TagInfo::default()),
            file("mid", 100, TagInfo::default()),
        ];
        sort_files(&mut files, FileSortOrder::Size);
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["big", "mid", "small"]);
    }

    #[test]
    fn file_name_sort_is_case_insensitive() {
        let mut files = vec![
            file("beta", 0, TagInfo::default()),
            file("Alpha", 0, TagInfo::default()),
            file("gamma", 0, TagInfo::default()),
        ];
        sort_files(&mut files, FileSortOrder::FileName);
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn default_sort_orders_by_artist_album_track() {
        let mut files = vec![
            file("c", 0, tag(Some(2), Some("Zeta"), Some("First"))),
            file("a", 0, tag(Some(2), Some("Abba"), Some("Gold"))),
            file("b", 0, tag(Some(1), Some("Abba"), Some("Gold"))),
            file("d", 0, tag(Some(1), Some("Zeta"), Some("First"))),
        ];
        sort_files(&mut files, FileSortOrder::Default);
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "d", "c"]);
    }

    #[test]
    fn default_sort_missing_track_number_compares_as_zero() {
        let mut files = vec![
            file("one", 0, tag(Some(1), Some("Abba"), Some("Gold"))),
            file("untracked", 0, tag(None, Some("Abba"), Some("Gold"))),
        ];
        sort_files(&mut files, FileSortOrder::Default);
        assert_eq!(files[0].name, "untracked");
        assert_eq!(files[1].name, "one");
    }

    #[test]
    fn count_sort_is_folder_count_dominant() {
        let mut folders = vec![
            folder("Jazz", 0, 5),
            folder("Rock", 2, 3),
            folder("Pop", 2, 7),
        ];
        sort_folders(&mut folders, FolderSortOrder::Count);
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        // Folder count decides first; file count breaks the tie, both descending.
        assert_eq!(names, ["Pop", "Rock", "Jazz"]);
    }

    #[test]
    fn default_folder_sort_is_alphabetic() {
        let mut folders = vec![folder("rock", 0, 0), folder("Jazz", 0, 0)];
        sort_folders(&mut folders, FolderSortOrder::Default);
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Jazz", "rock"]);
    }

    #[test]
    fn sort_is_stable_over_equal_keys() {
        let mut files = vec![
            file("first", 50, TagInfo::default()),
            file("second", 50, TagInfo::default()),
        ];
        sort_files(&mut files, FileSortOrder::Size);
        assert_eq!(files[0].name, "first");
        assert_eq!(files[1].name, "second");
    }
}
