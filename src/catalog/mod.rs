//! Song catalog
//!
//! Enumerates the audio files available to the user, either by scanning the
//! configured songs directory or by taking individually picked files, and
//! normalizes them into the unified `Song` model.

use crate::error::{Error, Result};
use crate::model::{Song, SongId};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported audio file extensions (matched case-insensitively)
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// The set of songs currently known to the application
#[derive(Debug, Default)]
pub struct SongCatalog {
    songs: Vec<Song>,
}

impl SongCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a directory for supported audio files and replace the catalog
    /// contents with the result.
    ///
    /// The scan is flat: subdirectories are not descended into. Results are
    /// sorted by file name so the listing is stable across runs.
    pub fn scan(&mut self, dir: &Path) -> Result<&[Song]> {
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut songs = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_supported(path) {
                songs.push(Song::from_path(path.to_path_buf()));
            } else {
                log::debug!("Skipping unsupported entry: {:?}", path);
            }
        }

        songs.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        log::info!("Scanned {} songs from {:?}", songs.len(), dir);
        self.songs = songs;
        Ok(&self.songs)
    }

    /// Register a single interactively picked file.
    ///
    /// Assigns the picked file a fresh stable id even when its display name
    /// duplicates an existing song's. Picking the same path twice yields the
    /// same song record.
    pub fn add_picked(&mut self, path: PathBuf) -> Song {
        let song = Song::from_path(path);
        if self.get(&song.id).is_none() {
            self.songs.push(song.clone());
        }
        log::debug!("Picked song {} ({})", song.display_name, song.id);
        song
    }

    /// Resolve a song id against the catalog.
    pub fn get(&self, id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|s| &s.id == id)
    }

    /// All catalogued songs
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Total number of catalogued songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Check whether a path carries a supported audio extension
fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"dummy audio data").unwrap();
    }

    #[test]
    fn test_scan_filters_extensions_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.mp3");
        touch(tmp.path(), "b.WAV");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "cover.png");

        let mut catalog = SongCatalog::new();
        let songs = catalog.scan(tmp.path()).unwrap();

        let names: Vec<&str> = songs.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["a.mp3", "b.WAV"]);
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.mp3");
        fs::create_dir(tmp.path().join("nested")).unwrap();
        touch(&tmp.path().join("nested"), "deep.mp3");

        let mut catalog = SongCatalog::new();
        catalog.scan(tmp.path()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.songs()[0].display_name, "top.mp3");
    }

    #[test]
    fn test_scan_missing_directory() {
        let mut catalog = SongCatalog::new();
        let err = catalog.scan(Path::new("/nonexistent/songs")).unwrap_err();
        assert!(matches!(err, Error::DirectoryNotFound(_)));
    }

    #[test]
    fn test_picked_duplicate_names_get_distinct_ids() {
        let mut catalog = SongCatalog::new();
        let a = catalog.add_picked(PathBuf::from("/one/track.mp3"));
        let b = catalog.add_picked(PathBuf::from("/two/track.mp3"));

        assert_eq!(a.display_name, b.display_name);
        assert_ne!(a.id, b.id);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_picking_same_path_twice_is_one_song() {
        let mut catalog = SongCatalog::new();
        let a = catalog.add_picked(PathBuf::from("/one/track.mp3"));
        let b = catalog.add_picked(PathBuf::from("/one/track.mp3"));

        assert_eq!(a.id, b.id);
        assert_eq!(catalog.len(), 1);
    }
}
