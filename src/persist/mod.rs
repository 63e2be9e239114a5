//! Durable playlist document
//!
//! All playlists live in one JSON document: an object mapping each playlist
//! name to its ordered array of song records. The object keeps the store's
//! insertion order (serde_json `preserve_order`), so a load after a save
//! lists playlists in the same order they were created.

use crate::error::{Error, Result};
use crate::model::{Playlist, Song};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads and writes the playlist document at a fixed path
#[derive(Debug, Clone)]
pub struct PlaylistFile {
    path: PathBuf,
}

impl PlaylistFile {
    /// Create a handle for the document at the given path. The file itself
    /// is only touched by `load` and `save`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the live document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all playlists from the document, in document order.
    ///
    /// A missing document is an empty collection, not an error. A document
    /// that exists but cannot be parsed raises `CorruptData` and is left on
    /// disk untouched for inspection.
    pub fn load(&self) -> Result<Vec<Playlist>> {
        if !self.path.exists() {
            log::info!("No playlist document at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| Error::Persistence(format!("reading {:?}: {e}", self.path)))?;

        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| Error::CorruptData(format!("{:?}: {e}", self.path)))?;

        let object = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::CorruptData(format!(
                    "{:?}: expected an object at the top level, found {}",
                    self.path,
                    json_kind(&other)
                )))
            }
        };

        let mut playlists = Vec::with_capacity(object.len());
        for (name, entries) in object {
            let entries: Vec<Song> = serde_json::from_value(entries).map_err(|e| {
                Error::CorruptData(format!("{:?}: playlist '{name}': {e}", self.path))
            })?;
            playlists.push(Playlist::new(name, entries));
        }

        log::info!(
            "Loaded {} playlists from {:?}",
            playlists.len(),
            self.path
        );
        Ok(playlists)
    }

    /// Write the full playlist collection as the new document.
    ///
    /// The document is written to a temporary file next to the live one and
    /// renamed into place, so a crash mid-write never truncates the previous
    /// document. If the rename fails the previous document is still intact.
    pub fn save(&self, playlists: &[Playlist]) -> Result<()> {
        let mut object = serde_json::Map::with_capacity(playlists.len());
        for playlist in playlists {
            let entries = serde_json::to_value(&playlist.entries)
                .map_err(|e| Error::Persistence(format!("serializing '{}': {e}", playlist.name)))?;
            object.insert(playlist.name.clone(), entries);
        }

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| Error::Persistence(format!("creating temp file in {dir:?}: {e}")))?;

        serde_json::to_writer_pretty(&mut tmp, &Value::Object(object))
            .map_err(|e| Error::Persistence(format!("writing {:?}: {e}", self.path)))?;
        tmp.flush()
            .map_err(|e| Error::Persistence(format!("flushing {:?}: {e}", self.path)))?;

        tmp.persist(&self.path)
            .map_err(|e| Error::Persistence(format!("replacing {:?}: {e}", self.path)))?;

        log::debug!(
            "Saved {} playlists to {:?}",
            playlists.len(),
            self.path
        );
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn song(name: &str) -> Song {
        Song::from_path(PathBuf::from(format!("/music/{name}")))
    }

    #[test]
    fn test_load_missing_document_is_empty() {
        let tmp = TempDir::new().unwrap();
        let file = PlaylistFile::new(tmp.path().join("playlists.json"));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_names_order_and_entries() {
        let tmp = TempDir::new().unwrap();
        let file = PlaylistFile::new(tmp.path().join("playlists.json"));

        let playlists = vec![
            Playlist::new("Zebra".to_string(), vec![song("c.mp3"), song("a.mp3")]),
            Playlist::new("Alpha".to_string(), vec![song("b.wav")]),
        ];

        file.save(&playlists).unwrap();
        let loaded = file.load().unwrap();

        assert_eq!(loaded, playlists);
    }

    #[test]
    fn test_corrupt_document_is_rejected_and_left_on_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("playlists.json");
        fs::write(&path, "{ not json").unwrap();

        let file = PlaylistFile::new(path.clone());
        let err = file.load().unwrap_err();
        assert!(matches!(err, Error::CorruptData(_)));

        // The bad file must survive for inspection
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("playlists.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let file = PlaylistFile::new(path);
        assert!(matches!(file.load().unwrap_err(), Error::CorruptData(_)));
    }

    #[test]
    fn test_save_replaces_previous_document() {
        let tmp = TempDir::new().unwrap();
        let file = PlaylistFile::new(tmp.path().join("playlists.json"));

        file.save(&[Playlist::new("Old".to_string(), vec![song("a.mp3")])])
            .unwrap();
        file.save(&[Playlist::new("New".to_string(), vec![song("b.mp3")])])
            .unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "New");
    }
}
