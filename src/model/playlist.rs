use super::{Song, SongId};
use serde::{Deserialize, Serialize};

/// Represents a playlist
///
/// Entries are full song records kept in insertion/reorder order. The same
/// song may appear more than once; each occurrence is a separate entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist name (unique key within the store)
    pub name: String,

    /// Playlist entries (ordered)
    pub entries: Vec<Song>,
}

impl Playlist {
    /// Create a playlist with an initial selection of songs.
    pub fn new(name: String, entries: Vec<Song>) -> Self {
        Self { name, entries }
    }

    /// Append a song to the end of the entry sequence.
    pub fn push(&mut self, song: Song) {
        self.entries.push(song);
    }

    /// Remove every entry matching the given id. Returns how many were
    /// removed.
    pub fn remove_all(&mut self, id: &SongId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|s| &s.id != id);
        before - self.entries.len()
    }

    /// Number of entries in this playlist
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn song(name: &str) -> Song {
        Song::from_path(PathBuf::from(format!("/music/{name}")))
    }

    #[test]
    fn test_push_keeps_order() {
        let mut p = Playlist::new("Mix".to_string(), vec![song("a.mp3")]);
        p.push(song("b.mp3"));
        assert_eq!(p.len(), 2);
        assert_eq!(p.entries[0].display_name, "a.mp3");
        assert_eq!(p.entries[1].display_name, "b.mp3");
    }

    #[test]
    fn test_remove_all_removes_every_occurrence() {
        let dup = song("a.mp3");
        let mut p = Playlist::new(
            "Mix".to_string(),
            vec![dup.clone(), song("b.mp3"), dup.clone()],
        );
        assert_eq!(p.remove_all(&dup.id), 2);
        assert_eq!(p.len(), 1);
        assert_eq!(p.entries[0].display_name, "b.mp3");
    }
}
