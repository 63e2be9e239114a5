//! Playlist store
//!
//! Owns the in-memory playlist collection and its durability. Every
//! state-changing operation builds the updated collection, saves it through
//! the playlist document, and only then commits it to memory. A failed save
//! therefore leaves memory at the pre-mutation state; the in-memory store
//! and the durable copy never diverge.

use crate::error::{Error, Result};
use crate::model::{Playlist, Song, SongId};
use crate::persist::PlaylistFile;

/// All playlists, in creation order, backed by the durable document
#[derive(Debug)]
pub struct PlaylistStore {
    file: PlaylistFile,
    playlists: Vec<Playlist>,
}

impl PlaylistStore {
    /// Create an empty store backed by the given document.
    ///
    /// Used when there is no document yet, and by the shell when the
    /// existing document turned out to be corrupt (the bad file stays on
    /// disk until the next successful save).
    pub fn new(file: PlaylistFile) -> Self {
        Self {
            file,
            playlists: Vec::new(),
        }
    }

    /// Open the store by loading the document. Missing document means an
    /// empty store; a corrupt one surfaces as `CorruptData`.
    pub fn open(file: PlaylistFile) -> Result<Self> {
        let playlists = file.load()?;
        Ok(Self { file, playlists })
    }

    /// Create a new playlist from a non-empty song selection, preserving
    /// the selection order.
    pub fn create(&mut self, name: &str, songs: Vec<Song>) -> Result<&Playlist> {
        if name.is_empty() {
            return Err(Error::Validation("playlist name must not be empty".into()));
        }
        if self.get(name).is_some() {
            return Err(Error::Validation(format!(
                "playlist '{name}' already exists"
            )));
        }
        if songs.is_empty() {
            return Err(Error::Validation(
                "a new playlist needs at least one song".into(),
            ));
        }

        let mut updated = self.playlists.clone();
        updated.push(Playlist::new(name.to_string(), songs));
        self.commit(updated)?;

        log::info!("Created playlist '{name}'");
        Ok(self.playlists.last().unwrap())
    }

    /// Append a song to the end of a playlist. Duplicate entries are kept;
    /// the store never dedupes.
    pub fn add_song(&mut self, name: &str, song: Song) -> Result<()> {
        let index = self.index_of(name)?;

        let mut updated = self.playlists.clone();
        updated[index].push(song);
        self.commit(updated)?;

        log::info!("Added song to playlist '{name}'");
        Ok(())
    }

    /// Remove every occurrence of a song id from a playlist.
    ///
    /// An id that is not present is a no-op, not an error, and does not
    /// rewrite the document.
    pub fn remove_song(&mut self, name: &str, id: &SongId) -> Result<()> {
        let index = self.index_of(name)?;

        let mut updated = self.playlists.clone();
        let removed = updated[index].remove_all(id);
        if removed == 0 {
            log::debug!("Song {id} not in playlist '{name}', nothing to remove");
            return Ok(());
        }
        self.commit(updated)?;

        log::info!("Removed {removed} entries from playlist '{name}'");
        Ok(())
    }

    /// Move the entry at `from` to position `to`, shifting the entries in
    /// between and preserving all other relative order.
    pub fn reorder(&mut self, name: &str, from: usize, to: usize) -> Result<()> {
        let index = self.index_of(name)?;
        let len = self.playlists[index].len();

        if from >= len || to >= len {
            return Err(Error::Validation(format!(
                "reorder {from} -> {to} is out of bounds for '{name}' ({len} entries)"
            )));
        }
        if from == to {
            return Ok(());
        }

        let mut updated = self.playlists.clone();
        let entry = updated[index].entries.remove(from);
        updated[index].entries.insert(to, entry);
        self.commit(updated)?;

        log::info!("Moved entry {from} -> {to} in playlist '{name}'");
        Ok(())
    }

    /// Delete a playlist entirely.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let index = self.index_of(name)?;

        let mut updated = self.playlists.clone();
        updated.remove(index);
        self.commit(updated)?;

        log::info!("Deleted playlist '{name}'");
        Ok(())
    }

    /// Playlist names in creation order
    pub fn list(&self) -> Vec<String> {
        self.playlists.iter().map(|p| p.name.clone()).collect()
    }

    /// Look up a playlist by name
    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    /// Total number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.playlists
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| Error::NotFound(format!("playlist '{name}'")))
    }

    /// Persist the updated collection, then make it current. The in-memory
    /// state only changes once the document write succeeded.
    fn commit(&mut self, updated: Vec<Playlist>) -> Result<()> {
        self.file.save(&updated)?;
        self.playlists = updated;
        Ok(())
    }
}
