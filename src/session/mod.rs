//! Command dispatch surface
//!
//! The UI shell (CLI, or any other front end) talks to the core through
//! discrete commands and renders the typed outcomes. The session owns the
//! catalog, the store and the playback controller and wires them together;
//! it is the only place where song ids are resolved against the catalog, so
//! a playlist can never acquire an id the catalog has not produced.

use crate::catalog::SongCatalog;
use crate::error::{Error, Result};
use crate::model::{Song, SongId};
use crate::playback::{AudioDevice, PlaybackController, PlaybackState};
use crate::store::PlaylistStore;

/// A discrete user action against the core
#[derive(Debug, Clone)]
pub enum Command {
    CreatePlaylist { name: String, song_ids: Vec<SongId> },
    AddSong { playlist: String, song_id: SongId },
    RemoveSong { playlist: String, song_id: SongId },
    Reorder { playlist: String, from: usize, to: usize },
    DeletePlaylist { name: String },
    SelectPlaylist { name: String },
    Play { index: Option<usize> },
    Stop,
    Next,
    Previous,
    ListPlaylists,
    ShowPlaylist { name: String },
}

/// What a renderer needs to show after a successful command
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Playlist names in creation order
    Playlists(Vec<String>),

    /// One playlist's entries in order
    Entries { name: String, entries: Vec<Song> },

    /// A store mutation went through and was persisted
    Changed { playlist: String },

    /// Playback position after select/play/next/previous
    Position {
        playlist: String,
        index: usize,
        state: PlaybackState,
    },

    /// Playback was stopped
    Stopped,
}

/// One user's live session: catalog, store and playback controller
pub struct Session<D: AudioDevice> {
    catalog: SongCatalog,
    store: PlaylistStore,
    controller: PlaybackController<D>,
}

impl<D: AudioDevice> Session<D> {
    pub fn new(catalog: SongCatalog, store: PlaylistStore, device: D) -> Self {
        Self {
            catalog,
            store,
            controller: PlaybackController::new(device),
        }
    }

    /// The song catalog (scan results and picked files)
    pub fn catalog(&self) -> &SongCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut SongCatalog {
        &mut self.catalog
    }

    /// The playlist store
    pub fn store(&self) -> &PlaylistStore {
        &self.store
    }

    /// Execute one command and report what happened.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::CreatePlaylist { name, song_ids } => {
                let songs = self.resolve_all(&song_ids)?;
                self.store.create(&name, songs)?;
                Ok(Outcome::Changed { playlist: name })
            }

            Command::AddSong { playlist, song_id } => {
                let song = self.resolve(&song_id)?;
                self.store.add_song(&playlist, song)?;
                Ok(Outcome::Changed { playlist })
            }

            Command::RemoveSong { playlist, song_id } => {
                // Removal targets existing entries; the id does not need to
                // still be in the catalog.
                self.store.remove_song(&playlist, &song_id)?;
                Ok(Outcome::Changed { playlist })
            }

            Command::Reorder { playlist, from, to } => {
                self.store.reorder(&playlist, from, to)?;
                Ok(Outcome::Changed { playlist })
            }

            Command::DeletePlaylist { name } => {
                self.store.delete(&name)?;
                Ok(Outcome::Changed { playlist: name })
            }

            Command::SelectPlaylist { name } => {
                self.controller.select_playlist(&self.store, &name)?;
                Ok(Outcome::Position {
                    playlist: name,
                    index: 0,
                    state: PlaybackState::Stopped,
                })
            }

            Command::Play { index } => {
                let index = self.controller.play(&self.store, index)?;
                Ok(self.position(index))
            }

            Command::Stop => {
                self.controller.stop();
                Ok(Outcome::Stopped)
            }

            Command::Next => {
                let index = self.controller.next(&self.store)?;
                Ok(self.position(index))
            }

            Command::Previous => {
                let index = self.controller.previous(&self.store)?;
                Ok(self.position(index))
            }

            Command::ListPlaylists => Ok(Outcome::Playlists(self.store.list())),

            Command::ShowPlaylist { name } => {
                let playlist = self
                    .store
                    .get(&name)
                    .ok_or_else(|| Error::NotFound(format!("playlist '{name}'")))?;
                Ok(Outcome::Entries {
                    name,
                    entries: playlist.entries.clone(),
                })
            }
        }
    }

    fn position(&self, index: usize) -> Outcome {
        // Only reachable right after a successful controller call, so a
        // session exists.
        let session = self.controller.session().unwrap();
        Outcome::Position {
            playlist: session.playlist.clone(),
            index,
            state: session.state,
        }
    }

    fn resolve(&self, id: &SongId) -> Result<Song> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("song id {id}")))
    }

    fn resolve_all(&self, ids: &[SongId]) -> Result<Vec<Song>> {
        ids.iter().map(|id| self.resolve(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::PlaylistFile;
    use crate::playback::LogDevice;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn session(tmp: &TempDir) -> Session<LogDevice> {
        let mut catalog = SongCatalog::new();
        catalog.add_picked(PathBuf::from("/music/a.mp3"));
        catalog.add_picked(PathBuf::from("/music/b.mp3"));

        let store = PlaylistStore::new(PlaylistFile::new(tmp.path().join("playlists.json")));
        Session::new(catalog, store, LogDevice::new())
    }

    #[test]
    fn test_create_resolves_ids_against_catalog() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);
        let ids: Vec<SongId> = session.catalog().songs().iter().map(|s| s.id.clone()).collect();

        session
            .dispatch(Command::CreatePlaylist {
                name: "Mix".to_string(),
                song_ids: ids,
            })
            .unwrap();

        assert_eq!(session.store().get("Mix").unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_song_id_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);

        let err = session
            .dispatch(Command::CreatePlaylist {
                name: "Mix".to_string(),
                song_ids: vec![SongId::from("deadbeef".to_string())],
            })
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_select_then_play_reports_position() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);
        let ids: Vec<SongId> = session.catalog().songs().iter().map(|s| s.id.clone()).collect();

        session
            .dispatch(Command::CreatePlaylist {
                name: "Mix".to_string(),
                song_ids: ids,
            })
            .unwrap();
        session
            .dispatch(Command::SelectPlaylist {
                name: "Mix".to_string(),
            })
            .unwrap();

        let outcome = session.dispatch(Command::Play { index: None }).unwrap();
        match outcome {
            Outcome::Position {
                playlist,
                index,
                state,
            } => {
                assert_eq!(playlist, "Mix");
                assert_eq!(index, 0);
                assert_eq!(state, PlaybackState::Playing);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_show_unknown_playlist() {
        let tmp = TempDir::new().unwrap();
        let mut session = session(&tmp);
        let err = session
            .dispatch(Command::ShowPlaylist {
                name: "Nope".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
