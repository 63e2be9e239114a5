//! Playback position state machine
//!
//! Tracks which playlist and entry are current and whether playback is
//! active. The controller reads the playlist snapshot from the store on
//! every call, so removals between calls take effect immediately, and it
//! issues load-and-play/stop commands to the audio device. It owns no audio
//! state itself.

mod device;

pub use device::{AudioDevice, LogDevice};

use crate::error::{Error, Result};
use crate::model::Playlist;
use crate::store::PlaylistStore;

/// Whether the device was told to play or to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Transient playback position, never persisted.
///
/// Exists from the first playlist selection until the process ends or a
/// different playlist is selected.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Name of the active playlist
    pub playlist: String,

    /// Index of the current entry within the active playlist
    pub current_index: usize,

    /// Current machine state
    pub state: PlaybackState,
}

/// Two-state machine driving the audio device from a playlist
pub struct PlaybackController<D: AudioDevice> {
    device: D,
    session: Option<PlaybackSession>,
}

impl<D: AudioDevice> PlaybackController<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            session: None,
        }
    }

    /// The current session, if a playlist has been selected
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Make a playlist the active one.
    ///
    /// Always resets the position to entry 0 and forces Stopped; switching
    /// playlists drops any in-progress playback.
    pub fn select_playlist(&mut self, store: &PlaylistStore, name: &str) -> Result<()> {
        if store.get(name).is_none() {
            return Err(Error::NotFound(format!("playlist '{name}'")));
        }

        if matches!(
            self.session,
            Some(PlaybackSession {
                state: PlaybackState::Playing,
                ..
            })
        ) {
            self.device.stop();
        }

        log::info!("Selected playlist '{name}'");
        self.session = Some(PlaybackSession {
            playlist: name.to_string(),
            current_index: 0,
            state: PlaybackState::Stopped,
        });
        Ok(())
    }

    /// Start playing, either at an explicit entry index or at the current
    /// position. Transitions to Playing and emits load-and-play for the
    /// resolved song.
    pub fn play(&mut self, store: &PlaylistStore, index: Option<usize>) -> Result<usize> {
        let session = self.session_mut()?;
        let playlist = active_playlist(store, &session.playlist)?;

        if playlist.is_empty() {
            return Err(Error::EmptyPlaylist(session.playlist.clone()));
        }

        let resolved = match index {
            Some(i) if i >= playlist.len() => {
                return Err(Error::Validation(format!(
                    "index {i} is out of bounds for '{}' ({} entries)",
                    session.playlist,
                    playlist.len()
                )))
            }
            Some(i) => i,
            // The pointer may sit past the end after removals; wrap it.
            None => session.current_index % playlist.len(),
        };

        let song = &playlist.entries[resolved];
        log::info!(
            "Playing entry {resolved} of '{}': {}",
            session.playlist,
            song.display_name
        );

        session.current_index = resolved;
        session.state = PlaybackState::Playing;
        self.device.load_and_play(&song.source_path);
        Ok(resolved)
    }

    /// Stop playback. Idempotent: always transitions to Stopped and emits a
    /// stop command, whatever the current state.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.state = PlaybackState::Stopped;
        }
        log::info!("Playback stopped");
        self.device.stop();
    }

    /// Advance to the next entry, wrapping at the end. When Playing, the
    /// newly selected entry starts immediately; when Stopped, only the
    /// pointer moves.
    pub fn next(&mut self, store: &PlaylistStore) -> Result<usize> {
        self.step(store, Direction::Forward)
    }

    /// Step back to the previous entry, wrapping at the start. Same
    /// Playing/Stopped behavior as `next`.
    pub fn previous(&mut self, store: &PlaylistStore) -> Result<usize> {
        self.step(store, Direction::Backward)
    }

    fn step(&mut self, store: &PlaylistStore, direction: Direction) -> Result<usize> {
        let session = self.session_mut()?;
        let playlist = active_playlist(store, &session.playlist)?;

        let len = playlist.len();
        if len == 0 {
            return Err(Error::EmptyPlaylist(session.playlist.clone()));
        }

        session.current_index = match direction {
            Direction::Forward => (session.current_index + 1) % len,
            Direction::Backward => (session.current_index + len - 1) % len,
        };
        let resolved = session.current_index;

        if session.state == PlaybackState::Playing {
            let song = &playlist.entries[resolved];
            log::info!(
                "Playing entry {resolved} of '{}': {}",
                session.playlist,
                song.display_name
            );
            self.device.load_and_play(&song.source_path);
        } else {
            log::debug!("Moved pointer to entry {resolved} (stopped)");
        }

        Ok(resolved)
    }

    fn session_mut(&mut self) -> Result<&mut PlaybackSession> {
        self.session
            .as_mut()
            .ok_or_else(|| Error::Validation("no playlist selected".into()))
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// Re-read the active playlist from the store at call time.
///
/// The playlist may have been deleted since it was selected.
fn active_playlist<'a>(store: &'a PlaylistStore, name: &str) -> Result<&'a Playlist> {
    store
        .get(name)
        .ok_or_else(|| Error::NotFound(format!("playlist '{name}'")))
}
