//! Error types shared across the crate

use std::path::PathBuf;

/// Errors produced by catalog, store, persistence and playback operations.
///
/// All of these are recoverable at the shell boundary: the CLI reports them
/// and keeps going where that makes sense. None terminate the process from
/// inside the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad input: empty name, duplicate playlist name, out-of-range index,
    /// empty song selection.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Unknown playlist, or a song id the catalog never produced.
    #[error("not found: {0}")]
    NotFound(String),

    /// Playback was requested on a playlist with zero entries.
    #[error("playlist '{0}' has no songs")]
    EmptyPlaylist(String),

    /// The scan root does not exist or is not a directory.
    #[error("songs directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),

    /// The durable document exists but could not be parsed. The file is
    /// left on disk untouched for inspection.
    #[error("playlist document is corrupt: {0}")]
    CorruptData(String),

    /// Writing the durable document failed. The previous document is still
    /// intact and the in-memory store was not committed.
    #[error("failed to persist playlists: {0}")]
    Persistence(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
