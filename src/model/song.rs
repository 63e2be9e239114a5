use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Stable, opaque identifier for a song.
///
/// Assigned once at catalog time and used for every lookup and removal.
/// Display names are presentation only; two files sharing a name still get
/// distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Derive the id for a song at the given source path.
    ///
    /// The id is the md5 hex digest of the path, so it is stable across
    /// scans and unique per file location.
    pub fn from_path(path: &Path) -> Self {
        Self(format!(
            "{:x}",
            md5::compute(path.to_string_lossy().as_bytes())
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SongId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Represents a single catalogued song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique identifier for this song
    pub id: SongId,

    /// Name shown to the user (the file name)
    pub display_name: String,

    /// Path to the audio file
    pub source_path: PathBuf,
}

impl Song {
    /// Build a song record for an audio file path.
    pub fn from_path(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self {
            id: SongId::from_path(&path),
            display_name,
            source_path: path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_stable() {
        let a = SongId::from_path(Path::new("/music/track.mp3"));
        let b = SongId::from_path(Path::new("/music/track.mp3"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_name_different_path_gets_distinct_ids() {
        let a = Song::from_path(PathBuf::from("/music/a/track.mp3"));
        let b = Song::from_path(PathBuf::from("/music/b/track.mp3"));
        assert_eq!(a.display_name, b.display_name);
        assert_ne!(a.id, b.id);
    }
}
