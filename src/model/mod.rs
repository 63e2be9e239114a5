//! Unified data model for the song and playlist domain
//!
//! This module defines data structures that are independent of both input
//! (directory scan, file picker) and output (durable document, audio
//! device) concerns.

mod playlist;
mod song;

pub use playlist::Playlist;
pub use song::{Song, SongId};
