//! Tunedeck - local song cataloging and playlist playback
//!
//! The library holds the full core: the song catalog, the playlist store
//! with its durable JSON document, and the playback position state machine.
//! Front ends drive it through `Session::dispatch` and render the outcomes.

pub mod catalog;
pub mod error;
pub mod model;
pub mod persist;
pub mod playback;
pub mod session;
pub mod store;

pub use error::{Error, Result};
pub use session::{Command, Outcome, Session};
