//! Audio output device seam
//!
//! The core never decodes or mixes audio. It addresses the output device
//! through two fire-and-forget commands; the device owns its own buffering
//! and start/stop behavior.

use std::path::Path;

/// Audio output device - allows swapping between the real sink and stubs
pub trait AudioDevice {
    /// Load the file at `path` and start playing it
    fn load_and_play(&mut self, path: &Path);

    /// Stop whatever is currently playing
    fn stop(&mut self);
}

/// Device stub that only logs the commands it receives.
///
/// Stands in for a real audio sink in the CLI; useful anywhere playback
/// behavior matters but sound output does not.
#[derive(Debug, Default)]
pub struct LogDevice;

impl LogDevice {
    pub fn new() -> Self {
        Self
    }
}

impl AudioDevice for LogDevice {
    fn load_and_play(&mut self, path: &Path) {
        log::info!("[audio] load and play {:?}", path);
    }

    fn stop(&mut self) {
        log::info!("[audio] stop");
    }
}
