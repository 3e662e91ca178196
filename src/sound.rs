//! Sound Trigger: fire-and-restart playback for the six cue slots.
//!
//! Audio availability is decided once, when the trigger is built. Without a
//! backend the trigger is inert: loads record nothing playable and every
//! fire is a quiet no-op.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::event::{LogLevel, emit_event, emit_log};
use crate::state::{MatchState, SoundHandle};

/// How long a fired slot stays highlighted.
pub const FLASH_DURATION: Duration = Duration::from_millis(200);

/// Playback device seam.
pub trait AudioBackend {
    /// Decode a clip and keep it ready to play.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or decoded.
    fn load(&mut self, path: &Path) -> Result<SoundHandle>;

    /// Stop any playback of `handle` and play it again from the start.
    ///
    /// # Errors
    ///
    /// Returns an error when the handle is unknown or the device refuses.
    fn restart(&mut self, handle: SoundHandle) -> Result<()>;

    /// Stop and drop a clip. Its handle may be handed out again by `load`.
    fn release(&mut self, handle: SoundHandle);
}

/// Result of [`SoundTrigger::fire`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    Played,
    /// The slot has no playable clip.
    NoHandle,
    /// No audio device; nothing is ever played.
    Inert,
    NoSuchSlot,
}

/// Owns the audio backend, if there is one.
pub struct SoundTrigger {
    backend: Option<Box<dyn AudioBackend>>,
}

impl std::fmt::Debug for SoundTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundTrigger")
            .field("inert", &self.is_inert())
            .finish()
    }
}

impl SoundTrigger {
    /// Wrap a backend; `None` yields an inert trigger.
    #[must_use]
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            emit_log(LogLevel::Warn, "no audio output; sound cues disabled");
        }
        Self { backend }
    }

    /// A trigger that never plays anything.
    #[must_use]
    pub fn inert() -> Self {
        Self { backend: None }
    }

    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.backend.is_none()
    }

    /// Bind `path` to `slot`.
    ///
    /// The path is always recorded. Any clip the slot held is released, then
    /// the slot's handle is replaced by the backend's handle, or cleared when
    /// the clip cannot be loaded or the trigger is inert. Returns `false` for
    /// an unknown slot.
    pub fn load(&mut self, state: &mut MatchState, slot: usize, path: &Path) -> bool {
        let Some(entry) = state.sound_slot_mut(slot) else {
            return false;
        };
        if let (Some(backend), Some(old)) = (self.backend.as_mut(), entry.handle.take()) {
            backend.release(old);
        }
        let handle = self.backend.as_mut().and_then(|backend| match backend.load(path) {
            Ok(handle) => Some(handle),
            Err(err) => {
                emit_log(LogLevel::Warn, &format!("sound slot {}: {err}", slot + 1));
                None
            }
        });
        entry.source_path = Some(path.to_path_buf());
        entry.handle = handle;
        true
    }

    /// Restart the clip bound to `slot`.
    pub fn fire(&mut self, state: &MatchState, slot: usize) -> FireOutcome {
        let Some(entry) = state.sound_slots().get(slot) else {
            return FireOutcome::NoSuchSlot;
        };
        let Some(backend) = self.backend.as_mut() else {
            return FireOutcome::Inert;
        };
        let Some(handle) = entry.handle else {
            return FireOutcome::NoHandle;
        };
        if let Err(err) = backend.restart(handle) {
            emit_log(LogLevel::Warn, &format!("sound slot {}: {err}", slot + 1));
            return FireOutcome::NoHandle;
        }
        emit_event("sound.fire", &slot.to_string());
        FireOutcome::Played
    }
}

/// Short-lived highlight per fired slot.
#[derive(Clone, Debug, Default)]
pub struct FlashTracker {
    until: HashMap<usize, Instant>,
}

impl FlashTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or extend) the flash for `slot` at `now`.
    pub fn flash(&mut self, slot: usize, now: Instant) {
        self.until.insert(slot, now + FLASH_DURATION);
    }

    /// Whether `slot` is still highlighted at `now`.
    #[must_use]
    pub fn is_active(&self, slot: usize, now: Instant) -> bool {
        self.until.get(&slot).is_some_and(|until| now < *until)
    }

    /// Highlighted slots at `now`, ascending; expired entries are dropped.
    pub fn active(&mut self, now: Instant) -> Vec<usize> {
        self.until.retain(|_, until| now < *until);
        let mut slots: Vec<_> = self.until.keys().copied().collect();
        slots.sort_unstable();
        slots
    }
}
