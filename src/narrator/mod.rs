//! Voice narration for the cook-through
//!
//! The session consumes narration as a fire-and-forget capability: `speak`
//! must return immediately, and a new utterance supersedes whatever is
//! still playing so audio never overlaps. Narration is best-effort; a
//! narrator failure never affects session state.

mod command;

pub use command::CommandNarrator;

/// Trait for text-to-speech playback
pub trait Narrator: Send + Sync {
    /// Start speaking, cancelling any utterance still in flight
    fn speak(&self, text: &str);

    /// Stop any utterance in flight
    fn cancel(&self);
}

/// No-op narrator used when narration is disabled
pub struct NullNarrator;

impl Narrator for NullNarrator {
    fn speak(&self, _text: &str) {}

    fn cancel(&self) {}
}
