//! Narrator backed by a system text-to-speech command
//!
//! Spawns one TTS process per utterance (`say` on macOS, `espeak-ng`
//! elsewhere, overridable via config) and kills the previous process before
//! starting the next, which gives the single-utterance-at-a-time guarantee
//! without an audio stack of our own.

use super::Narrator;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

pub struct CommandNarrator {
    command: String,
    voice: Option<String>,
    current: Mutex<Option<Child>>,
}

impl CommandNarrator {
    pub fn new() -> Self {
        Self {
            command: default_tts_command().to_string(),
            voice: None,
            current: Mutex::new(None),
        }
    }

    pub fn with_command(mut self, command: &str) -> Self {
        self.command = command.to_string();
        self
    }

    pub fn with_voice(mut self, voice: Option<String>) -> Self {
        self.voice = voice;
        self
    }

    fn kill_current(&self, current: &mut Option<Child>) {
        if let Some(mut child) = current.take() {
            // The process may have already exited; both calls are best-effort
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Default for CommandNarrator {
    fn default() -> Self {
        Self::new()
    }
}

fn default_tts_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "say"
    } else {
        "espeak-ng"
    }
}

impl Narrator for CommandNarrator {
    fn speak(&self, text: &str) {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.kill_current(&mut current);

        let mut cmd = Command::new(&self.command);
        if let Some(voice) = &self.voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg(text).stdout(Stdio::null()).stderr(Stdio::null());

        match cmd.spawn() {
            Ok(child) => {
                tracing::debug!(command = %self.command, "Narrating: {}", text);
                *current = Some(child);
            }
            Err(e) => {
                tracing::warn!(command = %self.command, error = %e, "TTS command failed to start");
            }
        }
    }

    fn cancel(&self) {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.kill_current(&mut current);
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        self.cancel();
    }
}
