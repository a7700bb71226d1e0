//! Speech output seam
//!
//! The toy only produces a line of text. Whatever speaks it must drop any
//! utterance still in flight before starting the new one, so callers go
//! through [`announce`] which always cancels first.

use crate::settings::SpeechSettings;

/// Something that can speak a line of text
pub trait Announcer {
    /// Stop the current utterance and drop anything queued
    fn cancel(&mut self);
    /// Start speaking `text`
    fn speak(&mut self, text: &str);
}

/// Cancel whatever is being said, then say `text`
pub fn announce<A: Announcer + ?Sized>(announcer: &mut A, text: &str) {
    announcer.cancel();
    announcer.speak(text);
}

/// Writes announcements to the log (native builds and headless runs)
#[derive(Debug, Default)]
pub struct LogAnnouncer {
    muted: bool,
    spoken: u64,
}

impl LogAnnouncer {
    pub fn new(settings: &SpeechSettings) -> Self {
        Self {
            muted: !settings.enabled,
            spoken: 0,
        }
    }

    /// Number of lines spoken so far
    pub fn spoken(&self) -> u64 {
        self.spoken
    }
}

impl Announcer for LogAnnouncer {
    fn cancel(&mut self) {}

    fn speak(&mut self, text: &str) {
        if self.muted {
            return;
        }
        self.spoken += 1;
        log::info!("🔊 {}", text);
    }
}

/// Browser speech synthesis
#[cfg(target_arch = "wasm32")]
pub struct WebSpeech {
    synth: Option<web_sys::SpeechSynthesis>,
    volume: f32,
    rate: f32,
    muted: bool,
}

#[cfg(target_arch = "wasm32")]
impl WebSpeech {
    pub fn new(settings: &SpeechSettings) -> Self {
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::warn!("SpeechSynthesis unavailable - announcements disabled");
        }
        Self {
            synth,
            volume: settings.volume.clamp(0.0, 1.0),
            rate: settings.rate.clamp(0.1, 10.0),
            muted: !settings.enabled,
        }
    }

    /// Mute/unmute announcements
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.cancel();
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Announcer for WebSpeech {
    fn cancel(&mut self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }

    fn speak(&mut self, text: &str) {
        if self.muted {
            return;
        }
        let Some(synth) = &self.synth else { return };
        match web_sys::SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => {
                utterance.set_volume(self.volume);
                utterance.set_rate(self.rate);
                synth.speak(&utterance);
            }
            Err(e) => log::warn!("Failed to create utterance: {:?}", e),
        }
    }
}
