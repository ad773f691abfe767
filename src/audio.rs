//! Sound effects
//!
//! The simulation only names sounds. `AudioManager` turns each one into
//! procedural oscillator voices scaled by the current volume settings, ready
//! for whatever backend plays them.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Player fires
    Laser,
    /// Enemy hit or player destroyed
    Explosion,
}

/// Receiver for sounds emitted by a frame
pub trait AudioSink {
    fn play(&mut self, sound: Sound);

    /// End of frame: hand everything played so far to the output
    fn flush(&mut self) {}
}

/// Collects sounds in order; useful for headless runs
impl AudioSink for Vec<Sound> {
    fn play(&mut self, sound: Sound) {
        self.push(sound);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator with an exponential frequency sweep and gain decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub waveform: Waveform,
    pub start_freq: f32,
    pub end_freq: f32,
    /// Peak gain, already scaled by volume
    pub gain: f32,
    /// Seconds
    pub duration: f32,
}

impl Sound {
    /// Oscillator recipe at full volume
    pub fn voices(&self) -> Vec<Voice> {
        match self {
            // Falling square zap
            Sound::Laser => vec![
                Voice {
                    waveform: Waveform::Square,
                    start_freq: 1200.0,
                    end_freq: 200.0,
                    gain: 0.25,
                    duration: 0.15,
                },
                Voice {
                    waveform: Waveform::Sine,
                    start_freq: 2400.0,
                    end_freq: 800.0,
                    gain: 0.1,
                    duration: 0.08,
                },
            ],
            // Low boom plus a high crack
            Sound::Explosion => vec![
                Voice {
                    waveform: Waveform::Sawtooth,
                    start_freq: 100.0,
                    end_freq: 30.0,
                    gain: 0.5,
                    duration: 0.5,
                },
                Voice {
                    waveform: Waveform::Square,
                    start_freq: 1500.0,
                    end_freq: 1500.0,
                    gain: 0.2,
                    duration: 0.15,
                },
            ],
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    queued: Vec<Voice>,
    played: u64,
    voices_flushed: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            queued: Vec::new(),
            played: 0,
            voices_flushed: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Sounds played since creation, including silenced ones
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Voices waiting for the next flush
    pub fn queued(&self) -> &[Voice] {
        &self.queued
    }

    /// Voices handed off by `flush` so far
    pub fn voices_flushed(&self) -> u64 {
        self.voices_flushed
    }

    /// Hand queued voices to the backend
    pub fn take_voices(&mut self) -> Vec<Voice> {
        std::mem::take(&mut self.queued)
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, sound: Sound) {
        self.played += 1;
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        log::debug!("Playing {:?} at volume {:.2}", sound, vol);
        self.queued.extend(sound.voices().into_iter().map(|voice| Voice {
            gain: voice.gain * vol,
            ..voice
        }));
    }

    /// No output device in the headless build; voices are logged and dropped
    fn flush(&mut self) {
        let voices = self.take_voices();
        if voices.is_empty() {
            return;
        }
        for voice in &voices {
            log::trace!(
                "{:?} {:.0}->{:.0} Hz gain {:.2} for {:.2}s",
                voice.waveform,
                voice.start_freq,
                voice.end_freq,
                voice.gain,
                voice.duration
            );
        }
        self.voices_flushed += voices.len() as u64;
    }
}
