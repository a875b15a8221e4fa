//! Sound collaborator
//!
//! The simulation only asks for effects to be played. Backends decide how;
//! a failed play is logged and dropped, never retried.

use crate::config::SoundConfig;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Orb collected
    Collect,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
}

/// Parameters for a single swept tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    /// Exponential ramp target, reached after `sweep_secs`
    pub end_hz: f32,
    pub sweep_secs: f32,
    /// Gain decays exponentially to 1% over this time
    pub duration_secs: f32,
}

impl SoundEffect {
    pub fn tone(self) -> Tone {
        match self {
            // Retro rising "ping"
            SoundEffect::Collect => Tone {
                waveform: Waveform::Sine,
                start_hz: 440.0,
                end_hz: 880.0,
                sweep_secs: 0.1,
                duration_secs: 0.3,
            },
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// No output device or context could be created
    #[error("audio output unavailable")]
    Unavailable,

    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Fire-and-forget sound output
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError>;

    fn play_collect_sound(&mut self) -> Result<(), AudioError> {
        self.play(SoundEffect::Collect)
    }
}

/// Discards every request
#[derive(Debug, Default, Clone, Copy)]
pub struct MuteSound;

impl SoundSink for MuteSound {
    fn play(&mut self, _effect: SoundEffect) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Headless backend: logs what would be played and counts it
#[derive(Debug, Clone)]
pub struct LogSound {
    volume: f32,
    played: u64,
}

impl LogSound {
    pub fn new(config: &SoundConfig) -> Self {
        Self {
            volume: config.effective_volume(),
            played: 0,
        }
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}

impl SoundSink for LogSound {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        if self.volume <= 0.0 {
            return Ok(());
        }
        let tone = effect.tone();
        log::debug!(
            "Sound {:?}: {:?} {}->{} Hz over {}s at gain {}",
            effect,
            tone.waveform,
            tone.start_hz,
            tone.end_hz,
            tone.duration_secs,
            self.volume
        );
        self.played += 1;
        Ok(())
    }
}
