//! Audio output backends behind the engine's `SoundBank` seam.
//!
//! Triggers are fire-and-forget: each tap starts an independent, overlapping
//! playback and returns immediately.  Two real backends are provided —
//! in-memory synthesized drum tones played through rodio, and GM percussion
//! notes sent out a MIDI port — plus a null backend used when neither device
//! is available, so the kit stays playable (silently) everywhere.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle};

use tap_engine::{Finger, SoundBank};

pub const SAMPLE_RATE: u32 = 44_100;
pub const TONE_SECONDS: f32 = 0.35;

// ════════════════════════════════════════════════════════════════════════════
// Finger → sound assignments
// ════════════════════════════════════════════════════════════════════════════

/// Fundamental frequency of the synthesized tone for each finger.
pub fn tone_hz(finger: Finger) -> f32 {
    match finger {
        Finger::Thumb => 180.0,  // Kick
        Finger::Index => 320.0,  // Snare
        Finger::Middle => 400.0, // HiHat
        Finger::Ring => 500.0,   // Tom
        Finger::Pinky => 620.0,  // Clap
    }
}

/// GM channel-10 percussion key for each finger.
pub fn percussion_key(finger: Finger) -> u8 {
    match finger {
        Finger::Thumb => 36,  // Bass Drum 1
        Finger::Index => 38,  // Acoustic Snare
        Finger::Middle => 42, // Closed Hi-Hat
        Finger::Ring => 45,   // Low Tom
        Finger::Pinky => 39,  // Hand Clap
    }
}

/// Render one drum hit as mono f32 PCM: a sine at `freq` under an
/// exponential decay envelope so it reads as a strike, not a beep.
pub fn drum_tone(freq: f32, seconds: f32, rate: u32) -> Vec<f32> {
    let count = (rate as f32 * seconds) as usize;
    (0..count)
        .map(|n| {
            let t = n as f32 / rate as f32;
            let envelope = (-6.0 * t / seconds).exp();
            0.5 * envelope * (2.0 * std::f32::consts::PI * freq * t).sin()
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// SynthBank — rodio playback of generated tones
// ════════════════════════════════════════════════════════════════════════════

/// Plays the per-finger synthesized tones through the default audio device.
pub struct SynthBank {
    // The stream must stay alive for the handle to remain valid.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    tones: [Vec<f32>; 5],
}

impl SynthBank {
    pub fn open() -> Result<Self, String> {
        let (stream, handle) = OutputStream::try_default().map_err(|e| e.to_string())?;
        let tones = Finger::ALL.map(|f| drum_tone(tone_hz(f), TONE_SECONDS, SAMPLE_RATE));
        Ok(SynthBank {
            _stream: stream,
            handle,
            tones,
        })
    }
}

impl SoundBank for SynthBank {
    fn trigger(&mut self, finger: Finger) {
        let source = SamplesBuffer::new(1, SAMPLE_RATE, self.tones[finger.slot()].clone());
        if let Err(e) = self.handle.play_raw(source) {
            eprintln!("[audio] playback error: {}", e);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MidiBank — GM percussion over midir
// ════════════════════════════════════════════════════════════════════════════

const PERCUSSION_CHANNEL: u8 = 9; // MIDI channel 10

/// Sends each tap as a percussion note on MIDI channel 10.
pub struct MidiBank {
    conn: midir::MidiOutputConnection,
}

impl MidiBank {
    /// Open the first available MIDI output port, preferring a softsynth.
    pub fn open() -> Result<Self, String> {
        let midi_out = midir::MidiOutput::new("drum_kit").map_err(|e| e.to_string())?;

        let ports = midi_out.ports();
        if ports.is_empty() {
            return Err("no MIDI output ports found".to_string());
        }

        let port_idx = ports
            .iter()
            .enumerate()
            .find(|(_, p)| {
                midi_out
                    .port_name(p)
                    .map(|n| {
                        let n = n.to_lowercase();
                        n.contains("fluid")
                            || n.contains("timidity")
                            || n.contains("microsoft")
                            || n.contains("gm")
                            || n.contains("synth")
                    })
                    .unwrap_or(false)
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let port = &ports[port_idx];
        let name = midi_out
            .port_name(port)
            .unwrap_or_else(|_| "Unknown".to_string());
        eprintln!("[audio] Opening MIDI port: {}", name);

        let conn = midi_out
            .connect(port, "drum_kit-hits")
            .map_err(|e| e.to_string())?;
        Ok(MidiBank { conn })
    }
}

impl SoundBank for MidiBank {
    fn trigger(&mut self, finger: Finger) {
        let key = percussion_key(finger);
        // Percussion needs no sustain: note-off follows immediately.
        let _ = self.conn.send(&[0x90 | PERCUSSION_CHANNEL, key, 110]);
        let _ = self.conn.send(&[0x80 | PERCUSSION_CHANNEL, key, 0]);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NullBank — silent fallback
// ════════════════════════════════════════════════════════════════════════════

pub struct NullBank;

impl SoundBank for NullBank {
    fn trigger(&mut self, _finger: Finger) {}
}

// ════════════════════════════════════════════════════════════════════════════
// open_sound_bank — pick a backend, fall back to silence
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Synthesized drum tones through the default audio device.
    Synth,
    /// GM percussion over the first available MIDI output port.
    Midi,
}

/// Open the requested backend, falling back to the null bank (with a
/// warning) so a missing device never prevents the session from starting.
pub fn open_sound_bank(backend: Backend) -> Box<dyn SoundBank> {
    match backend {
        Backend::Synth => match SynthBank::open() {
            Ok(b) => Box::new(b),
            Err(e) => {
                eprintln!("[audio] audio device unavailable: {} — taps will be silent", e);
                Box::new(NullBank)
            }
        },
        Backend::Midi => match MidiBank::open() {
            Ok(b) => Box::new(b),
            Err(e) => {
                eprintln!("[audio] MIDI unavailable: {} — taps will be silent", e);
                eprintln!("[audio] Install a MIDI synthesiser such as:");
                eprintln!("        • macOS: built-in CoreMIDI (always available)");
                eprintln!("        • Linux: `timidity -iA` or `fluidsynth`");
                eprintln!("        • Windows: built-in GS Wavetable Synth");
                Box::new(NullBank)
            }
        },
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_sample_count_matches_duration() {
        let samples = drum_tone(180.0, 0.35, 44_100);
        assert_eq!(samples.len(), (44_100.0_f32 * 0.35) as usize);
    }

    #[test]
    fn tone_amplitude_bounded() {
        for &s in &drum_tone(620.0, 0.35, 44_100) {
            assert!(s.abs() <= 0.5);
        }
    }

    #[test]
    fn tone_energy_decays() {
        let samples = drum_tone(320.0, 0.35, 44_100);
        let peak = |w: &[f32]| w.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
        let head = peak(&samples[..2000]);
        let tail = peak(&samples[samples.len() - 2000..]);
        assert!(head > tail * 4.0, "head {} should dwarf tail {}", head, tail);
    }

    #[test]
    fn every_finger_has_a_distinct_tone() {
        let mut freqs: Vec<f32> = Finger::ALL.iter().map(|&f| tone_hz(f)).collect();
        freqs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        freqs.dedup();
        assert_eq!(freqs.len(), 5);
    }

    #[test]
    fn percussion_keys_are_valid_gm_drums() {
        for f in Finger::ALL {
            let key = percussion_key(f);
            // GM percussion map spans keys 35–81.
            assert!((35..=81).contains(&key));
        }
    }
}
