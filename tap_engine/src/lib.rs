//! # tap_engine
//!
//! Turns a per-frame stream of tracked fingertip positions into discrete
//! drum-tap events, routes each event to a named screen zone and a sound
//! trigger, and animates short-lived visual pulses at the tap location.
//!
//! The engine is pure orchestration: it owns all mutable session state
//! (per-finger detector records, active pulses) and sees the outside world
//! only through its inputs and the [`SoundBank`] capability trait.  Camera
//! capture, hand-landmark estimation, pixel rendering and audio playback all
//! live in collaborator crates.
//!
//! ## Pipeline (one call per video frame)
//!
//! | Stage | Module | What happens |
//! |---|---|---|
//! | Zone resolution | [`zone`] | fingertip x-pixel → named horizontal band |
//! | Tap detection | [`detector`] | downward velocity + cooldown gate → [`TapEvent`] |
//! | Dispatch | [`engine`] | `SoundBank::trigger` + pulse spawn per event |
//! | Pulse advance | [`pulse`] | expired pulses retired, radii recomputed |
//! | Hand-off | [`engine`] | [`RenderPayload`] returned for the renderer |
//!
//! ## Determinism
//!
//! The engine never reads a clock.  Every frame carries an injected monotonic
//! timestamp (`now`, in seconds), so cooldown and pulse-decay arithmetic are
//! immune to wall-clock adjustments and fully reproducible in tests.
//!
//! ```rust
//! use tap_engine::{DrumEngine, EngineConfig, FrameInput, HandFrame, Finger, SoundBank};
//!
//! struct Silent;
//! impl SoundBank for Silent {
//!     fn trigger(&mut self, _finger: Finger) {}
//! }
//!
//! let mut engine = DrumEngine::new(EngineConfig::default()).unwrap();
//! let mut hand = HandFrame::default();
//! hand.set(Finger::Index, 0.30, 0.10);
//!
//! let payload = engine.process_frame(
//!     &FrameInput { width: 1280, height: 720, now: 0.0, hands: &[hand] },
//!     &mut Silent,
//! );
//! assert_eq!(payload.zones.len(), 5);
//! ```

pub mod detector;
pub mod engine;
pub mod pulse;
pub mod zone;

pub use detector::{Finger, TapDetector, TapEvent};
pub use engine::{
    ConfigError, DrumEngine, EngineConfig, FingerMarker, FrameInput, HandFrame, RenderPayload,
    SoundBank,
};
pub use pulse::{PulseField, PulseSprite};
pub use zone::{Zone, ZoneLayout};
