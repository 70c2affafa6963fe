//! The session engine — one complete, ordered pass per video frame.
//!
//! `DrumEngine` owns every piece of mutable session state (zone layout,
//! per-finger detector records, active pulses) and wires the stages together:
//! zone resolution → tap detection → event dispatch → pulse advance → render
//! hand-off.  Collaborators never touch the state directly; audio goes out
//! through the [`SoundBank`] trait and rendering data comes back as a
//! [`RenderPayload`] snapshot.

use thiserror::Error;

use crate::detector::{Finger, TapDetector};
use crate::pulse::{PulseField, PulseSprite};
use crate::zone::{Zone, ZoneLayout};

// ════════════════════════════════════════════════════════════════════════════
// EngineConfig
// ════════════════════════════════════════════════════════════════════════════

/// Tunable engine parameters.
///
/// Defaults: a 0.045 downward-velocity threshold (normalized units per
/// frame), a 0.25 s per-finger cooldown, a 0.3 s pulse lifetime with a
/// 30 px starting radius, and the five classic drum lanes.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Minimum one-frame downward delta (normalized y units) for a tap.
    pub tap_threshold: f32,
    /// Minimum seconds between taps from the same finger.
    pub cooldown_secs: f64,
    /// Seconds a tap pulse stays on screen.
    pub pulse_lifetime_secs: f64,
    /// Starting pulse radius in pixels.
    pub max_pulse_radius: i32,
    /// Zone names, left to right; defines zone count and order.
    pub zone_names: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tap_threshold: 0.045,
            cooldown_secs: 0.25,
            pulse_lifetime_secs: 0.3,
            max_pulse_radius: 30,
            zone_names: ["Kick", "Snare", "HiHat", "Tom", "Clap"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Reject any configuration that would make debounce or pulse-decay
    /// arithmetic undefined.  Called by [`DrumEngine::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tap_threshold > 0.0) {
            return Err(ConfigError::TapThreshold(self.tap_threshold));
        }
        if !(self.cooldown_secs > 0.0) {
            return Err(ConfigError::Cooldown(self.cooldown_secs));
        }
        if !(self.pulse_lifetime_secs > 0.0) {
            return Err(ConfigError::PulseLifetime(self.pulse_lifetime_secs));
        }
        if self.max_pulse_radius <= 0 {
            return Err(ConfigError::PulseRadius(self.max_pulse_radius));
        }
        if self.zone_names.is_empty() {
            return Err(ConfigError::NoZones);
        }
        Ok(())
    }
}

/// Construction-time misconfiguration.  The engine refuses to start rather
/// than run with undefined debounce behavior.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tap threshold must be positive, got {0}")]
    TapThreshold(f32),
    #[error("cooldown must be positive, got {0} s")]
    Cooldown(f64),
    #[error("pulse lifetime must be positive, got {0} s")]
    PulseLifetime(f64),
    #[error("max pulse radius must be positive, got {0} px")]
    PulseRadius(i32),
    #[error("zone name list is empty")]
    NoZones,
}

// ════════════════════════════════════════════════════════════════════════════
// Collaborator seams
// ════════════════════════════════════════════════════════════════════════════

/// Audio capability the engine triggers taps through.
///
/// Fire-and-forget: the playback side must not block, and overlapping
/// triggers for different fingers are independent and unordered.
pub trait SoundBank {
    fn trigger(&mut self, finger: Finger);
}

/// Normalized fingertip positions for one tracked hand, `(x, y) ∈ [0,1]²`,
/// indexed by [`Finger::slot`].  `None` means the landmark estimator did not
/// see that fingertip this frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct HandFrame {
    pub fingers: [Option<(f32, f32)>; 5],
}

impl HandFrame {
    pub fn set(&mut self, finger: Finger, x: f32, y: f32) {
        self.fingers[finger.slot()] = Some((x, y));
    }

    pub fn get(&self, finger: Finger) -> Option<(f32, f32)> {
        self.fingers[finger.slot()]
    }
}

/// Everything the engine consumes for one frame.
pub struct FrameInput<'a> {
    /// Surface dimensions in pixels; a width change rebuilds the zones.
    pub width: i32,
    pub height: i32,
    /// Injected monotonic time in seconds.
    pub now: f64,
    pub hands: &'a [HandFrame],
}

/// On-screen marker for a fingertip currently inside a zone.
#[derive(Clone, Copy, Debug)]
pub struct FingerMarker {
    pub finger: Finger,
    pub x: i32,
    pub y: i32,
    pub color: u32,
}

/// Per-frame snapshot handed to the rendering collaborator.
#[derive(Clone, Debug, Default)]
pub struct RenderPayload {
    /// Current zone geometry, left to right.
    pub zones: Vec<Zone>,
    /// Markers for fingers inside a zone this frame.
    pub markers: Vec<FingerMarker>,
    /// Surviving pulses with their decayed radii.
    pub pulses: Vec<PulseSprite>,
}

// ════════════════════════════════════════════════════════════════════════════
// DrumEngine
// ════════════════════════════════════════════════════════════════════════════

pub struct DrumEngine {
    config: EngineConfig,
    layout: Option<ZoneLayout>,
    detector: TapDetector,
    pulses: PulseField,
}

impl DrumEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let detector = TapDetector::new(config.tap_threshold, config.cooldown_secs);
        let pulses = PulseField::new(config.pulse_lifetime_secs, config.max_pulse_radius);
        Ok(DrumEngine {
            config,
            layout: None,
            detector,
            pulses,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one complete frame pass.
    ///
    /// Synchronous and single-threaded; the caller must finish one frame
    /// before starting the next.  Per-frame anomalies (missing landmarks,
    /// fingers outside every zone) are absorbed, never raised.
    pub fn process_frame(
        &mut self,
        frame: &FrameInput<'_>,
        sounds: &mut dyn SoundBank,
    ) -> RenderPayload {
        let stale = self.layout.as_ref().map_or(true, |l| l.width() != frame.width);
        if stale {
            self.layout = Some(ZoneLayout::new(frame.width, &self.config.zone_names));
        }
        let layout = self.layout.as_ref().expect("layout built above");

        let mut markers = Vec::new();
        let mut taps = Vec::new();

        for hand in frame.hands {
            for finger in Finger::ALL {
                let Some((nx, ny)) = hand.get(finger) else {
                    continue;
                };
                let px = (nx * frame.width as f32) as i32;
                let py = (ny * frame.height as f32) as i32;
                let zone = layout.find(px);

                if zone.is_some() {
                    markers.push(FingerMarker {
                        finger,
                        x: px,
                        y: py,
                        color: finger.color(),
                    });
                }

                if let Some(tap) = self.detector.sample(finger, ny, zone, px, py, frame.now) {
                    taps.push(tap);
                }
            }
        }

        // Dispatch: trigger audio and spawn a pulse; the event is consumed here.
        for tap in taps {
            sounds.trigger(tap.finger);
            self.pulses
                .spawn(tap.x, tap.y, tap.finger.color(), tap.timestamp);
        }

        let pulses = self.pulses.advance(frame.now);

        RenderPayload {
            zones: layout.zones().to_vec(),
            markers,
            pulses,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
