//! Finger tap detection — continuous vertical motion in, discrete events out.
//!
//! One state record per tracked fingertip identity, created at session start
//! and kept for the whole session.  Debouncing is purely timestamp-gated:
//! there are no named states beyond "idle", just a single-frame downward
//! velocity threshold and a per-finger cooldown.

use crate::zone::Zone;

// ════════════════════════════════════════════════════════════════════════════
// Finger
// ════════════════════════════════════════════════════════════════════════════

/// The five tracked fingertip identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Stable slot index, 0–4.
    pub fn slot(self) -> usize {
        match self {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }

    /// Marker/pulse color for this finger, packed ARGB (`0xAARRGGBB`).
    pub fn color(self) -> u32 {
        match self {
            Finger::Thumb => 0xFFFF6464,
            Finger::Index => 0xFFFFD21E,
            Finger::Middle => 0xFF50DC78,
            Finger::Ring => 0xFF6496FF,
            Finger::Pinky => 0xFFC878FF,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TapEvent
// ════════════════════════════════════════════════════════════════════════════

/// A detected downward-strike gesture, ready for dispatch.
///
/// Consumed immediately by the session loop (audio trigger + pulse spawn);
/// never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct TapEvent {
    pub finger: Finger,
    pub zone: String,
    pub x: i32,
    pub y: i32,
    pub timestamp: f64,
}

// ════════════════════════════════════════════════════════════════════════════
// FingerState
// ════════════════════════════════════════════════════════════════════════════

/// Motion state for one fingertip.
///
/// `prev_y` is `None` until the finger has been seen once; the first sample
/// only seeds the velocity window and can never fire.
#[derive(Clone, Copy, Debug)]
struct FingerState {
    prev_y: Option<f32>,
    last_trigger: f64,
}

impl FingerState {
    fn new() -> Self {
        FingerState {
            prev_y: None,
            last_trigger: f64::NEG_INFINITY,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TapDetector
// ════════════════════════════════════════════════════════════════════════════

/// Velocity-threshold + cooldown tap debouncer for all five fingers.
///
/// The velocity window is exactly one frame: `delta = y − prev_y`, no
/// smoothing.  A tap fires iff the finger is inside a zone, `delta` exceeds
/// the threshold (y grows downward in screen space), and the cooldown has
/// expired.  Fingers are fully independent of each other.
///
/// The detector treats any numeric `y` literally; clamping out-of-range
/// samples to `[0, 1]` is the caller's job.
#[derive(Debug)]
pub struct TapDetector {
    threshold: f32,
    cooldown: f64,
    states: [FingerState; 5],
}

impl TapDetector {
    /// `threshold` in normalized units per frame, `cooldown` in seconds.
    /// Both must already be validated as positive by the engine config.
    pub fn new(threshold: f32, cooldown: f64) -> Self {
        TapDetector {
            threshold,
            cooldown,
            states: [FingerState::new(); 5],
        }
    }

    /// Feed one position sample for one finger.
    ///
    /// `zone` is the band the fingertip currently resolves to (`None` when
    /// outside the surface), `(px, py)` the pixel position, `now` the
    /// injected monotonic time in seconds.  Returns the tap event if this
    /// sample fired.
    pub fn sample(
        &mut self,
        finger: Finger,
        y: f32,
        zone: Option<&Zone>,
        px: i32,
        py: i32,
        now: f64,
    ) -> Option<TapEvent> {
        let state = &mut self.states[finger.slot()];

        let delta = state.prev_y.map(|prev| y - prev);
        state.prev_y = Some(y);

        let zone = zone?;
        let delta = delta?;
        if delta <= self.threshold {
            return None;
        }
        if now - state.last_trigger <= self.cooldown {
            return None;
        }

        state.last_trigger = now;
        Some(TapEvent {
            finger,
            zone: zone.name.clone(),
            x: px,
            y: py,
            timestamp: now,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn kick_zone() -> Zone {
        Zone {
            name: "Kick".into(),
            x_min: 0,
            x_max: 100,
        }
    }

    fn det() -> TapDetector {
        TapDetector::new(0.045, 0.25)
    }

    #[test]
    fn first_sample_only_seeds() {
        let mut d = det();
        let z = kick_zone();
        // No prior position — even a deep first sample cannot fire.
        assert!(d.sample(Finger::Thumb, 0.9, Some(&z), 50, 50, 0.0).is_none());
    }

    #[test]
    fn downward_motion_past_threshold_fires() {
        let mut d = det();
        let z = kick_zone();
        d.sample(Finger::Thumb, 0.10, Some(&z), 50, 50, 0.0);
        let tap = d.sample(Finger::Thumb, 0.20, Some(&z), 50, 144, 0.05);
        let tap = tap.expect("delta 0.10 > 0.045 should fire");
        assert_eq!(tap.finger, Finger::Thumb);
        assert_eq!(tap.zone, "Kick");
        assert_eq!((tap.x, tap.y), (50, 144));
        assert_eq!(tap.timestamp, 0.05);
    }

    #[test]
    fn sub_threshold_motion_never_fires() {
        let mut d = det();
        let z = kick_zone();
        let mut y = 0.0f32;
        let mut now = 0.0f64;
        d.sample(Finger::Index, y, Some(&z), 50, 50, now);
        for _ in 0..50 {
            y += 0.045; // delta == threshold exactly — strict inequality required
            now += 0.05;
            assert!(d.sample(Finger::Index, y, Some(&z), 50, 50, now).is_none());
        }
    }

    #[test]
    fn upward_motion_never_fires() {
        let mut d = det();
        let z = kick_zone();
        d.sample(Finger::Index, 0.8, Some(&z), 50, 50, 0.0);
        assert!(d.sample(Finger::Index, 0.2, Some(&z), 50, 50, 1.0).is_none());
    }

    #[test]
    fn cooldown_blocks_retrigger() {
        let mut d = det();
        let z = kick_zone();
        d.sample(Finger::Thumb, 0.10, Some(&z), 50, 50, 0.00);
        assert!(d.sample(Finger::Thumb, 0.20, Some(&z), 50, 50, 0.05).is_some());
        // Qualifying downward samples keep arriving, but cooldown gates them.
        assert!(d.sample(Finger::Thumb, 0.30, Some(&z), 50, 50, 0.10).is_none());
        assert!(d.sample(Finger::Thumb, 0.40, Some(&z), 50, 50, 0.20).is_none());
        assert!(d.sample(Finger::Thumb, 0.50, Some(&z), 50, 50, 0.30).is_none());
        // 0.31s elapsed since the last trigger at 0.05 — eligible again.
        assert!(d.sample(Finger::Thumb, 0.60, Some(&z), 50, 50, 0.36).is_some());
    }

    #[test]
    fn no_zone_suppresses_but_still_tracks() {
        let mut d = det();
        let z = kick_zone();
        d.sample(Finger::Ring, 0.10, None, 500, 50, 0.0);
        // Big downward move while outside any zone — suppressed.
        assert!(d.sample(Finger::Ring, 0.50, None, 500, 360, 0.05).is_none());
        // prev_y was still updated, so this small move does not fire either.
        assert!(d.sample(Finger::Ring, 0.51, Some(&z), 50, 367, 0.10).is_none());
    }

    #[test]
    fn fingers_are_independent() {
        let mut d = det();
        let z = kick_zone();
        d.sample(Finger::Thumb, 0.10, Some(&z), 50, 50, 0.00);
        d.sample(Finger::Index, 0.10, Some(&z), 60, 50, 0.00);
        // Thumb fires, entering its cooldown…
        assert!(d.sample(Finger::Thumb, 0.20, Some(&z), 50, 50, 0.05).is_some());
        // …which must not affect the index finger in the same frame.
        assert!(d.sample(Finger::Index, 0.20, Some(&z), 60, 50, 0.05).is_some());
    }

    #[test]
    fn missing_frame_preserves_state() {
        let mut d = det();
        let z = kick_zone();
        d.sample(Finger::Pinky, 0.10, Some(&z), 50, 50, 0.0);
        // Finger absent for a while — no samples, no decay.
        let tap = d.sample(Finger::Pinky, 0.20, Some(&z), 50, 50, 5.0);
        assert!(tap.is_some(), "delta measured against the last seen position");
    }
}
