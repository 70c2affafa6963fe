//! Transient tap pulses — bounded-lifetime visual feedback.
//!
//! The [`PulseField`] owns every active pulse from spawn until its age
//! reaches the configured lifetime, at which point it is retired.  Expired
//! entries are swap-removed in place, so the active set never grows beyond
//! what the last lifetime window produced.

// ════════════════════════════════════════════════════════════════════════════
// Pulse
// ════════════════════════════════════════════════════════════════════════════

/// One live pulse.  Immutable after spawn; only membership changes.
#[derive(Clone, Copy, Debug)]
struct Pulse {
    x: i32,
    y: i32,
    color: u32,
    born: f64,
}

/// Render parameters derived for one surviving pulse.
///
/// `radius` shrinks monotonically from `max_radius + 1` toward `1` as the
/// pulse ages, reaching removal before it would hit zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseSprite {
    pub x: i32,
    pub y: i32,
    pub color: u32,
    pub radius: i32,
}

// ════════════════════════════════════════════════════════════════════════════
// PulseField
// ════════════════════════════════════════════════════════════════════════════

/// The set of currently-animating pulses.
#[derive(Debug)]
pub struct PulseField {
    pulses: Vec<Pulse>,
    lifetime: f64,
    max_radius: i32,
}

impl PulseField {
    /// `lifetime` in seconds, `max_radius` in pixels; both validated as
    /// positive by the engine config.
    pub fn new(lifetime: f64, max_radius: i32) -> Self {
        PulseField {
            pulses: Vec::new(),
            lifetime,
            max_radius,
        }
    }

    /// Append a new pulse.  No deduplication — simultaneous taps from
    /// different fingers may overlap.
    pub fn spawn(&mut self, x: i32, y: i32, color: u32, now: f64) {
        self.pulses.push(Pulse { x, y, color, born: now });
    }

    /// Retire every pulse whose age has reached the lifetime, then return
    /// the render parameters for the survivors.
    ///
    /// Must be called once per frame to keep the `age < lifetime` invariant
    /// as time passes, even when nothing new was spawned.
    pub fn advance(&mut self, now: f64) -> Vec<PulseSprite> {
        let mut i = 0;
        while i < self.pulses.len() {
            if now - self.pulses[i].born >= self.lifetime {
                self.pulses.swap_remove(i);
            } else {
                i += 1;
            }
        }

        self.pulses
            .iter()
            .map(|p| {
                let age = now - p.born;
                let radius = (self.max_radius as f64 * (1.0 - age / self.lifetime)) as i32 + 1;
                PulseSprite {
                    x: p.x,
                    y: p.y,
                    color: p.color,
                    radius,
                }
            })
            .collect()
    }

    /// Number of currently-active pulses.
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> PulseField {
        PulseField::new(0.3, 30)
    }

    #[test]
    fn fresh_pulse_has_full_radius() {
        let mut f = field();
        f.spawn(10, 20, 0xFFFF0000, 1.0);
        let sprites = f.advance(1.0);
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].radius, 31); // floor(30 * 1.0) + 1
        assert_eq!((sprites[0].x, sprites[0].y), (10, 20));
    }

    #[test]
    fn radius_decays_monotonically_to_one() {
        let mut f = field();
        f.spawn(0, 0, 0xFFFFFFFF, 0.0);
        let mut last = i32::MAX;
        for step in 0..29 {
            let now = step as f64 * 0.01;
            let sprites = f.advance(now);
            assert_eq!(sprites.len(), 1);
            let r = sprites[0].radius;
            assert!(r <= last, "radius grew from {} to {} at t={}", last, r, now);
            assert!(r >= 1);
            last = r;
        }
        // Just before expiry the radius has shrunk to the floor of 1.
        assert_eq!(f.advance(0.299)[0].radius, 1);
    }

    #[test]
    fn pulse_expires_at_lifetime() {
        let mut f = field();
        f.spawn(0, 0, 0xFFFFFFFF, 0.0);
        assert_eq!(f.advance(0.29).len(), 1);
        assert!(f.advance(0.3).is_empty(), "age == lifetime must retire");
        assert!(f.is_empty());
    }

    #[test]
    fn advance_without_spawns_keeps_draining() {
        let mut f = field();
        f.spawn(0, 0, 1, 0.0);
        f.spawn(5, 5, 2, 0.1);
        f.advance(0.2);
        assert_eq!(f.len(), 2);
        f.advance(0.35); // first expired
        assert_eq!(f.len(), 1);
        f.advance(0.45); // second expired
        assert_eq!(f.len(), 0);
    }

    #[test]
    fn overlapping_spawns_are_kept_separately() {
        let mut f = field();
        f.spawn(7, 7, 0xFF00FF00, 0.0);
        f.spawn(7, 7, 0xFF0000FF, 0.0);
        assert_eq!(f.advance(0.0).len(), 2);
    }

    #[test]
    fn sprite_color_matches_spawn() {
        let mut f = field();
        f.spawn(1, 2, 0xFFC878FF, 0.0);
        assert_eq!(f.advance(0.1)[0].color, 0xFFC878FF);
    }
}
