//! Top-level application wiring.
//!
//! `Session` owns the [`DrumEngine`] and the active sound bank and runs one
//! engine pass per video frame; `run` adds the window, the hand source and
//! the monotonic clock around it.  Keeping `Session` window-free means the
//! whole per-frame path can be driven headless in tests.

use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use tap_engine::{DrumEngine, EngineConfig, Finger, FrameInput, HandFrame, RenderPayload, SoundBank};

use crate::audio::{open_sound_bank, Backend};
use crate::tracking::spawn_hand_source;
use crate::visualizer::{Visualizer, WIN_H, WIN_W};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    pub engine: EngineConfig,
    pub backend: Backend,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            engine: EngineConfig::default(),
            backend: Backend::Synth,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

/// Counts and forwards triggers so the status line can show the last hit.
struct Dispatcher {
    inner: Box<dyn SoundBank>,
    last_hit: Option<Finger>,
    hit_count: u64,
}

impl SoundBank for Dispatcher {
    fn trigger(&mut self, finger: Finger) {
        self.last_hit = Some(finger);
        self.hit_count += 1;
        self.inner.trigger(finger);
    }
}

/// One drumming session: the engine plus its audio collaborator.
pub struct Session {
    engine: DrumEngine,
    sounds: Dispatcher,
    pub status: String,
}

impl Session {
    pub fn new(engine_config: EngineConfig, bank: Box<dyn SoundBank>) -> Result<Self, String> {
        let engine = DrumEngine::new(engine_config).map_err(|e| e.to_string())?;
        Ok(Session {
            engine,
            sounds: Dispatcher {
                inner: bank,
                last_hit: None,
                hit_count: 0,
            },
            status: "Ready — flick a fingertip downward inside a lane".to_string(),
        })
    }

    /// Run one frame through the engine and refresh the status line.
    pub fn frame(&mut self, width: i32, height: i32, now: f64, hands: &[HandFrame]) -> RenderPayload {
        let before = self.sounds.hit_count;
        let payload = self.engine.process_frame(
            &FrameInput {
                width,
                height,
                now,
                hands,
            },
            &mut self.sounds,
        );

        if self.sounds.hit_count > before {
            if let Some(finger) = self.sounds.last_hit {
                self.status = format!("hit {}  (total {})", finger.label(), self.sounds.hit_count);
            }
        }
        payload
    }

    pub fn hit_count(&self) -> u64 {
        self.sounds.hit_count
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the visualizer,
/// the hand source (mouse simulation by default, hardware with
/// `--features leap`), and drives the frame loop at ~60 fps.  One frame is
/// always fully processed before the next begins.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    // ── Hand-frame channel ────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel();

    #[cfg(feature = "leap")]
    let hand_rx = {
        drop(sim_rx); // window input only renders in hardware mode
        spawn_hand_source(crate::tracking::LeapHandSource)
    };
    #[cfg(not(feature = "leap"))]
    let hand_rx = spawn_hand_source(crate::tracking::SimHandSource { rx: sim_rx });

    // ── Visualizer (owns the window and the sim input sender) ─────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── Session ───────────────────────────────────────────────────────────
    let bank = open_sound_bank(cfg.backend);
    let mut session = Session::new(cfg.engine, bank)?;

    // Injected monotonic clock: seconds since session start.
    let epoch = Instant::now();
    let mut hands: Vec<HandFrame> = Vec::new();

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        if !vis.poll_input() {
            break;
        }

        // Drain tracking updates; the newest frame wins.  With nothing
        // pending the previous landmarks are re-used, which only seeds the
        // detector (zero delta) and can never fire a tap.
        loop {
            match hand_rx.try_recv() {
                Ok(frame) => {
                    hands.clear();
                    hands.push(frame);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        let now = epoch.elapsed().as_secs_f64();
        let payload = session.frame(WIN_W as i32, WIN_H as i32, now, &hands);

        let status = session.status.clone();
        vis.render(&payload, &status);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullBank;

    fn make_session() -> Session {
        Session::new(EngineConfig::default(), Box::new(NullBank)).unwrap()
    }

    fn hand(finger: Finger, x: f32, y: f32) -> Vec<HandFrame> {
        let mut h = HandFrame::default();
        h.set(finger, x, y);
        vec![h]
    }

    #[test]
    fn tap_updates_status_and_count() {
        let mut s = make_session();
        s.frame(1280, 720, 0.00, &hand(Finger::Middle, 0.5, 0.10));
        s.frame(1280, 720, 0.05, &hand(Finger::Middle, 0.5, 0.20));
        assert_eq!(s.hit_count(), 1);
        assert!(s.status.contains("middle"), "status was {:?}", s.status);
    }

    #[test]
    fn idle_frames_leave_status_alone() {
        let mut s = make_session();
        let ready = s.status.clone();
        s.frame(1280, 720, 0.0, &[]);
        s.frame(1280, 720, 0.1, &[]);
        assert_eq!(s.status, ready);
        assert_eq!(s.hit_count(), 0);
    }

    #[test]
    fn repeated_identical_frames_never_fire() {
        // The re-used landmark case from the run loop: zero delta, no tap.
        let mut s = make_session();
        let hands = hand(Finger::Index, 0.3, 0.5);
        for i in 0..20 {
            s.frame(1280, 720, i as f64 * 0.016, &hands);
        }
        assert_eq!(s.hit_count(), 0);
    }

    #[test]
    fn rejects_invalid_engine_config() {
        let cfg = EngineConfig {
            cooldown_secs: 0.0,
            ..EngineConfig::default()
        };
        assert!(Session::new(cfg, Box::new(NullBank)).is_err());
    }

    #[test]
    fn default_lanes_cover_the_window() {
        let mut s = make_session();
        let payload = s.frame(1280, 720, 0.0, &[]);
        assert_eq!(payload.zones.len(), 5);
        assert_eq!(payload.zones[0].name, "Kick");
        assert_eq!(payload.zones[4].name, "Clap");
        assert_eq!(payload.zones[4].x_max, 1280);
    }
}
