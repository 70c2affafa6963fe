//! Hand tracking — both from LeapMotion hardware and mouse simulation.
//!
//! The public interface is a stream of [`HandFrame`]s delivered over a
//! `mpsc` channel, one per tracking update.  Consumers don't need to know
//! whether the landmarks came from real hardware or the mouse simulator.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tap_engine::{Finger, HandFrame};

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandFrame`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandFrame>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<H: HandSource>(source: H) -> Receiver<HandFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Each tracking frame, the five digit tips of every visible hand are mapped
/// from device millimetres into the normalized `[0,1]²` playing surface:
/// device x spans roughly ±250 mm around the sensor, device y (height) spans
/// roughly 100–500 mm and grows upward, so it is inverted to match
/// screen-space y growing downward.
#[cfg(feature = "leap")]
pub struct LeapHandSource;

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        use leaprs::*;

        const X_SPAN_MM: f32 = 250.0; // half-width of the usable field
        const Y_MIN_MM: f32 = 100.0;  // lowest useful hover height
        const Y_MAX_MM: f32 = 500.0;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[tracking] LeapC connection failed: {:?}", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            eprintln!("[tracking] LeapMotion device open failed: {:?}", e);
            return;
        }

        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                for hand in frame.hands() {
                    let mut out = HandFrame::default();
                    for (finger, digit) in Finger::ALL.iter().zip(hand.digits()) {
                        let tip = digit.distal().next_joint();
                        let nx = (tip.x / X_SPAN_MM + 1.0) / 2.0;
                        let ny = 1.0 - (tip.y - Y_MIN_MM) / (Y_MAX_MM - Y_MIN_MM);
                        out.set(*finger, nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0));
                    }
                    if tx.send(out).is_err() {
                        return;
                    }
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — mouse/keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Normalized pointer position — drives the active fingertip.
    Pointer { x: f32, y: f32 },
    /// Switch which fingertip the pointer drives (keys 1–5).
    SelectFinger(Finger),
    /// Hand lifted off the surface (no landmark while true).
    Lift(bool),
}

/// Hand source driven by [`SimInput`] events from the visualizer's window.
///
/// The visualizer sends raw window input here; this translator turns it into
/// [`HandFrame`]s with a single active fingertip.  This decouples the window
/// event loop from tracking logic.
pub struct SimHandSource {
    pub rx: Receiver<SimInput>,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        let mut active = Finger::Index;
        let mut lifted = false;

        for input in self.rx {
            let frame = match input {
                SimInput::SelectFinger(f) => {
                    active = f;
                    continue;
                }
                SimInput::Lift(l) => {
                    lifted = l;
                    continue;
                }
                SimInput::Pointer { .. } if lifted => HandFrame::default(),
                SimInput::Pointer { x, y } => {
                    let mut frame = HandFrame::default();
                    frame.set(active, x, y);
                    frame
                }
            };
            if tx.send(frame).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn run_sim(inputs: Vec<SimInput>) -> Vec<HandFrame> {
        let (in_tx, in_rx) = mpsc::channel();
        for i in inputs {
            in_tx.send(i).unwrap();
        }
        drop(in_tx);
        let rx = spawn_hand_source(SimHandSource { rx: in_rx });
        rx.iter().collect()
    }

    #[test]
    fn pointer_drives_index_by_default() {
        let frames = run_sim(vec![SimInput::Pointer { x: 0.3, y: 0.7 }]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].get(Finger::Index), Some((0.3, 0.7)));
        assert_eq!(frames[0].get(Finger::Thumb), None);
    }

    #[test]
    fn select_finger_switches_slot() {
        let frames = run_sim(vec![
            SimInput::SelectFinger(Finger::Pinky),
            SimInput::Pointer { x: 0.5, y: 0.5 },
        ]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].get(Finger::Pinky), Some((0.5, 0.5)));
        assert_eq!(frames[0].get(Finger::Index), None);
    }

    #[test]
    fn lifted_hand_has_no_landmarks() {
        let frames = run_sim(vec![
            SimInput::Lift(true),
            SimInput::Pointer { x: 0.5, y: 0.5 },
            SimInput::Lift(false),
            SimInput::Pointer { x: 0.5, y: 0.6 },
        ]);
        assert_eq!(frames.len(), 2);
        assert!(frames[0].fingers.iter().all(|f| f.is_none()));
        assert_eq!(frames[1].get(Finger::Index), Some((0.5, 0.6)));
    }
}
