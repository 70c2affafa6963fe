//! # drum_kit
//!
//! Play air drums with your fingertips.  Five drum lanes span the window;
//! a quick downward flick of a tracked fingertip inside a lane triggers that
//! lane's sound and a decaying pulse at the tap location.  Detection,
//! debouncing and pulse animation live in the [`tap_engine`] crate; this
//! crate supplies the collaborators around it — hand input, audio output,
//! and the software-rendered window.
//!
//! ## Finger → sound mapping
//!
//! | Finger | Tone | Lane | GM percussion key |
//! |---|---|---|---|
//! | thumb  | 180 Hz | Kick  | 36 Bass Drum 1 |
//! | index  | 320 Hz | Snare | 38 Acoustic Snare |
//! | middle | 400 Hz | HiHat | 42 Closed Hi-Hat |
//! | ring   | 500 Hz | Tom   | 45 Low Tom |
//! | pinky  | 620 Hz | Clap  | 39 Hand Clap |
//!
//! ## Modes
//!
//! * (default) — **Simulation mode**: the mouse drives one fingertip; flick
//!   it downward inside a lane to tap.
//! * `leap` — **Hardware mode**: tracks all five fingertips of a real hand
//!   through a LeapMotion controller via LeapC.
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse move | Position the active fingertip |
//! | `1`–`5` | Select thumb/index/middle/ring/pinky |
//! | `Space` (hold) | Lift the hand (no landmark) |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod audio;
pub mod tracking;
pub mod visualizer;
