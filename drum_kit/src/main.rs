//! drum_kit — interactive entry point.

use drum_kit::app::{run, AppConfig};
use drum_kit::audio::Backend;
use std::io::{self, Write};
use tap_engine::EngineConfig;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Drum Kit — fingertip taps over on-screen lanes        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse simulation  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: five lanes, synth tones, default tuning\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    let defaults = EngineConfig::default();

    let tap_threshold: f32 = {
        let t = read_line(&format!(
            "  Tap threshold, normalized units/frame (default {}): ",
            defaults.tap_threshold
        ))
        .trim()
        .parse()
        .unwrap_or(defaults.tap_threshold);
        if t > 0.0 {
            t
        } else {
            println!("  ⚠  must be positive — keeping default.");
            defaults.tap_threshold
        }
    };

    let cooldown_secs: f64 = {
        let c = read_line(&format!(
            "  Per-finger cooldown in seconds (default {}): ",
            defaults.cooldown_secs
        ))
        .trim()
        .parse()
        .unwrap_or(defaults.cooldown_secs);
        if c > 0.0 {
            c
        } else {
            println!("  ⚠  must be positive — keeping default.");
            defaults.cooldown_secs
        }
    };

    let zone_names = {
        let line = read_line("  Lane names, comma-separated (default Kick,Snare,HiHat,Tom,Clap): ");
        let names: Vec<String> = line
            .trim()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            defaults.zone_names.clone()
        } else {
            names
        }
    };

    let backend = {
        println!("  Audio backend: 1=synth tones  2=MIDI percussion");
        match read_line("  Choice (default 1): ").trim() {
            "2" => Backend::Midi,
            _ => Backend::Synth,
        }
    };

    AppConfig {
        engine: EngineConfig {
            tap_threshold,
            cooldown_secs,
            zone_names,
            ..defaults
        },
        backend,
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
