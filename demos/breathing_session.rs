//! Plays a guided 4-7-8 breathing session through the default output device.
//!
//! Usage: cargo run --example breathing_session --features cpal [config.json] [cycles]
//!
//! Set RUST_LOG=zendrone=debug to follow the engine.

mod common;

use anyhow::Result;
use common::BreathingPattern;
use std::thread;
use std::time::{Duration, Instant};
use zendrone::{AmbientEngine, CpalHost, EngineConfig, EngineState};

const SAMPLE_RATE: u32 = 48000;
const FRAME: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let cycles: u32 = args.next().map(|n| n.parse()).transpose()?.unwrap_or(2);

    let mut engine = AmbientEngine::<SAMPLE_RATE, _>::new(CpalHost::new(), config);
    engine.start();
    if engine.state() == EngineState::Unsupported {
        anyhow::bail!("no usable audio output device");
    }

    let pattern = BreathingPattern::default();
    let session = Duration::from_secs_f64(pattern.cycle_seconds() * cycles as f64);
    println!(
        "Breathing for {} cycle(s): in {}s, hold {}s, out {}s",
        cycles, pattern.inhale, pattern.hold, pattern.exhale
    );

    let began = Instant::now();
    while began.elapsed() < session {
        engine.update_breathing(pattern.scale_at(began.elapsed().as_secs_f64()));
        thread::sleep(FRAME);
    }

    engine.stop();
    // Keep breathing through the fade out; only the filter moves now
    let fade_out = Instant::now();
    while engine.state() == EngineState::Stopping {
        engine.update_breathing(pattern.scale_at(began.elapsed().as_secs_f64()));
        thread::sleep(FRAME);
        if fade_out.elapsed() > Duration::from_secs(5) {
            break;
        }
    }

    engine.dispose();
    println!("Done.");
    Ok(())
}
