//! Renders a breathing session offline to a mono WAV file.
//!
//! Usage: cargo run --example render_soundscape --features wav [out.wav] [seconds]

mod common;

use anyhow::Result;
use common::BreathingPattern;
use hound::{SampleFormat, WavSpec, WavWriter};
use zendrone::{AmbientEngine, OfflineHost};

const SAMPLE_RATE: u32 = 44100;
/// Breathing updates once per block, like a UI frame
const BLOCK_SECONDS: f64 = 0.02;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "soundscape.wav".to_string());
    let seconds: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(30.0);

    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&path, spec)?;

    let mut engine = AmbientEngine::<SAMPLE_RATE, _>::with_defaults(OfflineHost::new());
    let pattern = BreathingPattern::default();
    engine.start();

    let fade_out = engine.config().fade.fade_out_seconds;
    let mut stopped = false;
    let mut elapsed = 0.0;
    while elapsed < seconds + fade_out {
        if !stopped && elapsed >= seconds {
            engine.stop();
            stopped = true;
        }
        engine.update_breathing(pattern.scale_at(elapsed));

        let Some(context) = engine.context_mut() else {
            anyhow::bail!("offline host did not produce a context");
        };
        for sample in context.render_seconds(BLOCK_SECONDS) {
            writer.write_sample(sample as f32)?;
        }
        elapsed += BLOCK_SECONDS;
    }

    writer.finalize()?;
    engine.dispose();
    println!("Wrote {:.1}s to {}", seconds + fade_out, path);
    Ok(())
}
