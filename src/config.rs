//! Engine configuration.
//!
//! Every constant that shapes the soundscape lives here. `Default` reproduces
//! the reference tuning: a 136.1 Hz drone ensemble over pink noise, a 400 Hz
//! low-pass, and a 2 s / 1 s fade. Fields use `#[serde(default)]` so partial
//! JSON files only override what they name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{Curve, FilterType, NoiseColor, Waveform};

/// Complete engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub drone: DroneConfig,
    pub noise: NoiseConfig,
    pub filter: FilterConfig,
    pub mix: MixConfig,
    pub fade: FadeConfig,
    pub smoothing: SmoothingConfig,
    pub breathing: BreathingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drone: DroneConfig::default(),
            noise: NoiseConfig::default(),
            filter: FilterConfig::default(),
            mix: MixConfig::default(),
            fade: FadeConfig::default(),
            smoothing: SmoothingConfig::default(),
            breathing: BreathingConfig::default(),
        }
    }
}

/// The drone ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    /// Fundamental frequency in Hz
    pub fundamental: f64,
    pub voices: Vec<VoiceConfig>,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            // Approximates the traditional "Om" resonance
            fundamental: 136.1,
            voices: vec![
                VoiceConfig::new(1.0, 0.5, Waveform::Sine),
                VoiceConfig::new(0.5, 0.3, Waveform::Sine),
                VoiceConfig::new(1.5, 0.15, Waveform::Triangle),
                VoiceConfig::new(2.0, 0.08, Waveform::Sine),
            ],
        }
    }
}

/// One drone voice, relative to the fundamental.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub ratio: f64,
    /// Static gain into the drone bus
    pub gain: f64,
    #[serde(default)]
    pub waveform: Waveform,
}

impl VoiceConfig {
    pub fn new(ratio: f64, gain: f64, waveform: Waveform) -> Self {
        Self {
            ratio,
            gain,
            waveform,
        }
    }
}

/// The looping noise bed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub color: NoiseColor,
    /// Length of the pre-rendered loop in seconds
    pub loop_seconds: f64,
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            color: NoiseColor::Pink,
            loop_seconds: 2.0,
            seed: 0x5EED,
        }
    }
}

/// The shared filter stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub kind: FilterType,
    /// Cutoff at build time, in Hz
    pub base_cutoff: f64,
    pub q: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kind: FilterType::LowPass,
            base_cutoff: 400.0,
            q: 1.0,
        }
    }
}

/// Initial bus levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixConfig {
    pub drone_level: f64,
    pub noise_level: f64,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            drone_level: 0.5,
            noise_level: 0.3,
        }
    }
}

/// Master fades on start and stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Master gain reached by the fade in
    pub ceiling: f64,
    pub fade_in_seconds: f64,
    pub fade_out_seconds: f64,
    pub curve: Curve,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            ceiling: 0.5,
            fade_in_seconds: 2.0,
            fade_out_seconds: 1.0,
            curve: Curve::Linear,
        }
    }
}

/// Time constants of the exponential approaches, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Bus volume changes from the sliders
    pub volume_time_constant: f64,
    /// Breathing-driven cutoff changes
    pub cutoff_time_constant: f64,
    /// Breathing-driven master volume changes
    pub breathing_volume_time_constant: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            volume_time_constant: 0.1,
            cutoff_time_constant: 0.1,
            breathing_volume_time_constant: 0.15,
        }
    }
}

/// Linear mapping from breathing scale to cutoff and master volume.
///
/// Both parameters are `base + (scale - 1) * slope`, so a scale of exactly 1
/// (the resting breath) lands on the bases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    pub cutoff_base: f64,
    pub cutoff_slope: f64,
    pub volume_base: f64,
    pub volume_slope: f64,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            cutoff_base: 300.0,
            cutoff_slope: 450.0,
            volume_base: 0.4,
            volume_slope: 0.2,
        }
    }
}

impl BreathingConfig {
    /// Filter cutoff in Hz for a breathing scale.
    ///
    /// ```
    /// use zendrone::config::BreathingConfig;
    ///
    /// let breathing = BreathingConfig::default();
    /// assert_eq!(breathing.cutoff_for(1.0), 300.0);
    /// assert_eq!(breathing.cutoff_for(1.5), 525.0);
    /// ```
    pub fn cutoff_for(&self, scale: f64) -> f64 {
        self.cutoff_base + (scale - 1.0) * self.cutoff_slope
    }

    /// Master volume for a breathing scale.
    pub fn volume_for(&self, scale: f64) -> f64 {
        self.volume_base + (scale - 1.0) * self.volume_slope
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks the values the engine cannot run with.
    ///
    /// Levels and the breathing mapping are deliberately not range-checked;
    /// out-of-range gains pass straight through to the graph.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )))
            }
        }

        positive("drone.fundamental", self.drone.fundamental)?;
        if self.drone.voices.is_empty() {
            return Err(ConfigError::Invalid("drone.voices is empty".into()));
        }
        for voice in &self.drone.voices {
            positive("drone.voices[].ratio", voice.ratio)?;
        }
        positive("noise.loop_seconds", self.noise.loop_seconds)?;
        positive("filter.base_cutoff", self.filter.base_cutoff)?;
        positive("filter.q", self.filter.q)?;
        non_negative("fade.fade_in_seconds", self.fade.fade_in_seconds)?;
        non_negative("fade.fade_out_seconds", self.fade.fade_out_seconds)?;
        positive(
            "smoothing.volume_time_constant",
            self.smoothing.volume_time_constant,
        )?;
        positive(
            "smoothing.cutoff_time_constant",
            self.smoothing.cutoff_time_constant,
        )?;
        positive(
            "smoothing.breathing_volume_time_constant",
            self.smoothing.breathing_volume_time_constant,
        )?;
        Ok(())
    }
}
