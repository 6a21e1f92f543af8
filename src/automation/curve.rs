//! Interpolation curves for timed ramps.
//!
//! Curves define how a ramp travels between its start and end values. The
//! fades in and out of the soundscape are linear by default; the other
//! shapes are available to configurations that want an eased onset.

use serde::{Deserialize, Serialize};

/// Interpolation curve types for ramp shaping.
///
/// All curves map a normalized input value [0, 1] to a normalized output value [0, 1],
/// allowing them to be used for any parameter range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// Linear interpolation (constant rate of change)
    #[default]
    Linear,

    /// Exponential curve (slow start, fast finish)
    ///
    /// The parameter controls steepness:
    /// - `2.0` = squared curve
    /// - `3.0` = cubed curve
    /// - Higher values create steeper curves
    Exponential(f64),

    /// Logarithmic curve (fast start, slow finish)
    ///
    /// Inverse of exponential. The parameter controls steepness.
    Logarithmic(f64),

    /// Smooth S-curve with ease-in and ease-out
    ///
    /// Uses smoothstep interpolation for gradual acceleration and deceleration.
    SCurve,
}

impl Curve {
    /// Apply the curve to a normalized value.
    ///
    /// # Arguments
    ///
    /// * `t` - Input value, clamped to [0, 1]
    ///
    /// # Returns
    ///
    /// Curved output value in [0, 1]
    ///
    /// # Examples
    ///
    /// ```
    /// use zendrone::Curve;
    ///
    /// let linear = Curve::Linear;
    /// assert_eq!(linear.apply(0.5), 0.5);
    ///
    /// let exp = Curve::Exponential(2.0);
    /// assert_eq!(exp.apply(0.5), 0.25); // 0.5^2
    /// ```
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::Exponential(exp) => t.powf(*exp),
            Curve::Logarithmic(exp) => 1.0 - (1.0 - t).powf(*exp),
            Curve::SCurve => {
                // Smoothstep: cubic ease in/out
                t * t * (3.0 - 2.0 * t)
            }
        }
    }

    /// Map a value from one range to another using this curve.
    ///
    /// Ramps use this to turn a point in time (`from_range` = start and end
    /// time) into a parameter value (`to_range` = start and end value).
    ///
    /// # Arguments
    ///
    /// * `t` - Input value in the `from_range`
    /// * `from_range` - Input range as (min, max)
    /// * `to_range` - Output range as (min, max)
    ///
    /// # Returns
    ///
    /// Mapped value in `to_range` with curve applied
    ///
    /// # Examples
    ///
    /// ```
    /// use zendrone::Curve;
    ///
    /// let curve = Curve::Exponential(2.0);
    /// // Map 0.5 from range [0, 1] to [0, 100] with exponential curve
    /// let result = curve.map(0.5, (0.0, 1.0), (0.0, 100.0));
    /// assert_eq!(result, 25.0); // 0.5^2 * 100 = 25
    /// ```
    pub fn map(&self, t: f64, from_range: (f64, f64), to_range: (f64, f64)) -> f64 {
        let (from_min, from_max) = from_range;
        let (to_min, to_max) = to_range;

        // Normalize to [0, 1]
        let normalized = (t - from_min) / (from_max - from_min);

        // Apply curve
        let curved = self.apply(normalized);

        // Map to target range
        to_min + curved * (to_max - to_min)
    }
}
