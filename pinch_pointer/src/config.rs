//! Control-loop tuning, fixed at startup.

use serde::Deserialize;

use crate::error::ControlError;

/// Hands consulted per frame. Extra detections are ignored.
pub const MAX_HANDS: usize = 1;

/// Tuning for the pointer control loop.
///
/// Every field has a default, so a config file may set any subset of them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlConfig {
    /// Smoothing divisor (> 1). Larger is steadier but lags more.
    pub smoothing_factor: f64,
    /// Index/thumb distance in target pixels below which the hand is pinched.
    pub pinch_threshold: f64,
    /// Distance at which a held pinch lets go. `None` means `pinch_threshold`.
    pub release_threshold: Option<f64>,
    /// Mirror the horizontal axis (front-facing cameras).
    pub mirror_x: bool,
    /// Detections scoring below this are treated as "no hand".
    pub min_confidence: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        ControlConfig {
            smoothing_factor:  5.0,
            pinch_threshold:   50.0,
            release_threshold: None,
            mirror_x:          false,
            min_confidence:    0.8,
        }
    }
}

impl ControlConfig {
    pub fn release(&self) -> f64 {
        self.release_threshold.unwrap_or(self.pinch_threshold)
    }

    pub fn validate(&self) -> Result<(), ControlError> {
        if !self.smoothing_factor.is_finite() || self.smoothing_factor <= 1.0 {
            return Err(ControlError::InvalidSmoothingFactor(self.smoothing_factor));
        }
        if !self.pinch_threshold.is_finite() || self.pinch_threshold <= 0.0 {
            return Err(ControlError::InvalidThreshold(self.pinch_threshold));
        }
        let release = self.release();
        if !release.is_finite() || release < self.pinch_threshold {
            return Err(ControlError::InvalidReleaseThreshold {
                threshold: self.pinch_threshold,
                release,
            });
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ControlError::InvalidConfidence(self.min_confidence));
        }
        Ok(())
    }
}
