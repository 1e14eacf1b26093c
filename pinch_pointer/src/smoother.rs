//! First-order exponential smoothing of the pointer position.
//!
//! Each call moves the output `1/factor` of the way from its previous value
//! toward the raw input. Two scalars of state, no history buffer.
//!
//! A larger `factor` damps more detector jitter and adds more lag; a step
//! input settles to within `ε` after about `factor * ln(1/ε)` frames. The
//! default of 5 settles to 1% in roughly 23 frames, under a second at
//! webcam rates.

use crate::error::ControlError;
use crate::mapper::ScreenPoint;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedPoint {
    pub x: f64,
    pub y: f64,
}

impl SmoothedPoint {
    /// Nearest pixel.
    pub fn to_pixel(self) -> ScreenPoint {
        ScreenPoint::new(self.x.round() as i32, self.y.round() as i32)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionSmoother {
    factor: f64,
    prev:   SmoothedPoint,
}

impl MotionSmoother {
    /// Smoother starting at the origin.
    pub fn new(factor: f64) -> Result<Self, ControlError> {
        if !factor.is_finite() || factor <= 1.0 {
            return Err(ControlError::InvalidSmoothingFactor(factor));
        }
        Ok(MotionSmoother { factor, prev: SmoothedPoint::default() })
    }

    pub fn factor(&self) -> f64 { self.factor }

    /// Last output (the origin before the first call).
    pub fn current(&self) -> SmoothedPoint { self.prev }

    pub fn smooth(&mut self, raw: ScreenPoint) -> SmoothedPoint {
        let next = SmoothedPoint {
            x: self.prev.x + (raw.x as f64 - self.prev.x) / self.factor,
            y: self.prev.y + (raw.y as f64 - self.prev.y) / self.factor,
        };
        self.prev = next;
        next
    }

    pub fn reset(&mut self) {
        self.prev = SmoothedPoint::default();
    }

    /// Jump straight to `point`, e.g. when a hand reappears far away.
    pub fn reset_to(&mut self, point: ScreenPoint) {
        self.prev = SmoothedPoint { x: point.x as f64, y: point.y as f64 };
    }

    /// Approximate frames for a step input to settle within `epsilon`
    /// (relative) of its target.
    pub fn settling_frames(&self, epsilon: f64) -> f64 {
        self.factor * (1.0 / epsilon).ln()
    }
}
