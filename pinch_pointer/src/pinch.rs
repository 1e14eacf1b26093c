//! Edge-triggered pinch detection.
//!
//! The detector is a two-state machine over the index/thumb distance. A click
//! is emitted only on the `Idle → Pinched` transition, so holding a pinch for
//! any number of frames produces exactly one click.
//!
//! | state   | distance                 | next    | action |
//! |---------|--------------------------|---------|--------|
//! | Idle    | `< threshold`            | Pinched | click  |
//! | Idle    | `>= threshold`           | Idle    | —      |
//! | Pinched | `< release_threshold`    | Pinched | —      |
//! | Pinched | `>= release_threshold`   | Idle    | —      |
//!
//! `release_threshold` equals `threshold` unless hysteresis is configured.

use crate::error::ControlError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinchState {
    #[default]
    Idle,
    Pinched,
}

/// What a single distance sample did to the detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchTransition {
    /// `Idle → Pinched`; the caller must click.
    Pressed,
    /// `Pinched → Pinched`.
    Held,
    /// `Pinched → Idle`; re-arms the detector.
    Released,
    /// `Idle → Idle`.
    Open,
}

impl PinchTransition {
    pub fn is_click(self) -> bool { self == PinchTransition::Pressed }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PinchDetector {
    threshold:         f64,
    release_threshold: f64,
    state:             PinchState,
}

impl PinchDetector {
    pub fn new(threshold: f64) -> Result<Self, ControlError> {
        Self::with_release(threshold, threshold)
    }

    /// Detector that stays pinched until the distance reaches
    /// `release_threshold`.
    pub fn with_release(threshold: f64, release_threshold: f64) -> Result<Self, ControlError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ControlError::InvalidThreshold(threshold));
        }
        if !release_threshold.is_finite() || release_threshold < threshold {
            return Err(ControlError::InvalidReleaseThreshold {
                threshold,
                release: release_threshold,
            });
        }
        Ok(PinchDetector { threshold, release_threshold, state: PinchState::Idle })
    }

    pub fn state(&self) -> PinchState { self.state }
    pub fn threshold(&self) -> f64 { self.threshold }
    pub fn release_threshold(&self) -> f64 { self.release_threshold }

    pub fn update(&mut self, distance: f64) -> PinchTransition {
        // NaN compares false everywhere, so it reads as "not pinched".
        let (next, transition) = match self.state {
            PinchState::Idle if distance < self.threshold => {
                (PinchState::Pinched, PinchTransition::Pressed)
            }
            PinchState::Idle => (PinchState::Idle, PinchTransition::Open),
            PinchState::Pinched if distance < self.release_threshold => {
                (PinchState::Pinched, PinchTransition::Held)
            }
            PinchState::Pinched => (PinchState::Idle, PinchTransition::Released),
        };
        self.state = next;
        transition
    }
}
