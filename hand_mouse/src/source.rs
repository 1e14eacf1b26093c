//! Landmark sources — simulated from the window's mouse, or real LeapMotion
//! tracking.
//!
//! Both end up as [`Hand`]s with normalized coordinates, so the control loop
//! cannot tell them apart.

use pinch_pointer::io::LandmarkSource;
use pinch_pointer::{Hand, HandLandmark, Landmark, LANDMARK_COUNT};

// ════════════════════════════════════════════════════════════════════════════
// SimFrame / SimLandmarkSource — always available
// ════════════════════════════════════════════════════════════════════════════

/// One polled snapshot of the simulation window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimFrame {
    /// Mouse position over the window, normalized to `[0, 1]`. `None` while
    /// the mouse is outside, which plays the part of a lost detection.
    pub cursor:   Option<(f32, f32)>,
    /// Pinch key (Space) or left button held.
    pub pinching: bool,
}

/// Turns a [`SimFrame`] into a synthetic hand.
///
/// The index tip follows the mouse and the rest of an open right hand hangs
/// below it. The thumb tip sits down-left of the index tip, far apart
/// normally and almost touching while the pinch key is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimLandmarkSource {
    /// Thumb offset (normalized, per axis) with the hand open.
    pub open_gap:  f32,
    /// Thumb offset while pinching.
    pub pinch_gap: f32,
}

impl Default for SimLandmarkSource {
    fn default() -> Self {
        SimLandmarkSource { open_gap: 0.08, pinch_gap: 0.005 }
    }
}

/// Open-hand pose relative to the index tip, in [`HandLandmark`] order.
/// Thumb joints past the base are placed along the thumb at runtime.
const SIM_POSE: [(f32, f32); LANDMARK_COUNT] = [
    (0.030, 0.300),                                                      // wrist
    (-0.030, 0.260), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0),                 // thumb
    (0.000, 0.150), (0.000, 0.100), (0.000, 0.050), (0.000, 0.000),      // index
    (0.035, 0.150), (0.035, 0.090), (0.035, 0.040), (0.035, -0.010),     // middle
    (0.065, 0.160), (0.068, 0.110), (0.070, 0.065), (0.072, 0.025),      // ring
    (0.090, 0.180), (0.095, 0.140), (0.100, 0.110), (0.104, 0.080),      // pinky
];

impl SimLandmarkSource {
    fn pose(&self, x: f32, y: f32, pinching: bool) -> [Landmark; LANDMARK_COUNT] {
        let gap = if pinching { self.pinch_gap } else { self.open_gap };
        let mut out = SIM_POSE.map(|(dx, dy)| Landmark::new(x + dx, y + dy));

        let base = out[HandLandmark::ThumbCmc.index()];
        let tip  = Landmark::new(x - gap, y + gap);
        let along = |t: f32| Landmark::new(base.x + (tip.x - base.x) * t, base.y + (tip.y - base.y) * t);
        out[HandLandmark::ThumbMcp.index()] = along(0.4);
        out[HandLandmark::ThumbIp.index()]  = along(0.7);
        out[HandLandmark::ThumbTip.index()] = tip;
        out
    }
}

impl LandmarkSource<SimFrame> for SimLandmarkSource {
    fn detect(&mut self, frame: &SimFrame) -> Vec<Hand> {
        let Some((x, y)) = frame.cursor else { return Vec::new() };
        vec![Hand::new(self.pose(x, y, frame.pinching), 1.0)]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hands from one LeapMotion tracking event, already normalized.
#[cfg(feature = "leap")]
#[derive(Clone, Debug, Default)]
pub struct LeapFrame {
    pub hands: Vec<Hand>,
}

/// Frame source backed by a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Joint positions (millimetres above the device) are normalized through a
/// fixed interaction box; points outside it overshoot `[0, 1]` and are
/// clamped later by the coordinate mapper.
#[cfg(feature = "leap")]
pub struct LeapSource {
    connection: leaprs::Connection,
}

#[cfg(feature = "leap")]
impl LeapSource {
    pub fn open() -> Result<Self, crate::error::AppError> {
        use crate::error::AppError;
        use leaprs::*;

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| AppError::Leap(format!("{:?}", e)))?;
        connection.open().map_err(|e| AppError::Leap(format!("{:?}", e)))?;
        log::info!("LeapMotion connection opened");
        Ok(LeapSource { connection })
    }

    /// All 21 landmarks from the tracked bones.
    ///
    /// Every digit (thumb included) contributes the base joints of its
    /// proximal, intermediate and distal bones and the end of the distal
    /// bone; the wrist is the end of the forearm.
    fn convert(hand: &leaprs::HandRef) -> Hand {
        let point = |[x, y, _]: [f32; 3]| interaction_box(x, y);

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks[HandLandmark::Wrist.index()] = point(hand.arm().next_joint().array());
        for (d, digit) in hand.digits().iter().enumerate() {
            let base = HandLandmark::ThumbCmc.index() + 4 * d;
            landmarks[base]     = point(digit.proximal().prev_joint().array());
            landmarks[base + 1] = point(digit.intermediate().prev_joint().array());
            landmarks[base + 2] = point(digit.distal().prev_joint().array());
            landmarks[base + 3] = point(digit.distal().next_joint().array());
        }
        Hand::new(landmarks, 1.0)
    }
}

// Interaction box, mm. x is left/right of the device, y is height above it.
#[cfg(any(feature = "leap", test))]
const BOX_X: (f32, f32) = (-200.0, 200.0);
#[cfg(any(feature = "leap", test))]
const BOX_Y: (f32, f32) = (100.0, 400.0);

/// Device millimetres to normalized frame coordinates.
#[cfg(any(feature = "leap", test))]
fn interaction_box(x: f32, y: f32) -> Landmark {
    let nx = (x - BOX_X.0) / (BOX_X.1 - BOX_X.0);
    // Screen y grows downward; hand height grows upward.
    let ny = 1.0 - (y - BOX_Y.0) / (BOX_Y.1 - BOX_Y.0);
    Landmark::new(nx, ny)
}

#[cfg(feature = "leap")]
impl pinch_pointer::io::FrameSource for LeapSource {
    type Frame = LeapFrame;

    /// Blocks until the next tracking event. Poll timeouts and non-tracking
    /// events are skipped, so a silent device stalls the loop.
    fn next_frame(&mut self) -> Option<LeapFrame> {
        use leaprs::EventRef;

        loop {
            let msg = match self.connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };
            if let EventRef::Tracking(frame) = msg.event() {
                let hands = frame.hands().iter().map(Self::convert).collect();
                return Some(LeapFrame { hands });
            }
        }
    }
}

/// Detector for [`LeapFrame`]s: the device has already done the detection.
#[cfg(feature = "leap")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TrackedHands;

#[cfg(feature = "leap")]
impl LandmarkSource<LeapFrame> for TrackedHands {
    fn detect(&mut self, frame: &LeapFrame) -> Vec<Hand> {
        frame.hands.clone()
    }
}
