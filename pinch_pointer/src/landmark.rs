//! Hand landmarks as delivered by a detector.
//!
//! A [`Hand`] is a fixed-shape record: 21 points, always in the same
//! anatomical order, addressed through [`HandLandmark`] rather than raw
//! integers or string keys.

/// Number of landmarks in one detected hand.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// HandLandmark
// ════════════════════════════════════════════════════════════════════════════

/// Anatomical index of a landmark within a [`Hand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandLandmark {
    Wrist     = 0,
    ThumbCmc  = 1,
    ThumbMcp  = 2,
    ThumbIp   = 3,
    ThumbTip  = 4,
    IndexMcp  = 5,
    IndexPip  = 6,
    IndexDip  = 7,
    IndexTip  = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp   = 13,
    RingPip   = 14,
    RingDip   = 15,
    RingTip   = 16,
    PinkyMcp  = 17,
    PinkyPip  = 18,
    PinkyDip  = 19,
    PinkyTip  = 20,
}

impl HandLandmark {
    pub const fn index(self) -> usize { self as usize }
}

/// Bones of the hand skeleton, for drawing: each finger from base to tip,
/// plus the knuckle line and the palm edges.
pub const HAND_CONNECTIONS: [(HandLandmark, HandLandmark); 21] = {
    use HandLandmark::*;
    [
        (Wrist, ThumbCmc), (ThumbCmc, ThumbMcp), (ThumbMcp, ThumbIp), (ThumbIp, ThumbTip),
        (Wrist, IndexMcp), (IndexMcp, IndexPip), (IndexPip, IndexDip), (IndexDip, IndexTip),
        (IndexMcp, MiddleMcp), (MiddleMcp, MiddlePip), (MiddlePip, MiddleDip), (MiddleDip, MiddleTip),
        (MiddleMcp, RingMcp), (RingMcp, RingPip), (RingPip, RingDip), (RingDip, RingTip),
        (RingMcp, PinkyMcp), (Wrist, PinkyMcp),
        (PinkyMcp, PinkyPip), (PinkyPip, PinkyDip), (PinkyDip, PinkyTip),
    ]
};

// ════════════════════════════════════════════════════════════════════════════
// Landmark / Hand
// ════════════════════════════════════════════════════════════════════════════

/// One landmark in normalized frame coordinates.
///
/// `x` and `y` are nominally in `[0, 1]`; detectors overshoot slightly near
/// the frame edges and that is not treated as an error. `z` is relative depth
/// and is ignored by the pointer pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }
}

/// One detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// Detection confidence in `[0, 1]`.
    pub score: f32,
}

impl Hand {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT], score: f32) -> Self {
        Hand { landmarks, score }
    }

    /// A hand where only the two pointer landmarks are meaningful.
    ///
    /// Every other landmark sits on the index tip. Used by scripted sources
    /// and tests.
    pub fn from_tips(index_tip: Landmark, thumb_tip: Landmark, score: f32) -> Self {
        let mut landmarks = [index_tip; LANDMARK_COUNT];
        landmarks[HandLandmark::ThumbTip.index()] = thumb_tip;
        Hand { landmarks, score }
    }

    pub fn landmark(&self, which: HandLandmark) -> Landmark {
        self.landmarks[which.index()]
    }

    pub fn index_tip(&self) -> Landmark { self.landmark(HandLandmark::IndexTip) }
    pub fn thumb_tip(&self) -> Landmark { self.landmark(HandLandmark::ThumbTip) }
}
