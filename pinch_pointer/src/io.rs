//! Seams to the outside world: frames in, landmarks out of a detector,
//! pointer commands out, diagnostics drawn, stop requested.
//!
//! The control loop only ever sees these traits, so a camera, a LeapMotion
//! controller, a simulation window or a scripted test fixture all plug in the
//! same way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::controller::FrameReport;
use crate::landmark::Hand;

// ════════════════════════════════════════════════════════════════════════════
// Collaborator traits
// ════════════════════════════════════════════════════════════════════════════

/// Blocking supplier of frames.
pub trait FrameSource {
    type Frame;

    /// Wait for the next frame. `None` means the source is exhausted or has
    /// failed; the loop ends and does not retry.
    fn next_frame(&mut self) -> Option<Self::Frame>;
}

/// Hand-landmark detector.
pub trait LandmarkSource<F> {
    /// All hands found in `frame`, best first. May be empty.
    fn detect(&mut self, frame: &F) -> Vec<Hand>;
}

/// Absolute-position pointer. Both calls are fire-and-forget.
pub trait PointerActuator {
    fn move_to(&mut self, x: i32, y: i32);
    fn click(&mut self);
}

/// Diagnostic rendering of a processed frame.
pub trait Overlay<F> {
    fn render(&mut self, frame: &F, report: &FrameReport);
}

impl<A: PointerActuator + ?Sized> PointerActuator for Box<A> {
    fn move_to(&mut self, x: i32, y: i32) { (**self).move_to(x, y) }
    fn click(&mut self) { (**self).click() }
}

// ════════════════════════════════════════════════════════════════════════════
// Paired — a separate source and overlay driven as one surface
// ════════════════════════════════════════════════════════════════════════════

/// Joins a frame source and an overlay that are different objects, e.g. a
/// tracking device feeding frames while a window draws diagnostics.
pub struct Paired<S, O> {
    pub source:  S,
    pub overlay: O,
}

impl<S, O> Paired<S, O> {
    pub fn new(source: S, overlay: O) -> Self {
        Paired { source, overlay }
    }
}

impl<S: FrameSource, O> FrameSource for Paired<S, O> {
    type Frame = S::Frame;
    fn next_frame(&mut self) -> Option<S::Frame> { self.source.next_frame() }
}

impl<S: FrameSource, O: Overlay<S::Frame>> Overlay<S::Frame> for Paired<S, O> {
    fn render(&mut self, frame: &S::Frame, report: &FrameReport) {
        self.overlay.render(frame, report)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// StopSignal
// ════════════════════════════════════════════════════════════════════════════

/// Cooperative stop flag, polled by the loop once per frame.
///
/// Cloning shares the flag, so a window's quit key or another thread can
/// request a stop; the loop only notices between frames.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self { Self::default() }

    pub fn request(&self) { self.0.store(true, Ordering::SeqCst); }

    pub fn is_requested(&self) -> bool { self.0.load(Ordering::SeqCst) }
}
