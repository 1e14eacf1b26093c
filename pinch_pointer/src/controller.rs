//! The per-frame control loop.
//!
//! [`PointerController`] owns every piece of state that survives between
//! frames (smoother and pinch detector) and is the only thing that mutates
//! it. Frames are handled strictly one after another: everything frame N
//! does is applied before frame N+1 is read.
//!
//! Per frame, for the first detected hand:
//!
//! 1. map index tip and thumb tip into target space;
//! 2. smooth the index tip and move the pointer there;
//! 3. feed the *raw* tip distance to the pinch detector, click on a press;
//! 4. report what happened to the overlay.
//!
//! A frame with no hand (or a first hand below the confidence gate) touches
//! no state and issues no pointer commands, so a one-frame detection dropout
//! in the middle of a pinch neither cancels it nor causes a second click.

use log::{debug, info, trace};

use crate::config::{ControlConfig, MAX_HANDS};
use crate::error::ControlError;
use crate::io::{FrameSource, LandmarkSource, Overlay, PointerActuator, StopSignal};
use crate::landmark::{Hand, LANDMARK_COUNT};
use crate::mapper::{CoordinateMapper, ScreenPoint, ScreenSpace};
use crate::pinch::{PinchDetector, PinchState, PinchTransition};
use crate::smoother::MotionSmoother;

// ════════════════════════════════════════════════════════════════════════════
// Reports
// ════════════════════════════════════════════════════════════════════════════

/// What the controller did with the hand it tracked this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReport {
    /// Raw mapped index tip.
    pub index_tip:  ScreenPoint,
    /// Raw mapped thumb tip.
    pub thumb_tip:  ScreenPoint,
    /// Smoothed position sent to the pointer.
    pub pointer:    ScreenPoint,
    /// Every landmark, raw-mapped, in [`HandLandmark`](crate::HandLandmark) order.
    pub skeleton:   [ScreenPoint; LANDMARK_COUNT],
    /// Raw index/thumb distance in target pixels.
    pub distance:   f64,
    pub transition: PinchTransition,
}

/// Per-frame outcome, handed to the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// 1-based frame counter.
    pub frame: u64,
    /// `None` when no usable hand was found.
    pub hand:  Option<HandReport>,
    pub state: PinchState,
}

impl FrameReport {
    pub fn clicked(&self) -> bool {
        self.hand.map_or(false, |h| h.transition.is_click())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames:      u64,
    pub hand_frames: u64,
    /// First hands dropped by the confidence gate.
    pub rejected:    u64,
    pub clicks:      u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// The frame source returned no frame.
    SourceExhausted,
    /// The stop signal was raised.
    StopRequested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub exit:  LoopExit,
    pub stats: RunStats,
}

// ════════════════════════════════════════════════════════════════════════════
// PointerController
// ════════════════════════════════════════════════════════════════════════════

pub struct PointerController {
    mapper:         CoordinateMapper,
    smoother:       MotionSmoother,
    pinch:          PinchDetector,
    min_confidence: f32,
    stats:          RunStats,
}

impl PointerController {
    pub fn new(config: &ControlConfig, space: ScreenSpace) -> Result<Self, ControlError> {
        config.validate()?;
        Ok(PointerController {
            mapper:         CoordinateMapper::new(space).mirrored(config.mirror_x),
            smoother:       MotionSmoother::new(config.smoothing_factor)?,
            pinch:          PinchDetector::with_release(config.pinch_threshold, config.release())?,
            min_confidence: config.min_confidence,
            stats:          RunStats::default(),
        })
    }

    pub fn space(&self) -> ScreenSpace { self.mapper.space() }
    pub fn pinch_state(&self) -> PinchState { self.pinch.state() }
    pub fn stats(&self) -> RunStats { self.stats }

    /// Restart smoothing from the origin. Pinch state is kept.
    pub fn reset_smoothing(&mut self) {
        self.smoother.reset();
    }

    /// Handle one frame's detections.
    pub fn process<A: PointerActuator>(&mut self, hands: &[Hand], actuator: &mut A) -> FrameReport {
        self.stats.frames += 1;
        let frame = self.stats.frames;

        let Some(hand) = hands.iter().take(MAX_HANDS).next() else {
            trace!("frame {frame}: no hand");
            return self.idle_report(frame);
        };
        if hand.score < self.min_confidence {
            self.stats.rejected += 1;
            debug!("frame {frame}: hand score {:.2} below {:.2}, ignored", hand.score, self.min_confidence);
            return self.idle_report(frame);
        }
        self.stats.hand_frames += 1;

        let skeleton  = hand.landmarks.map(|l| self.mapper.map(l));
        let index_tip = self.mapper.map(hand.index_tip());
        let thumb_tip = self.mapper.map(hand.thumb_tip());

        let pointer = self.smoother.smooth(index_tip).to_pixel();
        actuator.move_to(pointer.x, pointer.y);

        let distance   = index_tip.distance(thumb_tip);
        let transition = self.pinch.update(distance);
        match transition {
            PinchTransition::Pressed => {
                self.stats.clicks += 1;
                debug!("frame {frame}: pinch at {:?} (distance {distance:.1}), click", pointer);
                actuator.click();
            }
            PinchTransition::Released => {
                debug!("frame {frame}: pinch released (distance {distance:.1})");
            }
            PinchTransition::Held | PinchTransition::Open => {}
        }
        trace!("frame {frame}: index {:?} thumb {:?} pointer {:?}", index_tip, thumb_tip, pointer);

        FrameReport {
            frame,
            hand: Some(HandReport { index_tip, thumb_tip, pointer, skeleton, distance, transition }),
            state: self.pinch.state(),
        }
    }

    fn idle_report(&self, frame: u64) -> FrameReport {
        FrameReport { frame, hand: None, state: self.pinch.state() }
    }

    /// Drive the loop until the source runs dry or a stop is requested.
    ///
    /// `surface` supplies frames and draws the overlay. The stop signal is
    /// checked after each frame has been rendered, never mid-frame. Whatever
    /// the surface holds (camera, window) is released by its owner's `Drop`
    /// on either exit.
    pub fn run<S, D, A>(
        &mut self,
        surface:  &mut S,
        detector: &mut D,
        actuator: &mut A,
        stop:     &StopSignal,
    ) -> RunSummary
    where
        S: FrameSource + Overlay<<S as FrameSource>::Frame>,
        D: LandmarkSource<<S as FrameSource>::Frame>,
        A: PointerActuator,
    {
        info!("control loop started on {}x{}", self.space().width(), self.space().height());

        let exit = loop {
            let Some(frame) = surface.next_frame() else {
                break LoopExit::SourceExhausted;
            };
            let hands  = detector.detect(&frame);
            let report = self.process(&hands, actuator);
            surface.render(&frame, &report);

            if stop.is_requested() {
                break LoopExit::StopRequested;
            }
        };

        let stats = self.stats;
        info!(
            "control loop ended ({:?}): {} frames, {} with a hand, {} clicks",
            exit, stats.frames, stats.hand_frames, stats.clicks
        );
        RunSummary { exit, stats }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Landmark;

    #[derive(Debug, PartialEq)]
    enum Cmd { Move(i32, i32), Click }

    #[derive(Default)]
    struct Recorder(Vec<Cmd>);

    impl PointerActuator for Recorder {
        fn move_to(&mut self, x: i32, y: i32) { self.0.push(Cmd::Move(x, y)); }
        fn click(&mut self) { self.0.push(Cmd::Click); }
    }

    impl Recorder {
        fn clicks(&self) -> usize { self.0.iter().filter(|c| **c == Cmd::Click).count() }
    }

    /// Frames are already-detected hand lists; `None` in the script ends it.
    struct Script {
        frames:   std::vec::IntoIter<Vec<Hand>>,
        rendered: Vec<FrameReport>,
        stop_at:  Option<(u64, StopSignal)>,
    }

    impl Script {
        fn new(frames: Vec<Vec<Hand>>) -> Self {
            Script { frames: frames.into_iter(), rendered: Vec::new(), stop_at: None }
        }
    }

    impl FrameSource for Script {
        type Frame = Vec<Hand>;
        fn next_frame(&mut self) -> Option<Vec<Hand>> { self.frames.next() }
    }

    impl Overlay<Vec<Hand>> for Script {
        fn render(&mut self, _frame: &Vec<Hand>, report: &FrameReport) {
            self.rendered.push(*report);
            if let Some((n, stop)) = &self.stop_at {
                if report.frame == *n { stop.request(); }
            }
        }
    }

    struct PassThrough;
    impl LandmarkSource<Vec<Hand>> for PassThrough {
        fn detect(&mut self, frame: &Vec<Hand>) -> Vec<Hand> { frame.clone() }
    }

    fn screen() -> ScreenSpace { ScreenSpace::new(1000, 1000).unwrap() }

    fn controller() -> PointerController {
        PointerController::new(&ControlConfig::default(), screen()).unwrap()
    }

    /// Index tip at (0.5, 0.5); thumb `gap` pixels to the right on a
    /// 1000-wide screen.
    fn hand(gap: f32) -> Hand {
        Hand::from_tips(Landmark::new(0.5, 0.5), Landmark::new(0.5 + gap / 1000.0, 0.5), 1.0)
    }

    #[test]
    fn held_pinch_clicks_once() {
        let mut c = controller();
        let mut act = Recorder::default();
        for gap in [100.0, 100.0, 10.0, 10.0, 10.0, 100.0] {
            c.process(&[hand(gap)], &mut act);
        }
        assert_eq!(act.clicks(), 1);
        assert_eq!(c.stats().clicks, 1);
    }

    #[test]
    fn click_follows_the_move_of_the_same_frame() {
        let mut c = controller();
        let mut act = Recorder::default();
        let report = c.process(&[hand(10.0)], &mut act);
        assert!(report.clicked());
        assert_eq!(act.0, vec![Cmd::Move(100, 100), Cmd::Click]);
    }

    #[test]
    fn pointer_is_smoothed_but_pinch_uses_raw_positions() {
        let mut c = controller();
        let mut act = Recorder::default();
        let report = c.process(&[hand(10.0)], &mut act);
        let h = report.hand.unwrap();
        assert_eq!(h.index_tip, ScreenPoint::new(500, 500));
        assert_eq!(h.pointer, ScreenPoint::new(100, 100));
        assert_eq!(h.distance, 10.0);
    }

    #[test]
    fn report_carries_the_whole_mapped_hand() {
        use crate::HandLandmark;

        let mut c = controller();
        let mut act = Recorder::default();
        let mut h = hand(100.0);
        h.landmarks[HandLandmark::Wrist.index()] = Landmark::new(0.4, 0.9);
        h.landmarks[HandLandmark::PinkyTip.index()] = Landmark::new(1.2, 0.3);

        let report = c.process(&[h], &mut act).hand.unwrap();
        assert_eq!(report.skeleton[HandLandmark::Wrist.index()], ScreenPoint::new(400, 900));
        assert_eq!(report.skeleton[HandLandmark::PinkyTip.index()], ScreenPoint::new(999, 300));
        assert_eq!(report.skeleton[HandLandmark::IndexTip.index()], report.index_tip);
        assert_eq!(report.skeleton[HandLandmark::ThumbTip.index()], report.thumb_tip);
    }

    #[test]
    fn no_hand_frames_leave_state_alone() {
        let mut c = controller();
        let mut act = Recorder::default();
        c.process(&[hand(10.0)], &mut act);
        assert_eq!(c.pinch_state(), PinchState::Pinched);
        let before = act.0.len();

        for _ in 0..5 {
            let report = c.process(&[], &mut act);
            assert_eq!(report.hand, None);
            assert_eq!(report.state, PinchState::Pinched);
        }
        assert_eq!(act.0.len(), before);
        assert_eq!(c.pinch_state(), PinchState::Pinched);

        // Dropout during a held pinch does not produce a second click.
        c.process(&[hand(10.0)], &mut act);
        assert_eq!(act.clicks(), 1);
    }

    #[test]
    fn no_hand_while_idle_never_clicks() {
        let mut c = controller();
        let mut act = Recorder::default();
        for _ in 0..10 { c.process(&[], &mut act); }
        assert!(act.0.is_empty());
        assert_eq!(c.pinch_state(), PinchState::Idle);
    }

    #[test]
    fn only_the_first_hand_is_consulted() {
        let mut c = controller();
        let mut act = Recorder::default();
        c.process(&[hand(100.0), hand(5.0)], &mut act);
        assert_eq!(act.clicks(), 0);
        assert_eq!(act.0, vec![Cmd::Move(100, 100)]);
    }

    #[test]
    fn low_confidence_hand_counts_as_no_detection() {
        let mut c = controller();
        let mut act = Recorder::default();
        let mut weak = hand(5.0);
        weak.score = 0.3;
        let report = c.process(&[weak], &mut act);
        assert_eq!(report.hand, None);
        assert!(act.0.is_empty());
        assert_eq!(c.stats().rejected, 1);
        assert_eq!(c.stats().hand_frames, 0);
    }

    #[test]
    fn mirrored_config_flips_pointer() {
        let cfg = ControlConfig { mirror_x: true, smoothing_factor: 2.0, ..ControlConfig::default() };
        let mut c = PointerController::new(&cfg, screen()).unwrap();
        let mut act = Recorder::default();
        let h = Hand::from_tips(Landmark::new(0.2, 0.4), Landmark::new(0.9, 0.4), 1.0);
        c.process(&[h], &mut act);
        assert_eq!(act.0, vec![Cmd::Move(400, 200)]);
    }

    #[test]
    fn reset_smoothing_restarts_from_origin() {
        let mut c = controller();
        let mut act = Recorder::default();
        c.process(&[hand(10.0)], &mut act);
        c.process(&[hand(100.0)], &mut act);
        c.reset_smoothing();
        c.process(&[hand(100.0)], &mut act);
        assert_eq!(act.0.last(), Some(&Cmd::Move(100, 100)));
        assert_eq!(c.stats().clicks, 1);
    }

    #[test]
    fn boxed_actuator_is_accepted() {
        let mut c = controller();
        let mut boxed: Box<dyn PointerActuator> = Box::new(Recorder::default());
        let report = c.process(&[hand(10.0)], &mut boxed);
        assert!(report.clicked());
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = ControlConfig { smoothing_factor: 0.5, ..ControlConfig::default() };
        assert!(PointerController::new(&cfg, screen()).is_err());
    }

    #[test]
    fn run_ends_when_source_is_exhausted() {
        let mut c = controller();
        let mut act = Recorder::default();
        let mut script = Script::new(vec![
            vec![hand(10.0)],
            vec![hand(100.0)],
            vec![],
            vec![hand(10.0)],
        ]);
        let summary = c.run(&mut script, &mut PassThrough, &mut act, &StopSignal::new());
        assert_eq!(summary.exit, LoopExit::SourceExhausted);
        assert_eq!(summary.stats.frames, 4);
        assert_eq!(summary.stats.hand_frames, 3);
        assert_eq!(summary.stats.clicks, 2);
        assert_eq!(script.rendered.len(), 4);
        assert_eq!(script.rendered.iter().map(|r| r.frame).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn stop_is_observed_after_rendering_the_frame() {
        let mut c = controller();
        let mut act = Recorder::default();
        let stop = StopSignal::new();
        let mut script = Script::new(vec![vec![hand(100.0)]; 10]);
        script.stop_at = Some((3, stop.clone()));
        let summary = c.run(&mut script, &mut PassThrough, &mut act, &stop);
        assert_eq!(summary.exit, LoopExit::StopRequested);
        assert_eq!(summary.stats.frames, 3);
        assert_eq!(script.rendered.len(), 3);
    }

    #[test]
    fn empty_source_exits_immediately() {
        let mut c = controller();
        let mut act = Recorder::default();
        let mut script = Script::new(Vec::new());
        let summary = c.run(&mut script, &mut PassThrough, &mut act, &StopSignal::new());
        assert_eq!(summary.exit, LoopExit::SourceExhausted);
        assert_eq!(summary.stats, RunStats::default());
    }
}
