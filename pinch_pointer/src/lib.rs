//! # pinch_pointer
//!
//! Turns a per-frame stream of hand landmarks into pointer motion and
//! debounced clicks.
//!
//! ```text
//! LandmarkSource ─► CoordinateMapper ─► MotionSmoother ─► PointerActuator::move_to
//!                         │
//!                         └─(raw tips)─► PinchDetector ──► PointerActuator::click
//! ```
//!
//! * [`CoordinateMapper`] scales normalized landmarks to target pixels and
//!   clamps detector overshoot to the screen edge.
//! * [`MotionSmoother`] is a single-pole exponential filter on the pointer.
//! * [`PinchDetector`] clicks once per pinch, on the `Idle → Pinched` edge.
//! * [`PointerController`] owns all of that state and runs the frame loop.
//!
//! Everything outside the loop (camera, detector model, OS pointer, window)
//! comes in through the traits in [`io`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pinch_pointer::{ControlConfig, PointerController, ScreenSpace, Hand, Landmark};
//! use pinch_pointer::io::PointerActuator;
//!
//! struct Print;
//! impl PointerActuator for Print {
//!     fn move_to(&mut self, x: i32, y: i32) { println!("move {x} {y}"); }
//!     fn click(&mut self) { println!("click"); }
//! }
//!
//! let space = ScreenSpace::new(1920, 1080).unwrap();
//! let mut ctl = PointerController::new(&ControlConfig::default(), space).unwrap();
//! let hand = Hand::from_tips(Landmark::new(0.5, 0.5), Landmark::new(0.51, 0.5), 0.95);
//! ctl.process(&[hand], &mut Print);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod io;
pub mod landmark;
pub mod mapper;
pub mod pinch;
pub mod smoother;

pub use config::{ControlConfig, MAX_HANDS};
pub use controller::{FrameReport, HandReport, LoopExit, PointerController, RunStats, RunSummary};
pub use error::ControlError;
pub use landmark::{Hand, HandLandmark, Landmark, HAND_CONNECTIONS, LANDMARK_COUNT};
pub use mapper::{CoordinateMapper, ScreenPoint, ScreenSpace};
pub use pinch::{PinchDetector, PinchState, PinchTransition};
pub use smoother::{MotionSmoother, SmoothedPoint};
