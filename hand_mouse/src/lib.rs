//! # hand_mouse
//!
//! Hand-gesture mouse built on [`pinch_pointer`]: the index fingertip steers
//! the pointer and pinching thumb and index together clicks, once per pinch.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Move index fingertip | Move pointer (smoothed) |
//! | Thumb meets index (pinch) | One left click |
//! | Hold the pinch | Nothing further until released |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse over the window is the index
//!   fingertip, Space or the left button is the pinch, the pointer is
//!   virtual (drawn in the window).
//! * `leap` — **Hardware mode**: fingertips from a LeapMotion controller.
//! * `os-pointer` — drive the real desktop pointer (`--os-pointer`).
//!
//! ### Simulation controls
//!
//! | Input | Meaning |
//! |---|---|
//! | Mouse over window | Index fingertip position |
//! | Mouse outside window | Hand lost |
//! | `Space` / left button held | Pinch |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod config;
pub mod error;
pub mod pointer;
pub mod source;
pub mod visualizer;

pub use error::AppError;
