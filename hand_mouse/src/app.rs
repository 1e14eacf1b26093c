//! Wiring: window, landmark source, pointer backend and the control loop.

use log::info;

use pinch_pointer::io::StopSignal;
use pinch_pointer::{PointerController, RunSummary};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::pointer::{open_pointer, resolve_backend};
use crate::visualizer::Visualizer;

/// Run the application until the window closes or Q/Escape is pressed.
///
/// The window (and, in hardware mode, the tracking connection) are owned by
/// this function and dropped on return, whichever way the loop ended.
pub fn run(cfg: AppConfig) -> Result<RunSummary, AppError> {
    let stop = StopSignal::new();

    // ── Visualizer (window, quit keys; frame source in simulation mode) ──
    let mut vis = Visualizer::new(stop.clone())?;

    // ── Pointer backend and the space it addresses ───────────────────────
    // Without tracking hardware the window's mouse is the input.
    let backend = resolve_backend(cfg.pointer, cfg!(not(feature = "leap")));
    let (mut pointer, space) = open_pointer(backend, Visualizer::window_space()?);
    vis.set_target(space);

    let mut controller = PointerController::new(&cfg.control, space)?;
    info!(
        "smoothing factor {}, pinch threshold {}px (release {}px), mirror {}",
        cfg.control.smoothing_factor,
        cfg.control.pinch_threshold,
        cfg.control.release(),
        cfg.control.mirror_x,
    );

    #[cfg(feature = "leap")]
    let summary = {
        use crate::source::{LeapSource, TrackedHands};
        use pinch_pointer::io::Paired;

        let mut surface = Paired::new(LeapSource::open()?, vis);
        controller.run(&mut surface, &mut TrackedHands, &mut pointer, &stop)
    };

    #[cfg(not(feature = "leap"))]
    let summary = {
        use crate::source::SimLandmarkSource;

        let mut detector = SimLandmarkSource::default();
        controller.run(&mut vis, &mut detector, &mut pointer, &stop)
    };

    Ok(summary)
}
