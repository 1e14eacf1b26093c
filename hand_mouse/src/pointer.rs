//! Pointer backends.
//!
//! [`OsPointer`] injects real mouse events through `rdev` (feature
//! `os-pointer`). [`VirtualPointer`] just remembers where the pointer would
//! be; it is used in simulation mode and whenever the OS backend is
//! unavailable.

use log::{info, trace, warn};
use serde::Deserialize;

use pinch_pointer::io::PointerActuator;
use pinch_pointer::ScreenSpace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerBackend {
    /// Pointer drawn in the visualizer window only.
    #[default]
    Virtual,
    /// The real desktop pointer.
    Os,
}

// ════════════════════════════════════════════════════════════════════════════
// VirtualPointer
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VirtualPointer {
    pub position: (i32, i32),
    pub clicks:   u64,
}

impl PointerActuator for VirtualPointer {
    fn move_to(&mut self, x: i32, y: i32) {
        trace!("virtual pointer → ({x}, {y})");
        self.position = (x, y);
    }

    fn click(&mut self) {
        self.clicks += 1;
        info!("click #{} at {:?}", self.clicks, self.position);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// OsPointer — rdev backend (feature = "os-pointer")
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "os-pointer")]
pub struct OsPointer;

#[cfg(feature = "os-pointer")]
impl OsPointer {
    fn send(event: &rdev::EventType) {
        if let Err(e) = rdev::simulate(event) {
            warn!("could not inject {:?}: {:?}", event, e);
        }
    }
}

#[cfg(feature = "os-pointer")]
impl PointerActuator for OsPointer {
    fn move_to(&mut self, x: i32, y: i32) {
        Self::send(&rdev::EventType::MouseMove { x: x as f64, y: y as f64 });
    }

    fn click(&mut self) {
        Self::send(&rdev::EventType::ButtonPress(rdev::Button::Left));
        // Some window systems drop a release that lands in the same instant.
        std::thread::sleep(std::time::Duration::from_millis(10));
        Self::send(&rdev::EventType::ButtonRelease(rdev::Button::Left));
        info!("click");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// open_pointer
// ════════════════════════════════════════════════════════════════════════════

/// Backend that can actually be driven from the given input.
///
/// When the input is the mouse itself (simulation mode), moving the OS
/// pointer would feed back into the next frame's index tip and push the
/// pointer out of the window, so the virtual pointer is used instead.
pub fn resolve_backend(requested: PointerBackend, mouse_input: bool) -> PointerBackend {
    match requested {
        PointerBackend::Os if mouse_input => {
            warn!("the OS pointer cannot follow a mouse-driven simulation, using the virtual pointer");
            PointerBackend::Virtual
        }
        other => other,
    }
}

/// Open the requested backend together with the target space it addresses.
///
/// The virtual pointer lives in `window` space. The OS pointer addresses the
/// primary display; if that cannot be queried, or the binary was built
/// without `os-pointer`, this falls back to the virtual pointer.
pub fn open_pointer(
    backend: PointerBackend,
    window:  ScreenSpace,
) -> (Box<dyn PointerActuator>, ScreenSpace) {
    match backend {
        PointerBackend::Virtual => (Box::new(VirtualPointer::default()), window),
        PointerBackend::Os => match open_os_pointer() {
            Some(pair) => pair,
            None => {
                warn!("falling back to the virtual pointer");
                (Box::new(VirtualPointer::default()), window)
            }
        },
    }
}

#[cfg(feature = "os-pointer")]
fn open_os_pointer() -> Option<(Box<dyn PointerActuator>, ScreenSpace)> {
    let (w, h) = match rdev::display_size() {
        Ok(size) => size,
        Err(e) => {
            warn!("display size unavailable: {:?}", e);
            return None;
        }
    };
    let space = match ScreenSpace::new(w as u32, h as u32) {
        Ok(space) => space,
        Err(e) => {
            warn!("{e}");
            return None;
        }
    };
    info!("OS pointer on a {}x{} display", w, h);
    Some((Box::new(OsPointer), space))
}

#[cfg(not(feature = "os-pointer"))]
fn open_os_pointer() -> Option<(Box<dyn PointerActuator>, ScreenSpace)> {
    warn!("built without the `os-pointer` feature");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_pointer_tracks_moves_and_clicks() {
        let mut p = VirtualPointer::default();
        p.move_to(12, 34);
        p.click();
        p.move_to(56, 78);
        p.click();
        assert_eq!(p, VirtualPointer { position: (56, 78), clicks: 2 });
    }

    #[test]
    fn virtual_backend_uses_window_space() {
        let window = ScreenSpace::new(960, 540).unwrap();
        let (_, space) = open_pointer(PointerBackend::Virtual, window);
        assert_eq!(space, window);
    }

    #[cfg(not(feature = "os-pointer"))]
    #[test]
    fn os_backend_falls_back_without_feature() {
        let window = ScreenSpace::new(960, 540).unwrap();
        let (_, space) = open_pointer(PointerBackend::Os, window);
        assert_eq!(space, window);
    }

    #[test]
    fn mouse_input_never_drives_the_os_pointer() {
        assert_eq!(resolve_backend(PointerBackend::Os, true), PointerBackend::Virtual);
        assert_eq!(resolve_backend(PointerBackend::Virtual, true), PointerBackend::Virtual);
    }

    #[test]
    fn tracked_input_keeps_the_requested_backend() {
        assert_eq!(resolve_backend(PointerBackend::Os, false), PointerBackend::Os);
        assert_eq!(resolve_backend(PointerBackend::Virtual, false), PointerBackend::Virtual);
    }

    #[test]
    fn simulated_os_request_stays_inside_the_window() {
        let window = ScreenSpace::new(960, 540).unwrap();
        let (_, space) = open_pointer(resolve_backend(PointerBackend::Os, true), window);
        assert_eq!(space, window);
    }

    #[test]
    fn backend_names_deserialize() {
        let b: PointerBackend = serde_json::from_str("\"os\"").unwrap();
        assert_eq!(b, PointerBackend::Os);
        let b: PointerBackend = serde_json::from_str("\"virtual\"").unwrap();
        assert_eq!(b, PointerBackend::Virtual);
    }
}
