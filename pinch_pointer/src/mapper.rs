//! Normalized landmark coordinates → target pixel space.

use crate::error::ControlError;
use crate::landmark::Landmark;

// ════════════════════════════════════════════════════════════════════════════
// ScreenSpace / ScreenPoint
// ════════════════════════════════════════════════════════════════════════════

/// Bounds of the actuation surface, queried once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSpace {
    width:  u32,
    height: u32,
}

impl ScreenSpace {
    pub fn new(width: u32, height: u32) -> Result<Self, ControlError> {
        if width == 0 || height == 0 {
            return Err(ControlError::EmptyScreen { width, height });
        }
        // Pixels are addressed as i32.
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(ControlError::ScreenTooLarge { width, height });
        }
        Ok(ScreenSpace { width, height })
    }

    pub fn width(&self)  -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
}

/// Integer pixel position in target space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self { ScreenPoint { x, y } }

    /// Euclidean distance in pixels.
    pub fn distance(self, other: ScreenPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CoordinateMapper
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    space:    ScreenSpace,
    mirror_x: bool,
}

impl CoordinateMapper {
    pub fn new(space: ScreenSpace) -> Self {
        CoordinateMapper { space, mirror_x: false }
    }

    /// Flip the horizontal axis, so a camera facing the user behaves like a
    /// mirror.
    pub fn mirrored(mut self, mirror_x: bool) -> Self {
        self.mirror_x = mirror_x;
        self
    }

    pub fn space(&self) -> ScreenSpace { self.space }

    /// `(round(nx*W), round(ny*H))`, clamped into `[0, W-1] × [0, H-1]`.
    pub fn map(&self, point: Landmark) -> ScreenPoint {
        let nx = if self.mirror_x { 1.0 - point.x as f64 } else { point.x as f64 };
        let ny = point.y as f64;
        ScreenPoint {
            x: scale_axis(nx, self.space.width),
            y: scale_axis(ny, self.space.height),
        }
    }
}

fn scale_axis(normalized: f64, extent: u32) -> i32 {
    // NaN casts to 0; infinities saturate and are clamped below.
    let pixel = (normalized * extent as f64).round() as i64;
    pixel.clamp(0, extent as i64 - 1) as i32
}
