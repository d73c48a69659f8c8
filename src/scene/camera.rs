//! Pointer-driven parallax camera.
//!
//! The pointer position (normalized to [-1, 1] on both axes) maps to a
//! camera target; the camera eases toward it each frame while looking at
//! the origin. Depth (z) is fixed — parallax only shifts x/y.

use super::CameraState;

/// Pointer position in normalized device coordinates: (-1, -1) is the
/// top-left corner of the viewport, (1, 1) the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerNdc {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxConfig {
    /// How far the camera drifts from center at full pointer deflection.
    /// The source tried 5.0 and settled on 1.5.
    pub camera_sensitivity: f32,
    /// Starfield parallax strength, applied per star scaled by radius.
    /// The source tried 3.0 and settled on 0.5.
    pub star_sensitivity: f32,
    /// Exponential easing toward the pointer target.
    pub easing: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            camera_sensitivity: 1.5,
            star_sensitivity: 0.5,
            easing: 0.03,
        }
    }
}

/// Camera plus its easing state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallaxCamera {
    pub state: CameraState,
}

impl ParallaxCamera {
    /// Ease toward the pointer-derived target. Screen y grows downward,
    /// so the vertical deflection is negated.
    pub fn tick(&mut self, pointer: PointerNdc, cfg: &ParallaxConfig) {
        let target_x = pointer.x * cfg.camera_sensitivity;
        let target_y = -pointer.y * cfg.camera_sensitivity;
        let pos = &mut self.state.position;
        pos.x += (target_x - pos.x) * cfg.easing;
        pos.y += (target_y - pos.y) * cfg.easing;
    }
}
