//! 3D→2D projection for the floating-label overlay.
//!
//! A pure function of (world position, camera, viewport) — it is invoked
//! directly from the per-frame render callback rather than on a timer, so
//! every camera move and viewport resize is picked up on the next frame
//! with no redundant recomputation in between.

use thiserror::Error;

use super::{CameraState, ScreenPos, Vec3, Viewport};

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// Camera is at (or within epsilon of) the world position; the scale
    /// factor would blow up. The caller skips rendering the entity for
    /// this frame.
    #[error("degenerate projection: camera distance {distance} below epsilon")]
    Degenerate { distance: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Apparent-size falloff with distance. The source carried both 300
    /// and 400 across overlay variants; 400 is the shipped value.
    pub projection_constant: f32,
    /// Off-screen slack so labels mid-transition still render.
    pub margin: f32,
    /// Minimum camera distance before the projection is degenerate.
    pub epsilon: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_constant: 400.0,
            margin: 200.0,
            epsilon: 1e-6,
        }
    }
}

/// Project a world position to screen space.
///
/// Visibility requires the point to be in front of the camera
/// (`world.z < camera.z`) and inside the margin-padded viewport.
pub fn project(
    world: Vec3,
    camera: &CameraState,
    viewport: Viewport,
    cfg: &ProjectionConfig,
) -> Result<ScreenPos, ProjectionError> {
    let distance = world.distance(camera.position);
    if distance <= cfg.epsilon {
        return Err(ProjectionError::Degenerate { distance });
    }

    let scale = cfg.projection_constant / distance;
    let x = viewport.width / 2.0 + (world.x - camera.position.x) * scale;
    let y = viewport.height / 2.0 - (world.y - camera.position.y) * scale;

    let in_front = world.z < camera.position.z;
    let on_screen = x >= -cfg.margin
        && x <= viewport.width + cfg.margin
        && y >= -cfg.margin
        && y <= viewport.height + cfg.margin;

    Ok(ScreenPos {
        x,
        y,
        visible: in_front && on_screen,
        scale,
    })
}
