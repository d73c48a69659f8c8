//! Per-frame scene composition.
//!
//! Zips each entity's animated world state with its screen projection and
//! interaction flags into the render list consumed by the overlay layer.
//! Entity order is the batch order, every frame, so index `i` always
//! refers to the same entity and animated state is never reset spuriously.

use super::animation::AnimatedState;
use super::projector::{project, ProjectionConfig};
use super::{CameraState, ScreenPos, Viewport};

/// One renderable entity for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    /// Index into the entity batch; stable across frames.
    pub index: usize,
    pub world: super::Vec3,
    pub screen: ScreenPos,
    /// Eased label scale (hover/selection growth).
    pub scale: f32,
    pub rotation: f32,
    pub glow: f32,
    pub hovered: bool,
    pub selected: bool,
}

/// Build the render list. Entities whose projection is degenerate this
/// frame (camera on top of them) are skipped, not fatal.
pub fn compose(
    animated: &[AnimatedState],
    camera: &CameraState,
    viewport: Viewport,
    hovered: Option<usize>,
    selected: Option<usize>,
    cfg: &ProjectionConfig,
) -> Vec<SceneNode> {
    let mut nodes = Vec::with_capacity(animated.len());
    for (index, state) in animated.iter().enumerate() {
        let screen = match project(state.position, camera, viewport, cfg) {
            Ok(screen) => screen,
            Err(_) => continue,
        };
        nodes.push(SceneNode {
            index,
            world: state.position,
            screen,
            scale: state.scale,
            rotation: state.rotation,
            glow: state.glow,
            hovered: hovered == Some(index),
            selected: selected == Some(index),
        });
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Vec3;

    const VIEWPORT: Viewport = Viewport { width: 1280.0, height: 800.0 };

    fn states(positions: &[Vec3]) -> Vec<AnimatedState> {
        positions.iter().copied().map(AnimatedState::at).collect()
    }

    #[test]
    fn order_is_stable_and_index_aligned() {
        let animated = states(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(5.0, 1.0, -3.0),
            Vec3::new(-5.0, -1.0, 3.0),
        ]);
        let camera = CameraState::default();
        let cfg = ProjectionConfig::default();
        let a = compose(&animated, &camera, VIEWPORT, Some(1), Some(2), &cfg);
        let b = compose(&animated, &camera, VIEWPORT, Some(1), Some(2), &cfg);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert!(a[1].hovered && !a[1].selected);
        assert!(a[2].selected && !a[2].hovered);
        for (i, node) in a.iter().enumerate() {
            assert_eq!(node.index, i);
        }
    }

    #[test]
    fn degenerate_entity_is_skipped_with_identity_preserved() {
        let camera = CameraState::default();
        let animated = states(&[
            Vec3::new(1.0, 0.0, 0.0),
            camera.position, // exactly at the camera
            Vec3::new(-1.0, 0.0, 0.0),
        ]);
        let cfg = ProjectionConfig::default();
        let nodes = compose(&animated, &camera, VIEWPORT, None, None, &cfg);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].index, 0);
        assert_eq!(nodes[1].index, 2);
    }
}
