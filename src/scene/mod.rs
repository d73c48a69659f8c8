//! The floating-label 3D scene: spherical layout, per-frame animation,
//! camera parallax, starfield backdrop, and the 3D→2D projection that
//! places HTML-style labels over the scene.
//!
//! Everything here is pure per-frame computation. No I/O, no timers —
//! the host's frame callback drives `SceneState::tick` and reads the
//! render list from `SceneState::compose`.

pub mod animation;
pub mod camera;
pub mod composer;
pub mod layout;
pub mod palette;
pub mod projector;
pub mod starfield;

use animation::{AnimatedState, AnimationConfig};
use camera::{ParallaxCamera, ParallaxConfig, PointerNdc};
use composer::SceneNode;
use layout::{sphere_layout, LayoutConfig};
use projector::ProjectionConfig;
use starfield::Starfield;

// ─── Shared geometry types ───────────────────────────────────────────────────

/// World-space position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn length(self) -> f32 {
        self.distance(Self::ZERO)
    }
}

/// Screen-space position produced by the projector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
    /// In front of the camera and within the (margin-padded) viewport.
    pub visible: bool,
    /// Distance-based apparent-size factor.
    pub scale: f32,
}

/// Viewport dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Camera position; the look-at target is implicitly the origin.
/// Read each frame by the projector, eased by the parallax controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 50.0),
        }
    }
}

// ─── Scene configuration ─────────────────────────────────────────────────────

/// All tunables of the scene, bundled so the host passes one value around.
#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    pub layout: LayoutConfig,
    pub projection: ProjectionConfig,
    pub animation: AnimationConfig,
    pub parallax: ParallaxConfig,
    pub star_count: usize,
}

// ─── SceneState ──────────────────────────────────────────────────────────────

/// Explicit scene state: base layout positions, per-entity animated state,
/// the parallax camera, and the starfield. Passed by reference into the
/// frame tick — there is no hidden module-level state.
pub struct SceneState {
    pub config: SceneConfig,
    pub camera: ParallaxCamera,
    pub starfield: Starfield,
    base: Vec<Vec3>,
    animated: Vec<AnimatedState>,
}

impl SceneState {
    pub fn new(config: SceneConfig) -> Self {
        let star_count = if config.star_count == 0 {
            starfield::DEFAULT_STAR_COUNT
        } else {
            config.star_count
        };
        Self {
            camera: ParallaxCamera::default(),
            starfield: Starfield::new(star_count),
            base: Vec::new(),
            animated: Vec::new(),
            config,
        }
    }

    /// Replace the entity batch: recompute the spherical layout and reset
    /// every animated state. Called whenever a new topic batch arrives.
    pub fn rebuild(&mut self, count: usize) {
        self.base = sphere_layout(count, &self.config.layout);
        self.animated = self.base.iter().copied().map(AnimatedState::at).collect();
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Advance one animation frame at scene time `t` (seconds).
    ///
    /// `hovered` / `selected` are entity indices into the current batch;
    /// either highlights the entity (scale-up target, brighter glow).
    pub fn tick(
        &mut self,
        t: f32,
        pointer: PointerNdc,
        hovered: Option<usize>,
        selected: Option<usize>,
    ) {
        self.camera.tick(pointer, &self.config.parallax);
        self.starfield.tick();
        for (i, (state, base)) in self.animated.iter_mut().zip(&self.base).enumerate() {
            let highlighted = hovered == Some(i) || selected == Some(i);
            state.tick(t, *base, highlighted, &self.config.animation);
        }
    }

    /// Produce the per-frame render list for the current camera.
    pub fn compose(
        &self,
        viewport: Viewport,
        hovered: Option<usize>,
        selected: Option<usize>,
    ) -> Vec<SceneNode> {
        composer::compose(
            &self.animated,
            &self.camera.state,
            viewport,
            hovered,
            selected,
            &self.config.projection,
        )
    }

    pub fn animated(&self) -> &[AnimatedState] {
        &self.animated
    }
}
