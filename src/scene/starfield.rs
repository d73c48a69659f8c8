//! Twinkling star backdrop with pointer parallax.
//!
//! Star placement is deterministic — an integer hash seeds position,
//! size, opacity, and twinkle phase — so the field is identical across
//! runs and resizes. Coordinates are stored normalized to [0, 1] and
//! scaled by the viewport at draw time.

use std::f32::consts::TAU;

use super::camera::{ParallaxConfig, PointerNdc};

pub const DEFAULT_STAR_COUNT: usize = 150;

#[derive(Debug, Clone, Copy)]
pub struct Star {
    /// Normalized horizontal position, [0, 1].
    pub x: f32,
    /// Normalized vertical position, [0, 1].
    pub y: f32,
    pub radius: f32,
    /// Peak opacity; the twinkle modulates below this.
    pub opacity: f32,
    twinkle_speed: f32,
    twinkle_phase: f32,
}

impl Star {
    /// Opacity at the current twinkle phase, always within [0, peak].
    pub fn current_opacity(&self) -> f32 {
        self.opacity * (0.5 + self.twinkle_phase.sin() * 0.5)
    }

    /// Pointer-parallax offset in pixels; larger (nearer) stars move more.
    pub fn parallax_offset(&self, pointer: PointerNdc, cfg: &ParallaxConfig) -> (f32, f32) {
        (
            pointer.x * cfg.star_sensitivity * self.radius,
            pointer.y * cfg.star_sensitivity * self.radius,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

fn field_hash(seed: usize) -> f32 {
    let x = seed.wrapping_mul(2654435761) ^ seed.wrapping_mul(340573321);
    ((x & 0xFFFF) as f32) / 65535.0
}

impl Starfield {
    pub fn new(count: usize) -> Self {
        let stars = (0..count)
            .map(|i| Star {
                x: field_hash(i.wrapping_mul(37).wrapping_add(1)),
                y: field_hash(i.wrapping_mul(53).wrapping_add(2)),
                radius: field_hash(i.wrapping_mul(71).wrapping_add(3)) * 1.2 + 0.3,
                opacity: field_hash(i.wrapping_mul(19).wrapping_add(4)) * 0.4 + 0.2,
                twinkle_speed: field_hash(i.wrapping_mul(89).wrapping_add(5)) * 0.015 + 0.003,
                twinkle_phase: field_hash(i.wrapping_mul(101).wrapping_add(6)) * TAU,
            })
            .collect();
        Self { stars }
    }

    /// Advance every star's twinkle phase by one frame.
    pub fn tick(&mut self) {
        for star in &mut self.stars {
            star.twinkle_phase = (star.twinkle_phase + star.twinkle_speed).rem_euclid(TAU);
        }
    }
}
