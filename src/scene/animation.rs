//! Per-entity frame animation: floating drift, slow spin, eased hover
//! scale, and glow pulsation.
//!
//! The tick is a pure function of (scene time, base position, previous
//! state) — no I/O, no clocks of its own — so it is safe to drive at any
//! frequency and trivial to test.

use std::f32::consts::TAU;

use super::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Horizontal drift amplitude.
    pub amplitude_x: f32,
    /// Vertical drift amplitude.
    pub amplitude_y: f32,
    /// Radians added to the spin per tick, wrapped mod 2π.
    pub spin_rate: f32,
    /// Exponential-decay factor for scale easing.
    pub easing: f32,
    /// Scale target while hovered or selected (1.0 otherwise).
    pub hover_scale: f32,
    /// Glow opacity ceiling at rest.
    pub glow_base: f32,
    /// Glow opacity ceiling while hovered or selected.
    pub glow_hover: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            amplitude_x: 0.3,
            amplitude_y: 0.4,
            spin_rate: 0.003,
            easing: 0.1,
            hover_scale: 1.15,
            glow_base: 0.15,
            glow_hover: 0.4,
        }
    }
}

/// Animated state of one entity. Owned by the scene; recomputed every
/// frame from the previous frame's state and the entity's base position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedState {
    pub position: Vec3,
    pub scale: f32,
    pub rotation: f32,
    pub glow: f32,
}

impl AnimatedState {
    /// Fresh state at a base layout position.
    pub fn at(base: Vec3) -> Self {
        Self {
            position: base,
            scale: 1.0,
            rotation: 0.0,
            glow: 0.0,
        }
    }

    /// Advance one tick at scene time `t` (seconds).
    ///
    /// The drift phase is offset by the base position so neighbouring
    /// entities never bob in unison.
    pub fn tick(&mut self, t: f32, base: Vec3, highlighted: bool, cfg: &AnimationConfig) {
        self.position.y = base.y + (t + base.x).sin() * cfg.amplitude_y;
        self.position.x = base.x + (t * 0.5 + base.z).cos() * cfg.amplitude_x;
        self.position.z = base.z;

        self.rotation = (self.rotation + cfg.spin_rate).rem_euclid(TAU);

        let target = if highlighted { cfg.hover_scale } else { 1.0 };
        self.scale += (target - self.scale) * cfg.easing;

        let ceiling = if highlighted { cfg.glow_hover } else { cfg.glow_base };
        self.glow = (ceiling * (0.5 + (t * 2.0).sin() * 0.5)).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_deterministic() {
        let cfg = AnimationConfig::default();
        let base = Vec3::new(3.0, 1.0, -2.0);
        let mut a = AnimatedState::at(base);
        let mut b = AnimatedState::at(base);
        for step in 0..20 {
            let t = step as f32 * 0.016;
            a.tick(t, base, step % 2 == 0, &cfg);
            b.tick(t, base, step % 2 == 0, &cfg);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn scale_easing_converges() {
        let cfg = AnimationConfig {
            hover_scale: 1.5,
            easing: 0.1,
            ..AnimationConfig::default()
        };
        let base = Vec3::ZERO;
        let mut state = AnimatedState::at(base);
        assert!((state.scale - 1.0).abs() < 1e-6);
        for step in 0..50 {
            state.tick(step as f32 * 0.016, base, true, &cfg);
        }
        assert!(
            (state.scale - 1.5).abs() < 0.01,
            "scale {} did not converge",
            state.scale
        );
    }

    #[test]
    fn scale_eases_back_when_unhighlighted() {
        let cfg = AnimationConfig::default();
        let base = Vec3::ZERO;
        let mut state = AnimatedState::at(base);
        for step in 0..50 {
            state.tick(step as f32 * 0.016, base, true, &cfg);
        }
        let peak = state.scale;
        state.tick(1.0, base, false, &cfg);
        assert!(state.scale < peak, "no snap, but easing must move toward 1.0");
        for step in 0..100 {
            state.tick(step as f32 * 0.016, base, false, &cfg);
        }
        assert!((state.scale - 1.0).abs() < 0.01);
    }

    #[test]
    fn glow_stays_in_unit_range() {
        let cfg = AnimationConfig::default();
        let base = Vec3::new(-4.0, 2.0, 9.0);
        let mut state = AnimatedState::at(base);
        for step in 0..500 {
            let t = step as f32 * 0.1;
            state.tick(t, base, step % 3 == 0, &cfg);
            assert!((0.0..=1.0).contains(&state.glow), "glow {} out of range", state.glow);
        }
    }

    #[test]
    fn rotation_wraps_at_tau() {
        let cfg = AnimationConfig {
            spin_rate: 0.5,
            ..AnimationConfig::default()
        };
        let base = Vec3::ZERO;
        let mut state = AnimatedState::at(base);
        for step in 0..1000 {
            state.tick(step as f32 * 0.016, base, false, &cfg);
            assert!(state.rotation >= 0.0 && state.rotation < TAU);
        }
    }

    #[test]
    fn drift_stays_within_amplitude() {
        let cfg = AnimationConfig::default();
        let base = Vec3::new(10.0, -5.0, 3.0);
        let mut state = AnimatedState::at(base);
        for step in 0..300 {
            state.tick(step as f32 * 0.05, base, false, &cfg);
            assert!((state.position.y - base.y).abs() <= cfg.amplitude_y + 1e-5);
            assert!((state.position.x - base.x).abs() <= cfg.amplitude_x + 1e-5);
            assert_eq!(state.position.z, base.z);
        }
    }
}
