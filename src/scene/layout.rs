//! Spherical layout: distributes `count` entities roughly evenly over a
//! sphere around the origin. Two interchangeable strategies; both are pure
//! and deterministic for a given count and radius.

use std::f32::consts::PI;

use super::Vec3;

/// Point-distribution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutStrategy {
    /// Latitude stepping: `phi = acos(-1 + 2i/n)`, `theta = sqrt(n*pi)*phi`.
    #[default]
    Latitude,
    /// Golden-angle (Fibonacci) spiral — better spacing for small counts.
    Fibonacci,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub strategy: LayoutStrategy,
    pub radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::Latitude,
            radius: 25.0,
        }
    }
}

impl LayoutConfig {
    /// The spiral variant ships with a wider radius to compensate for its
    /// tighter packing near the poles.
    pub fn fibonacci() -> Self {
        Self {
            strategy: LayoutStrategy::Fibonacci,
            radius: 35.0,
        }
    }
}

/// Compute `count` positions on the configured sphere.
///
/// `count == 0` yields an empty vector; no division happens before the
/// count is known to be non-zero.
pub fn sphere_layout(count: usize, cfg: &LayoutConfig) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f32;
    let r = cfg.radius;
    (0..count)
        .map(|i| {
            let i = i as f32;
            let (theta, phi) = match cfg.strategy {
                LayoutStrategy::Latitude => {
                    let phi = (-1.0 + 2.0 * i / n).acos();
                    ((n * PI).sqrt() * phi, phi)
                }
                LayoutStrategy::Fibonacci => {
                    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
                    let phi = (1.0 - 2.0 * (i + 0.5) / n).acos();
                    (i * golden_angle, phi)
                }
            };
            Vec3::new(
                r * theta.cos() * phi.sin(),
                r * theta.sin() * phi.sin(),
                r * phi.cos(),
            )
        })
        .collect()
}
