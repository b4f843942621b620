//! Pairwise interaction kernel
//!
//! Every pair closer than `r_max` interacts. Inside `beta * r_max` all
//! particles repel regardless of group; between `beta * r_max` and `r_max`
//! the attraction coefficient shapes a triangular bump peaking halfway.

use glam::Vec2;

/// Piecewise-linear force profile over normalised distance `r` in `[0, 1)`.
pub fn force(r: f32, attraction: f32, beta: f32) -> f32 {
    if r < beta {
        r / beta - 1.0
    } else if beta < r && r < 1.0 {
        attraction * (1.0 - (2.0 * r - 1.0 - beta).abs() / (1.0 - beta))
    } else {
        0.0
    }
}

/// Interaction radius and repulsion zone for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractionRules {
    pub r_max: f32,
    pub beta: f32,
}

impl AttractionRules {
    pub fn new(r_max: f32, beta: f32) -> Self {
        Self { r_max, beta }
    }

    /// Force exerted on a particle by a neighbour at offset `delta`.
    pub fn attract(&self, delta: Vec2, attraction: f32) -> Vec2 {
        let r = delta.length();
        if r > 0.0 && r < self.r_max {
            delta / r * force(r / self.r_max, attraction, self.beta)
        } else {
            Vec2::ZERO
        }
    }
}
