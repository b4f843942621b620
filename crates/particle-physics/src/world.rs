//! Toroidal simulation space

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WORLD_SIZE;

/// Rectangular world whose opposite edges are joined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// World filling half of a window, the way the renderer centres it.
    pub fn for_window(width: u32, height: u32) -> Self {
        Self::new((width / 2).max(1) as f32, (height / 2).max(1) as f32)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Bring a position back into `[0, width) x [0, height)`.
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }

    /// Shortest vector from `from` to `to`, crossing edges when that is closer.
    pub fn displacement(&self, from: Vec2, to: Vec2) -> Vec2 {
        Vec2::new(
            fold_axis(to.x - from.x, self.width),
            fold_axis(to.y - from.y, self.height),
        )
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_SIZE, DEFAULT_WORLD_SIZE)
    }
}

fn wrap_axis(v: f32, size: f32) -> f32 {
    let wrapped = v.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size {
        0.0
    } else {
        wrapped
    }
}

fn fold_axis(d: f32, size: f32) -> f32 {
    let half = size * 0.5;
    if d > half {
        d - size
    } else if d < -half {
        d + size
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_inside() {
        let world = World::new(500.0, 400.0);
        assert_eq!(world.wrap(Vec2::new(10.0, 20.0)), Vec2::new(10.0, 20.0));
        assert_eq!(world.wrap(Vec2::new(510.0, -10.0)), Vec2::new(10.0, 390.0));
        assert_eq!(world.wrap(Vec2::new(-500.0, 800.0)), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_wrap_tiny_negative() {
        let world = World::new(500.0, 500.0);
        let p = world.wrap(Vec2::new(-1.0e-9, 0.0));
        assert!(p.x >= 0.0 && p.x < 500.0);
    }

    #[test]
    fn test_displacement_crosses_edge() {
        let world = World::new(500.0, 500.0);
        let d = world.displacement(Vec2::new(490.0, 10.0), Vec2::new(5.0, 495.0));
        assert_eq!(d, Vec2::new(15.0, -15.0));
    }

    #[test]
    fn test_displacement_direct() {
        let world = World::default();
        let d = world.displacement(Vec2::new(100.0, 100.0), Vec2::new(150.0, 80.0));
        assert_eq!(d, Vec2::new(50.0, -20.0));
    }

    #[test]
    fn test_for_window_is_half() {
        let world = World::for_window(1000, 1000);
        assert_eq!(world, World::new(500.0, 500.0));
    }
}
