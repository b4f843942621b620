//! Pixel-space camera for 2D visualization

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Camera uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Window position of the world's (0, 0) corner
    pub world_origin: [f32; 2],
    pub world_size: [f32; 2],
    pub ghost_color: [f32; 4],
    pub particle_radius: f32,
    pub particle_count: u32,
    pub tile_count: u32,
    pub _padding: u32,
}

/// Orthographic projection over the window in pixels, origin bottom-left, Y up.
pub struct ScreenCamera {
    pub width: f32,
    pub height: f32,
}

impl ScreenCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, 0.0, self.height, -1.0, 1.0)
    }

    /// Offset that centres a world of `world_size` in the window.
    pub fn centre_offset(&self, world_size: Vec2) -> Vec2 {
        (Vec2::new(self.width, self.height) - world_size) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_corners_map_to_clip_space() {
        let camera = ScreenCamera::new(1000, 800);
        let m = camera.build_view_projection_matrix();

        let bottom_left = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let top_right = m * Vec4::new(1000.0, 800.0, 0.0, 1.0);
        let centre = m * Vec4::new(500.0, 400.0, 0.0, 1.0);

        assert!((bottom_left.x + 1.0).abs() < 1e-6 && (bottom_left.y + 1.0).abs() < 1e-6);
        assert!((top_right.x - 1.0).abs() < 1e-6 && (top_right.y - 1.0).abs() < 1e-6);
        assert!(centre.x.abs() < 1e-6 && centre.y.abs() < 1e-6);
    }

    #[test]
    fn test_centre_offset() {
        let camera = ScreenCamera::new(1000, 1000);
        assert_eq!(
            camera.centre_offset(Vec2::new(500.0, 500.0)),
            Vec2::new(250.0, 250.0)
        );
    }

    #[test]
    fn test_uniform_layout() {
        // must match the WGSL `Camera` struct
        assert_eq!(std::mem::size_of::<CameraUniform>(), 112);
    }
}
