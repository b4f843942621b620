//! GPU-side particle layout

use bytemuck::{Pod, Zeroable};
use particle_physics::{Particle, ParticleGroup};

/// One particle as seen by the shader (matches WGSL `Particle`).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuParticle {
    pub position: [f32; 2],
    pub _padding: [f32; 2],
    pub color: [f32; 4],
}

/// Decode one sRGB-encoded channel to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Colour to hand the shader so it appears as `rgba` on screen.
///
/// sRGB targets encode on store, so their input must be linear.
pub fn output_color(rgba: [f32; 4], srgb_target: bool) -> [f32; 4] {
    if !srgb_target {
        return rgba;
    }
    let [r, g, b, a] = rgba;
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
}

/// Convert particles to their GPU form, coloured by group.
pub fn pack_particles(
    particles: &[Particle],
    groups: &[ParticleGroup],
    srgb_target: bool,
    out: &mut Vec<GpuParticle>,
) {
    out.clear();
    out.extend(particles.iter().map(|particle| {
        let color = groups
            .get(particle.group)
            .map(|group| output_color(group.color.to_array(1.0), srgb_target))
            .unwrap_or([1.0; 4]);
        GpuParticle {
            position: particle.position.to_array(),
            _padding: [0.0; 2],
            color,
        }
    }));
}
