//! Particle rendering system

use glam::Vec2;
use particle_physics::{Particle, ParticleGroup, GHOST_COLOR, PARTICLE_RADIUS};

use crate::camera::{CameraUniform, ScreenCamera};
use crate::instance::{output_color, pack_particles, GpuParticle};

/// The world plus its eight wrapped neighbours.
pub const TILE_COUNT: u32 = 9;

const INITIAL_CAPACITY: usize = 1024;

/// Tiles drawn per particle.
pub fn tile_count(show_ghosts: bool) -> u32 {
    if show_ghosts {
        TILE_COUNT
    } else {
        1
    }
}

pub struct ParticleRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    particle_buffer: wgpu::Buffer,
    capacity: usize,
    particle_count: u32,
    staging: Vec<GpuParticle>,
    srgb_target: bool,
    pub show_ghosts: bool,
}

impl ParticleRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        // Create camera buffer
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Load shader
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/particle.wgsl").into()),
        });

        // Create bind group layout
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Particle Bind Group Layout"),
            entries: &[
                // Camera (Uniform) - Binding 0
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Particles (Storage) - Binding 1
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let particle_buffer = Self::create_particle_buffer(device, INITIAL_CAPACITY);
        let bind_group =
            Self::create_bind_group(device, &bind_group_layout, &camera_buffer, &particle_buffer);

        Self {
            render_pipeline,
            camera_buffer,
            bind_group_layout,
            bind_group,
            particle_buffer,
            capacity: INITIAL_CAPACITY,
            particle_count: 0,
            staging: Vec::with_capacity(INITIAL_CAPACITY),
            srgb_target: format.is_srgb(),
            show_ghosts: true,
        }
    }

    fn create_particle_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Buffer"),
            size: (capacity * std::mem::size_of::<GpuParticle>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        particle_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: particle_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Copy the current particle state to the GPU, growing the buffer if needed.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        particles: &[Particle],
        groups: &[ParticleGroup],
    ) {
        if particles.len() > self.capacity {
            let capacity = particles.len().next_power_of_two();
            log::debug!(
                "Growing particle buffer from {} to {} particles",
                self.capacity,
                capacity
            );
            self.particle_buffer = Self::create_particle_buffer(device, capacity);
            self.bind_group = Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.camera_buffer,
                &self.particle_buffer,
            );
            self.capacity = capacity;
        }

        pack_particles(particles, groups, self.srgb_target, &mut self.staging);
        if !self.staging.is_empty() {
            queue.write_buffer(&self.particle_buffer, 0, bytemuck::cast_slice(&self.staging));
        }
        self.particle_count = particles.len() as u32;
    }

    /// Clear `view` to black and draw the last uploaded particles.
    pub fn render(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        camera: &ScreenCamera,
        world_size: Vec2,
    ) {
        let tile_count = tile_count(self.show_ghosts);
        let uniform = CameraUniform {
            view_proj: camera.build_view_projection_matrix().to_cols_array_2d(),
            world_origin: camera.centre_offset(world_size).to_array(),
            world_size: world_size.to_array(),
            ghost_color: output_color(GHOST_COLOR, self.srgb_target),
            particle_radius: PARTICLE_RADIUS,
            particle_count: self.particle_count,
            tile_count,
            _padding: 0,
        };
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Particle Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.particle_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..6, 0..self.particle_count * tile_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_count() {
        assert_eq!(tile_count(true), 9);
        assert_eq!(tile_count(false), 1);
    }
}
