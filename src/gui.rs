use egui::{Align2, Color32, Context, RichText};
use egui_wgpu::Renderer;
use egui_winit::State;
use particle_physics::{AttractionMatrix, Color, ParticleGroup};
use particle_simulation::{EngineKind, SimulationParams};
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

/// Values shown in, and edited through, the UI.
pub struct UiState {
    pub fps: u32,
    pub particle_count: usize,
    /// Average step time over the last second
    pub step_time_ms: f32,
    pub params: SimulationParams,
    pub engine: EngineKind,
    /// Draw the wrapped copies around the world
    pub show_ghosts: bool,
}

impl UiState {
    pub fn new(params: SimulationParams, engine: EngineKind) -> Self {
        Self {
            fps: 0,
            particle_count: 0,
            step_time_ms: 0.0,
            params,
            engine,
            show_ghosts: true,
        }
    }
}

/// Button presses for the owner to act on after the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    RandomizeMatrix,
    ResetMatrix,
    Respawn,
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions::default(),
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Draw the UI on top of `view` and return the buttons pressed this frame.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
        matrix: &mut AttractionMatrix,
        groups: &[ParticleGroup],
    ) -> Vec<UiAction> {
        let raw_input = self.state.take_egui_input(window);

        let mut actions = Vec::new();
        let full_output = self.context.run(raw_input, |ctx| {
            Self::ui(ctx, ui_state, matrix, groups, &mut actions);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            self.renderer
                .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        actions
    }

    fn ui(
        ctx: &Context,
        state: &mut UiState,
        matrix: &mut AttractionMatrix,
        groups: &[ParticleGroup],
        actions: &mut Vec<UiAction>,
    ) {
        // FPS (Bottom Left)
        egui::Area::new(egui::Id::new("fps_overlay"))
            .anchor(Align2::LEFT_BOTTOM, [8.0, -8.0])
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("FPS: {}", state.fps))
                        .color(Color32::GREEN)
                        .monospace(),
                );
            });

        if !state.params.show_ui {
            return;
        }

        // Simulation Controls (Top Left)
        egui::Window::new("Simulation")
            .anchor(Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.heading("Statistics");
                ui.label(format!("Particles: {}", state.particle_count));
                ui.label(format!("Step Time: {:.2} ms", state.step_time_ms));

                ui.separator();
                ui.heading("Engine");
                egui::ComboBox::from_id_salt("engine")
                    .selected_text(state.engine.as_str())
                    .show_ui(ui, |ui| {
                        for kind in EngineKind::ALL {
                            ui.selectable_value(&mut state.engine, kind, kind.as_str());
                        }
                    });

                ui.separator();
                ui.heading("Physics");
                let params = &mut state.params;
                ui.add(
                    egui::Slider::new(&mut params.delta_t, -1.0..=1.0)
                        .step_by(0.01)
                        .text("Time Scale (dt)"),
                );
                ui.add(
                    egui::Slider::new(&mut params.friction_half_time, 0.0..=10.0)
                        .step_by(0.01)
                        .text("Friction Half-Time"),
                );
                ui.add(
                    egui::Slider::new(&mut params.force_multiplier, 0.0..=5.0)
                        .step_by(0.01)
                        .text("Force Multiplier"),
                );
                ui.add(
                    egui::Slider::new(&mut params.beta, 0.0..=1.0)
                        .step_by(0.01)
                        .text("Beta"),
                );
                ui.add(egui::Slider::new(&mut params.r_max, 1..=1000).text("Max Radius"));

                ui.separator();
                ui.heading("Display");
                ui.checkbox(&mut state.show_ghosts, "Show Wrapped Copies");

                ui.separator();
                ui.heading("Attraction");
                Self::matrix_grid(ui, matrix, groups);

                ui.horizontal(|ui| {
                    if ui.button("Randomize").clicked() {
                        actions.push(UiAction::RandomizeMatrix);
                    }
                    if ui.button("Reset").clicked() {
                        actions.push(UiAction::ResetMatrix);
                    }
                    if ui.button("Respawn").clicked() {
                        actions.push(UiAction::Respawn);
                    }
                });

                ui.separator();
                ui.small("Space: toggle UI    R: randomize    G: wrapped copies    Esc: quit");
            });
    }

    /// Rows are the attracted group, columns the group it is drawn to.
    fn matrix_grid(ui: &mut egui::Ui, matrix: &mut AttractionMatrix, groups: &[ParticleGroup]) {
        let size = matrix.size();
        egui::Grid::new("attraction_matrix")
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                ui.label("");
                for to in 0..size {
                    ui.label(group_swatch(groups, to));
                }
                ui.end_row();

                for from in 0..size {
                    ui.label(group_swatch(groups, from));
                    for to in 0..size {
                        if let Ok(value) = matrix.get_mut(from, to) {
                            ui.add(
                                egui::DragValue::new(value)
                                    .range(-1.0..=1.0)
                                    .speed(0.01)
                                    .fixed_decimals(2),
                            );
                        }
                    }
                    ui.end_row();
                }
            });
    }
}

fn group_swatch(groups: &[ParticleGroup], id: usize) -> RichText {
    let color = groups.get(id).map_or(Color::new(1.0, 1.0, 1.0), |g| g.color);
    RichText::new("●").color(to_color32(color)).strong()
}

fn to_color32(color: Color) -> Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(color.red), channel(color.green), channel(color.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color32() {
        assert_eq!(to_color32(Color::new(1.0, 0.0, 0.5)), Color32::from_rgb(255, 0, 128));
        assert_eq!(to_color32(Color::new(2.0, -1.0, 0.0)), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_ui_state_starts_empty() {
        let state = UiState::new(SimulationParams::default(), EngineKind::Sequential);
        assert_eq!(state.fps, 0);
        assert_eq!(state.particle_count, 0);
        assert_eq!(state.engine, EngineKind::Sequential);
        assert!(state.params.show_ui);
        assert!(state.show_ghosts);
    }
}
