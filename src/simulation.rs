//! The particle-life application

use std::time::{Duration, Instant};

use particle_physics::World;
use particle_renderer::{ParticleRenderer, ScreenCamera};
use particle_simulation::{
    apply_default_attractions, build_engine, default_system, EngineKind, ParticleSystem,
    PhysicsEngine, SimulationParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::config::{AppConfig, SimulationConfig};
use crate::graphics::GraphicsContext;
use crate::gui::{Gui, UiAction, UiState};
use crate::launcher::{ApplicationListener, Frame};

/// Longest frame delta fed to the engine; longer gaps (window drags, breakpoints) are clamped.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Averages engine step durations over one-second windows.
#[derive(Debug, Clone)]
pub struct StepTimer {
    window_start: Instant,
    total: Duration,
    steps: u32,
    average_ms: f32,
}

impl StepTimer {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            total: Duration::ZERO,
            steps: 0,
            average_ms: 0.0,
        }
    }

    /// Returns the new average when a window closes.
    pub fn record(&mut self, step: Duration, now: Instant) -> Option<f32> {
        self.total += step;
        self.steps += 1;
        if now.duration_since(self.window_start) < Duration::from_secs(1) {
            return None;
        }
        self.average_ms = self.total.as_secs_f32() * 1000.0 / self.steps as f32;
        self.total = Duration::ZERO;
        self.steps = 0;
        self.window_start = now;
        Some(self.average_ms)
    }

    pub fn average_ms(&self) -> f32 {
        self.average_ms
    }
}

/// Simulation seconds to advance for a wall-clock frame of `frame_delta`.
pub fn step_dt(params: &SimulationParams, frame_delta: f32) -> f32 {
    params.delta_t * frame_delta.clamp(0.0, MAX_FRAME_DELTA)
}

/// Everything that needs the window and GPU to exist.
struct Scene {
    system: ParticleSystem,
    renderer: ParticleRenderer,
    camera: ScreenCamera,
    gui: Gui,
    scale_factor: f64,
}

/// Particles in coloured groups attracting and repelling each other on a torus.
pub struct Simulation {
    config: SimulationConfig,
    engine: Box<dyn PhysicsEngine>,
    ui_state: UiState,
    rng: StdRng,
    step_timer: StepTimer,
    scene: Option<Scene>,
}

impl Simulation {
    pub fn new(config: &AppConfig) -> Self {
        let rng = match config.simulation.seed {
            Some(seed) => {
                log::info!("Seeding simulation with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Self {
            config: config.simulation.clone(),
            engine: build_engine(config.simulation.engine),
            ui_state: UiState::new(config.params, config.simulation.engine),
            rng,
            step_timer: StepTimer::new(Instant::now()),
            scene: None,
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.ui_state.params
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.engine.kind()
    }

    pub fn toggle_ui(&mut self) {
        let show = !self.ui_state.params.show_ui;
        self.ui_state.params.show_ui = show;
        log::debug!("UI {}", if show { "shown" } else { "hidden" });
    }

    pub fn show_ghosts(&self) -> bool {
        self.ui_state.show_ghosts
    }

    pub fn toggle_ghosts(&mut self) {
        self.ui_state.show_ghosts = !self.ui_state.show_ghosts;
    }

    pub fn randomize_matrix(&mut self) {
        if let Some(scene) = &mut self.scene {
            scene.system.matrix.randomize(&mut self.rng);
            log::info!("Randomized attraction matrix");
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::RandomizeMatrix => self.randomize_matrix(),
            UiAction::ResetMatrix => {
                if let Some(scene) = &mut self.scene {
                    apply_default_attractions(&mut scene.system.matrix);
                    log::info!("Reset attraction matrix");
                }
            }
            UiAction::Respawn => {
                if let Some(scene) = &mut self.scene {
                    let world = scene.system.world;
                    scene.system.groups.respawn(&world, &mut self.rng);
                    log::info!("Respawned {} particles", scene.system.particle_count());
                }
            }
        }
    }

    fn sync_engine(&mut self) {
        if self.ui_state.engine != self.engine.kind() {
            self.engine = build_engine(self.ui_state.engine);
        }
    }

    fn step(&mut self, frame_delta: f32) {
        let Some(scene) = &mut self.scene else {
            return;
        };

        let dt = step_dt(&self.ui_state.params, frame_delta);
        let start = Instant::now();
        self.engine
            .update(&mut scene.system, &self.ui_state.params, dt);
        let elapsed = start.elapsed();

        log::trace!("{} step took {:?}", self.engine.kind(), elapsed);
        if let Some(average) = self.step_timer.record(elapsed, Instant::now()) {
            log::debug!("{} engine: {:.2} ms/step", self.engine.kind(), average);
        }
        self.ui_state.step_time_ms = self.step_timer.average_ms();
    }
}

fn logical_size(width: u32, height: u32, scale_factor: f64) -> (u32, u32) {
    let size = PhysicalSize::new(width, height).to_logical::<f64>(scale_factor);
    (size.width.round() as u32, size.height.round() as u32)
}

impl ApplicationListener for Simulation {
    fn create(&mut self, gfx: &GraphicsContext, window: &Window) {
        let scale_factor = window.scale_factor();
        let (width, height) = gfx.size();
        let (width, height) = logical_size(width, height, scale_factor);

        let world = World::for_window(width, height);
        let system = default_system(
            world,
            self.config.groups,
            self.config.particles_per_group,
            &mut self.rng,
        );

        self.scene = Some(Scene {
            system,
            renderer: ParticleRenderer::new(&gfx.device, gfx.format()),
            camera: ScreenCamera::new(width, height),
            gui: Gui::new(&gfx.device, gfx.format(), window),
            scale_factor,
        });
    }

    fn resize(&mut self, _gfx: &GraphicsContext, width: u32, height: u32) {
        if let Some(scene) = &mut self.scene {
            let (width, height) = logical_size(width, height, scene.scale_factor);
            scene.camera.resize(width, height);
        }
    }

    fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let Some(scene) = &mut self.scene else {
            return false;
        };

        if let WindowEvent::ScaleFactorChanged { scale_factor, .. } = event {
            scene.scale_factor = *scale_factor;
            let size = window.inner_size();
            let (width, height) = logical_size(size.width, size.height, *scale_factor);
            scene.camera.resize(width, height);
        }

        if scene.gui.handle_event(window, event) {
            return true;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key {
                KeyCode::Space => {
                    self.toggle_ui();
                    true
                }
                KeyCode::KeyR => {
                    self.randomize_matrix();
                    true
                }
                KeyCode::KeyG => {
                    self.toggle_ghosts();
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn render(&mut self, gfx: &GraphicsContext, window: &Window, frame: Frame<'_>) {
        let Some(scene) = &mut self.scene else {
            return;
        };

        scene.renderer.show_ghosts = self.ui_state.show_ghosts;
        scene.renderer.upload(
            &gfx.device,
            &gfx.queue,
            scene.system.particles(),
            scene.system.groups.groups(),
        );
        scene.renderer.render(
            &gfx.queue,
            frame.encoder,
            frame.view,
            &scene.camera,
            scene.system.world.size(),
        );

        self.ui_state.fps = frame.fps;
        self.ui_state.particle_count = scene.system.particle_count();
        let actions = scene.gui.render(
            &gfx.device,
            &gfx.queue,
            frame.encoder,
            window,
            frame.view,
            &mut self.ui_state,
            &mut scene.system.matrix,
            scene.system.groups.groups(),
        );

        for action in actions {
            self.apply(action);
        }
        self.sync_engine();
        self.step(frame.delta);
    }

    fn dispose(&mut self) {
        if let Some(scene) = self.scene.take() {
            log::info!(
                "Disposed simulation of {} particles",
                scene.system.particle_count()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(42);
        config.simulation.engine = EngineKind::Sequential;
        config
    }

    #[test]
    fn test_step_dt_scales_by_delta_t() {
        let params = SimulationParams::default();
        assert!((step_dt(&params, 0.1) - 0.02).abs() < 1e-6);
        assert_eq!(step_dt(&params, 0.0), 0.0);
    }

    #[test]
    fn test_step_dt_clamps_long_frames() {
        let params = SimulationParams::default();
        assert_eq!(step_dt(&params, 5.0), params.delta_t * MAX_FRAME_DELTA);
        assert_eq!(step_dt(&params, -1.0), 0.0);
    }

    #[test]
    fn test_step_timer_averages_per_second() {
        let start = Instant::now();
        let mut timer = StepTimer::new(start);
        assert_eq!(timer.record(Duration::from_millis(2), start), None);
        let average = timer
            .record(Duration::from_millis(4), start + Duration::from_secs(1))
            .unwrap();
        assert!((average - 3.0).abs() < 1e-3);
        assert_eq!(timer.average_ms(), average);
    }

    #[test]
    fn test_new_uses_configured_engine_and_params() {
        let sim = Simulation::new(&seeded_config());
        assert_eq!(sim.engine_kind(), EngineKind::Sequential);
        assert_eq!(*sim.params(), SimulationParams::default());
    }

    #[test]
    fn test_toggle_ui() {
        let mut sim = Simulation::new(&seeded_config());
        assert!(sim.params().show_ui);
        sim.toggle_ui();
        assert!(!sim.params().show_ui);
        sim.toggle_ui();
        assert!(sim.params().show_ui);
    }

    #[test]
    fn test_toggle_ghosts() {
        let mut sim = Simulation::new(&seeded_config());
        assert!(sim.show_ghosts());
        sim.toggle_ghosts();
        assert!(!sim.show_ghosts());
    }

    #[test]
    fn test_engine_follows_ui_selection() {
        let mut sim = Simulation::new(&seeded_config());
        sim.ui_state.engine = EngineKind::Chunked;
        sim.sync_engine();
        assert_eq!(sim.engine_kind(), EngineKind::Chunked);
    }

    #[test]
    fn test_logical_size() {
        assert_eq!(logical_size(2000, 2000, 2.0), (1000, 1000));
        assert_eq!(logical_size(1000, 800, 1.0), (1000, 800));
    }
}
