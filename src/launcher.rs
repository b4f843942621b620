//! Windowed application host
//!
//! Opens the window, owns the GPU context, paces frames and drives an
//! [`ApplicationListener`] through its lifecycle until the window closes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::WindowConfig;
use crate::error::LaunchError;
use crate::graphics::GraphicsContext;

/// Per-frame data handed to [`ApplicationListener::render`].
pub struct Frame<'a> {
    pub view: &'a wgpu::TextureView,
    pub encoder: &'a mut wgpu::CommandEncoder,
    /// Wall-clock seconds since the previous frame
    pub delta: f32,
    /// Frames rendered during the last full second
    pub fps: u32,
}

/// Application lifecycle driven by [`launch`].
pub trait ApplicationListener {
    /// Window and GPU are ready.
    fn create(&mut self, gfx: &GraphicsContext, window: &Window);

    /// Surface was resized to a non-zero size.
    fn resize(&mut self, gfx: &GraphicsContext, width: u32, height: u32);

    /// Returns `true` when the event was consumed.
    fn handle_event(&mut self, _window: &Window, _event: &WindowEvent) -> bool {
        false
    }

    fn render(&mut self, gfx: &GraphicsContext, window: &Window, frame: Frame<'_>);

    fn dispose(&mut self) {}
}

/// Schedules redraws at a fixed interval.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next_frame: Instant,
}

impl FramePacer {
    pub fn new(interval: Option<Duration>, now: Instant) -> Self {
        Self {
            interval,
            next_frame: now,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.interval.is_some()
    }

    pub fn deadline(&self) -> Instant {
        self.next_frame
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.interval.is_none() || now >= self.next_frame
    }

    /// Book the frame starting at `now` and return when the next one is due.
    ///
    /// After a stall the schedule restarts from `now` rather than bursting
    /// to catch up.
    pub fn schedule(&mut self, now: Instant) -> Instant {
        let Some(interval) = self.interval else {
            self.next_frame = now;
            return now;
        };
        self.next_frame += interval;
        if self.next_frame <= now {
            self.next_frame = now + interval;
        }
        self.next_frame
    }
}

/// Counts frames per wall-clock second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0,
        }
    }

    /// Record a frame; returns the rate measured over the last completed second.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.frames += 1;
        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = now;
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

struct App<L: ApplicationListener> {
    config: WindowConfig,
    listener: L,
    window: Option<Arc<Window>>,
    gfx: Option<GraphicsContext>,
    pacer: FramePacer,
    fps: FpsCounter,
    last_frame: Instant,
    error: Option<LaunchError>,
}

impl<L: ApplicationListener> App<L> {
    fn new(config: WindowConfig, listener: L) -> Self {
        let now = Instant::now();
        Self {
            pacer: FramePacer::new(config.frame_interval(), now),
            config,
            listener,
            window: None,
            gfx: None,
            fps: FpsCounter::new(now),
            last_frame: now,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: LaunchError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), LaunchError> {
        let window = Arc::new(event_loop.create_window(self.config.window_attributes())?);
        let gfx = pollster::block_on(GraphicsContext::new(window.clone(), self.config.vsync))?;

        let (width, height) = gfx.size();
        log::info!("✓ Window {}x{} ({})", width, height, self.config.title);

        self.listener.create(&gfx, &window);
        window.request_redraw();

        self.window = Some(window);
        self.gfx = Some(gfx);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gfx)) = (self.window.as_ref(), self.gfx.as_ref()) else {
            return;
        };

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        let fps = self.fps.tick(now);

        let output = match gfx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                gfx.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, LaunchError::OutOfMemory);
                return;
            }
            Err(e) => {
                log::warn!("Skipping frame: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.listener.render(
            gfx,
            window,
            Frame {
                view: &view,
                encoder: &mut encoder,
                delta,
                fps,
            },
        );

        gfx.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        output.present();
    }
}

impl<L: ApplicationListener> ApplicationHandler for App<L> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                if let Some(gfx) = &mut self.gfx {
                    if gfx.resize(physical_size.width, physical_size.height) {
                        self.listener
                            .resize(gfx, physical_size.width, physical_size.height);
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            event => {
                let consumed = match &self.window {
                    Some(window) => self.listener.handle_event(window, &event),
                    None => false,
                };
                if consumed {
                    return;
                }

                if let WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } = event
                {
                    event_loop.exit();
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        let now = Instant::now();
        if !self.pacer.is_capped() {
            window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Poll);
            return;
        }

        if self.pacer.is_due(now) {
            window.request_redraw();
            self.pacer.schedule(now);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.deadline()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Shutting down");
        self.listener.dispose();
    }
}

/// Open the window described by `config` and run `listener` until it closes.
pub fn launch<L: ApplicationListener>(config: &WindowConfig, listener: L) -> Result<(), LaunchError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config.clone(), listener);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIXTIETH: Duration = Duration::from_micros(16_667);

    #[test]
    fn test_pacer_first_frame_is_due() {
        let now = Instant::now();
        let pacer = FramePacer::new(Some(SIXTIETH), now);
        assert!(pacer.is_due(now));
    }

    #[test]
    fn test_pacer_spaces_frames() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Some(SIXTIETH), start);

        let next = pacer.schedule(start);
        assert_eq!(next, start + SIXTIETH);
        assert!(!pacer.is_due(start + Duration::from_millis(5)));
        assert!(pacer.is_due(start + SIXTIETH));

        // on-time frames keep a steady cadence
        let next = pacer.schedule(start + SIXTIETH + Duration::from_millis(1));
        assert_eq!(next, start + SIXTIETH * 2);
    }

    #[test]
    fn test_pacer_resets_after_stall() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Some(SIXTIETH), start);
        pacer.schedule(start);

        let late = start + Duration::from_millis(500);
        assert_eq!(pacer.schedule(late), late + SIXTIETH);
    }

    #[test]
    fn test_uncapped_pacer_is_always_due() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(None, start);
        assert!(!pacer.is_capped());
        assert!(pacer.is_due(start));
        assert_eq!(pacer.schedule(start), start);
    }

    #[test]
    fn test_fps_counter() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        for i in 1..60 {
            assert_eq!(counter.tick(start + SIXTIETH * i), 0);
        }
        assert_eq!(counter.tick(start + Duration::from_secs(1)), 60);
        assert_eq!(counter.fps(), 60);
    }
}
