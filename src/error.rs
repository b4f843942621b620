use thiserror::Error;

/// Failures while bringing up or running the window
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("No suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("Failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface reports no supported formats for this adapter")]
    UnsupportedSurface,

    #[error("Out of GPU memory while presenting")]
    OutOfMemory,
}
