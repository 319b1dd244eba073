use thiserror::Error;

/// Errors raised at the construction boundaries of the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// `random_int` was asked for an empty or non-finite range.
    #[error("invalid range: ceil({min}) > floor({max})")]
    InvalidRange { min: f64, max: f64 },
    /// `start` needs at least one animal.
    #[error("initial population must be positive, got {0}")]
    InvalidPopulation(usize),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported format or alpha mode")]
    UnsupportedSurface,
}
