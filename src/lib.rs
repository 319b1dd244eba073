//! Point animals on a 2D surface that age every tick and die or reproduce
//! according to a hue-based fitness rule.

pub mod animal;
pub mod config;
pub mod constants;
pub mod error;
pub mod renderer;
pub mod simulation;
pub mod utils;

pub use animal::{Animal, Color, DeathCause, Position, TickOutcome};
pub use config::SimulationConfig;
pub use error::{RendererError, SimulationError};
pub use simulation::{
    Phase, RenderSink, SimulationState, SimulationStats, TickReport, TickScheduler, TickStatus,
};
